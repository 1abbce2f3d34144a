//
//  bbapi
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # App Password / Token Handling
//!
//! Bitbucket Cloud accepts an app password (or API token) in place of the
//! account password for Basic authentication. This module wraps that secret in
//! an opaque handle so it never shows up in `Debug` output or logs and is wiped
//! from memory when dropped.
//!
//! The token is not encrypted at rest inside the process. A key held in the
//! same memory as the ciphertext protects nothing; real protection comes from
//! where the token is sourced (environment, secret store).

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// An app password or API token used as the Basic-auth secret.
///
/// # Example
///
/// ```rust
/// use bbapi::auth::Token;
///
/// let token = Token::new("ATBB-secret");
/// assert_eq!(token.expose(), "ATBB-secret");
/// assert_eq!(format!("{token:?}"), "Token([REDACTED])");
/// ```
pub struct Token(SecretString);

impl Token {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Wraps a token read from a flag or environment variable.
    ///
    /// Empty strings count as "no token", matching how an unset flag is
    /// reported by the command line.
    pub fn from_optional(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.is_empty()).map(Self::new)
    }

    /// Returns the secret for the moment it is placed on a request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
