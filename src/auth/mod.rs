//
//  bbapi
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Bitbucket Cloud REST calls made by this tool use HTTP Basic authentication
//! with a username and an app password (or API token).
//!
//! - [`Token`]: the secret half, held as an opaque handle
//! - [`Credential`]: username + token, applied to outgoing requests
//!
//! ## Example
//!
//! ```rust
//! use bbapi::auth::{Credential, Token};
//!
//! let credential = Credential::new("jdoe", Token::new("app-password"));
//! assert_eq!(credential.user(), "jdoe");
//! ```

mod token;

pub use token::*;

use reqwest::RequestBuilder;

/// Basic-auth credential for Bitbucket Cloud.
///
/// Each request descriptor owns its own credential; nothing is shared between
/// calls.
#[derive(Debug)]
pub struct Credential {
    /// Bitbucket username (may be empty if the caller did not provide one).
    user: String,
    /// App password or API token.
    token: Token,
}

impl Credential {
    /// Creates a credential from a username and token.
    pub fn new(user: impl Into<String>, token: Token) -> Self {
        Self {
            user: user.into(),
            token,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Applies HTTP Basic authentication to a request.
    ///
    /// This is the only place the token is exposed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bbapi::auth::{Credential, Token};
    /// use reqwest::Client;
    ///
    /// let credential = Credential::new("jdoe", Token::new("app-password"));
    /// let request = credential.apply_to_request(Client::new().get("https://api.bitbucket.org/2.0/user"));
    /// ```
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.user, Some(self.token.expose()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;
    use reqwest::Client;

    #[test]
    fn test_apply_basic_auth() {
        let credential = Credential::new("user", Token::new("secret"));
        let request = credential
            .apply_to_request(Client::new().get("http://localhost/repositories"))
            .build()
            .unwrap();

        let header = request.headers().get(AUTHORIZATION).unwrap();
        // base64("user:secret")
        assert_eq!(header.to_str().unwrap(), "Basic dXNlcjpzZWNyZXQ=");
    }

    #[test]
    fn test_debug_hides_token() {
        let credential = Credential::new("user", Token::new("secret"));
        let debug = format!("{:?}", credential);
        assert!(debug.contains("user"));
        assert!(!debug.contains("secret"));
    }
}
