//
//  bbapi
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Descriptor
//!
//! [`ApiRequest`] describes a single call: which resource, which method, which
//! host, whose credentials and which payload file. It is built per call and
//! consumed by [`execute`](super::execute).
//!
//! ```rust
//! use bbapi::api::{ApiRequest, Method};
//! use bbapi::auth::Token;
//!
//! let request = ApiRequest::new("/workspaces/acme/projects", Method::Post)
//!     .with_user("jdoe")
//!     .with_token(Some(Token::new("app-password")))
//!     .with_json_path(Some("project.json".into()));
//!
//! assert_eq!(request.url(), "https://api.bitbucket.org/2.0/workspaces/acme/projects");
//! assert!(request.validate().is_ok());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::Url;

use super::ApiError;
use crate::auth::Token;

/// Public Bitbucket Cloud API root.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Resource requested when neither an API path nor a payload is given.
pub const DEFAULT_API_PATH: &str = "/repositories";

/// HTTP methods accepted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// All supported methods, in the order shown in help text.
    pub const ALL: [Method; 4] = [Method::Delete, Method::Get, Method::Post, Method::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a payload file must be supplied.
    pub fn requires_payload(&self) -> bool {
        matches!(self, Method::Post)
    }

    /// Whether a payload file is sent when supplied.
    pub fn accepts_payload(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl FromStr for Method {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(ApiError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single API call, described as data.
///
/// Owns its credentials. Nothing here is shared between requests.
#[derive(Debug)]
pub struct ApiRequest {
    api_path: String,
    method: Method,
    base_url: String,
    user: String,
    token: Option<Token>,
    json_path: Option<PathBuf>,
}

impl ApiRequest {
    /// Creates a request against the public API root with no credentials.
    pub fn new(api_path: impl Into<String>, method: Method) -> Self {
        Self {
            api_path: api_path.into(),
            method,
            base_url: DEFAULT_BASE_URL.to_string(),
            user: String::new(),
            token: None,
            json_path: None,
        }
    }

    /// Overrides the API root. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the secret. An empty token is treated as absent.
    pub fn with_token(mut self, token: Option<Token>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Sets the payload file. An empty path is treated as absent.
    pub fn with_json_path(mut self, json_path: Option<PathBuf>) -> Self {
        self.json_path = json_path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn json_path(&self) -> Option<&Path> {
        self.json_path.as_deref()
    }

    /// Full request URL: base URL followed by the API path.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.api_path)
    }

    /// Checks the request before anything touches the network.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingPayload`] for a POST without a JSON file
    /// - [`ApiError::InvalidApiPath`] for a non-empty path without a leading `/`
    /// - [`ApiError::InvalidBaseUrl`] when the base URL is not absolute http(s)
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.method.requires_payload() && self.json_path.is_none() {
            return Err(ApiError::MissingPayload(self.method.as_str()));
        }

        if !self.api_path.is_empty() && !self.api_path.starts_with('/') {
            return Err(ApiError::InvalidApiPath(self.api_path.clone()));
        }

        let parsed = Url::parse(&self.base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(())
    }

    pub(crate) fn take_token(&mut self) -> Option<Token> {
        self.token.take()
    }
}
