//
//  bbapi
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error types for API requests
//!
//! Remote errors (4xx/5xx with a JSON body) are not represented here: the
//! decoded body is returned to the caller as-is. These variants cover input
//! validation, payload I/O and transport failures only.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while building or dispatching an API request.
///
/// # Variants
///
/// | Variant | Raised when | Request sent? |
/// |---------|-------------|---------------|
/// | `UnsupportedMethod` | Method is not GET, POST, PUT or DELETE | No |
/// | `MissingPayload` | POST without a JSON file | No |
/// | `InvalidApiPath` | Path does not start with `/` | No |
/// | `InvalidBaseUrl` | Base URL is not an absolute http(s) URL | No |
/// | `Payload` | JSON file could not be read | No |
/// | `Transport` | Connection, DNS, TLS or I/O failure | Attempted |
/// | `Decode` | Response body is not valid JSON | Yes |
/// | `Runtime` | Blocking runtime could not start | No |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The method string is not one of the supported HTTP methods.
    #[error("Unsupported HTTP method: {0} (expected one of DELETE, GET, POST, PUT)")]
    UnsupportedMethod(String),

    /// A method that requires a request body was given no payload file.
    #[error("Json file required with method {0}!")]
    MissingPayload(&'static str),

    /// The API path is not rooted.
    #[error("Invalid API path '{0}': it should start with a slash")]
    InvalidApiPath(String),

    /// The base URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The payload file could not be read.
    #[error("Failed to read JSON file {}: {source}", .path.display())]
    Payload {
        /// Path of the payload file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("Response ({status}) is not valid JSON: {source}")]
    Decode {
        /// HTTP status of the response
        status: StatusCode,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// The current-thread runtime used by blocking callers failed to start.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl ApiError {
    /// Returns `true` for errors caused by caller input rather than the network.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod(_)
                | Self::MissingPayload(_)
                | Self::InvalidApiPath(_)
                | Self::InvalidBaseUrl { .. }
        )
    }
}
