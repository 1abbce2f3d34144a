//
//  bbapi
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Issues authenticated calls to the Bitbucket Cloud REST API v2.0 at
//! `api.bitbucket.org` (or any compatible root passed as the base URL).
//!
//! ## Architecture
//!
//! - [`request`]: The per-call request descriptor and HTTP method set
//! - [`client`]: The HTTP client that dispatches a request and decodes the result
//! - [`error`]: Error taxonomy for validation, payload and transport failures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bbapi::api::{execute_blocking, ApiRequest, Method};
//! use bbapi::auth::Token;
//!
//! let request = ApiRequest::new("/repositories", Method::Get)
//!     .with_user("jdoe")
//!     .with_token(Some(Token::new("app-password")));
//!
//! let response = execute_blocking(request)?;
//! println!("{response}");
//! # Ok::<(), bbapi::api::ApiError>(())
//! ```
//!
//! ## Error Handling
//!
//! Bitbucket's own error responses (4xx/5xx with a JSON body) are returned as
//! ordinary values; inspect the body to detect them. [`ApiError`] is reserved
//! for failures that prevent a JSON response from being produced.

/// Core HTTP client and the `execute` entry points.
pub mod client;

/// Error types.
pub mod error;

/// Request descriptor and HTTP methods.
pub mod request;

pub use client::{execute, execute_blocking, token_missing, ApiClient, TOKEN_MISSING_MESSAGE};
pub use error::ApiError;
pub use request::{ApiRequest, Method, DEFAULT_API_PATH, DEFAULT_BASE_URL};
