//
//  bbapi
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # bbapi
//!
//! Call Bitbucket Cloud REST endpoints from the command line or from Rust.
//!
//! ## Overview
//!
//! One invocation sends one request: the API root plus an API path, a method
//! (GET, POST, PUT or DELETE), HTTP Basic authentication with a username and
//! an app password/token, and optionally a JSON file as the request body. The
//! JSON response is returned as a [`serde_json::Value`], or `{}` for
//! `204 No Content`.
//!
//! ## Module Structure
//!
//! - [`api`]: Request descriptor, HTTP client and errors
//! - [`auth`]: Basic-auth credential and secret token handling
//! - [`config`]: Config file and flag/env/default resolution
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: JSON output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bbapi::api::{execute_blocking, ApiRequest, Method};
//! use bbapi::auth::Token;
//!
//! let request = ApiRequest::new("/workspaces/acme/projects/KEY", Method::Delete)
//!     .with_user("jdoe")
//!     .with_token(Some(Token::new("app-password")));
//!
//! let response = execute_blocking(request).expect("request failed");
//! assert_eq!(response, serde_json::json!({}));
//! ```

/// API client for Bitbucket Cloud.
///
/// Builds the request URL and headers, applies Basic authentication, sends
/// exactly one request and decodes the JSON response.
pub mod api;

/// Authentication and credential handling.
pub mod auth;

/// Configuration file and settings resolution.
///
/// The config file lives in the platform-specific config directory:
/// - Linux: `~/.config/bbapi/config.toml`
/// - macOS: `~/Library/Application Support/bbapi/config.toml`
/// - Windows: `%APPDATA%\bbapi\config.toml`
pub mod config;

/// Command-line interface definitions.
pub mod cli;

/// JSON output helpers.
pub mod output;

pub use api::{execute, execute_blocking, ApiError, ApiRequest, Method};
pub use cli::Cli;
pub use config::Config;

/// Application name constant.
///
/// Used for the User-Agent header and configuration paths.
pub const APP_NAME: &str = "bbapi";

/// Application version constant.
///
/// ```rust
/// use bbapi::VERSION;
///
/// println!("bbapi version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success (including remote error responses, which are printed as JSON)
/// - `1`: Transport, payload or decode failure
/// - `2`: Invalid usage (unsupported method, missing JSON file for POST, bad path or URL)
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// The request could not be completed. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// Nothing was sent. Use `--help` to see correct usage.
    pub const USAGE: i32 = 2;
}
