//
//  bbapi
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Resolves the settings for a call from, in order of precedence:
//!
//! 1. Command-line flags (an empty value counts as not given)
//! 2. Environment: `BITBUCKET_USER`, `BITBUCKET_TOKEN`
//! 3. The config file (`user`, `url`)
//! 4. Built-in defaults (`https://api.bitbucket.org/2.0`, `/repositories`)
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bbapi/config.toml`
//! - **macOS**: `~/Library/Application Support/bbapi/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbapi\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! user = "jdoe"
//! url = "https://api.bitbucket.org/2.0"
//! ```
//!
//! Tokens are never read from the file. Keep them in `BITBUCKET_TOKEN` or pass
//! them with `--token`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{ApiRequest, Method, DEFAULT_API_PATH, DEFAULT_BASE_URL};
use crate::auth::Token;

/// Environment variable holding the Bitbucket username.
pub const USER_ENV: &str = "BITBUCKET_USER";

/// Environment variable holding the app password or API token.
pub const TOKEN_ENV: &str = "BITBUCKET_TOKEN";

/// Persistent defaults loaded from `config.toml`.
///
/// # Example
///
/// ```rust
/// use bbapi::config::Config;
///
/// let config: Config = toml::from_str(r#"user = "jdoe""#).unwrap();
/// assert_eq!(config.user.as_deref(), Some("jdoe"));
/// assert!(config.url.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default Bitbucket username.
    #[serde(default)]
    pub user: Option<String>,

    /// Default API root (e.g. a proxy in front of `api.bitbucket.org`).
    #[serde(default)]
    pub url: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Returns the platform-specific path of `config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Raw values from the command line, before any fallback is applied.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub user: Option<String>,
    pub token: Option<String>,
    pub url: Option<String>,
    pub api: Option<String>,
    pub json_path: Option<PathBuf>,
}

/// Fully resolved settings for one call.
#[derive(Debug)]
pub struct Settings {
    pub user: String,
    pub token: Option<Token>,
    pub base_url: String,
    pub api_path: String,
    pub json_path: Option<PathBuf>,
}

impl Settings {
    /// Applies the flag → environment → file → default precedence.
    ///
    /// `env` looks up an environment variable; it is a parameter so callers
    /// can resolve against something other than the process environment.
    pub fn resolve<F>(overrides: Overrides, config: &Config, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let user = non_empty(overrides.user)
            .or_else(|| non_empty(env(USER_ENV)))
            .or_else(|| non_empty(config.user.clone()))
            .unwrap_or_default();

        let token = Token::from_optional(
            non_empty(overrides.token).or_else(|| non_empty(env(TOKEN_ENV))),
        );

        let base_url = non_empty(overrides.url)
            .or_else(|| non_empty(config.url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let json_path = overrides
            .json_path
            .filter(|p| !p.as_os_str().is_empty());

        let api_path = match non_empty(overrides.api) {
            Some(api) => api,
            None if json_path.is_none() => DEFAULT_API_PATH.to_string(),
            None => String::new(),
        };

        Self {
            user,
            token,
            base_url,
            api_path,
            json_path,
        }
    }

    /// Builds the request descriptor for `method`.
    pub fn into_request(self, method: Method) -> ApiRequest {
        ApiRequest::new(self.api_path, method)
            .with_base_url(self.base_url)
            .with_user(self.user)
            .with_token(self.token)
            .with_json_path(self.json_path)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
