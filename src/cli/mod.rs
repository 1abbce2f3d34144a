//
//  bbapi
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI definition using clap derive macros
//!
//! ## Examples
//!
//! ```bash
//! # List repositories (default endpoint)
//! bbapi
//!
//! # Create a project
//! bbapi -a /workspaces/acme/projects -m POST -J project.json
//!
//! # Update a project
//! bbapi -m PUT -J project.json -a /workspaces/acme/projects/KEY
//!
//! # Delete a project
//! bbapi -m DELETE -a /workspaces/acme/projects/KEY
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{self, ApiError, Method};
use crate::config::{Config, Overrides, Settings};

/// bbapi - call Bitbucket Cloud REST APIs from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bbapi",
    version,
    about = "Call Bitbucket Cloud REST APIs from the command line",
    long_about = "bbapi sends one authenticated request to the Bitbucket Cloud API and prints the JSON response.\n\n\
                  Only basic authentication with an app password or API token is supported.\n\
                  See https://developer.atlassian.com/cloud/bitbucket/rest/ for endpoints and methods.",
    after_help = "Examples:\n  \
                  bbapi\n  \
                  bbapi -a /workspaces/acme/projects -m POST -J project.json\n  \
                  bbapi -m PUT -J project.json -a /workspaces/acme/projects/KEY\n  \
                  bbapi -m DELETE -a /workspaces/acme/projects/KEY"
)]
pub struct Cli {
    /// Bitbucket user (falls back to $BITBUCKET_USER)
    #[arg(long, short = 'U')]
    pub user: Option<String>,

    /// Bitbucket app password or API token (falls back to $BITBUCKET_TOKEN)
    #[arg(long, short = 't')]
    pub token: Option<String>,

    /// Bitbucket API root (default: https://api.bitbucket.org/2.0)
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// API path, starting with a slash (default: /repositories)
    #[arg(long, short = 'a')]
    pub api: Option<String>,

    /// HTTP method: one of DELETE, GET, POST, PUT
    #[arg(long, short = 'm', default_value = "GET")]
    pub method: String,

    /// JSON file sent as the request body (required with POST)
    #[arg(long = "jsonfile", short = 'J')]
    pub jsonfile: Option<PathBuf>,

    /// Print the response on a single line
    #[arg(long)]
    pub compact: bool,

    /// Alternate config file
    #[arg(long, env = "BBAPI_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolves settings, validates the call and executes it.
    ///
    /// Returns `Ok(None)` when the call was refused before any request was
    /// made (POST without a JSON file); the reason has already been printed.
    pub async fn run(self) -> Result<Option<Value>> {
        let method: Method = self.method.parse()?;

        let config = self.load_config()?;
        let overrides = Overrides {
            user: self.user,
            token: self.token,
            url: self.url,
            api: self.api,
            json_path: self.jsonfile,
        };
        let settings = Settings::resolve(overrides, &config, |key| std::env::var(key).ok());

        if method.requires_payload() && settings.json_path.is_none() {
            eprintln!(
                "{} {}",
                style("!").for_stderr().yellow(),
                ApiError::MissingPayload(method.as_str())
            );
            return Ok(None);
        }

        let request = settings.into_request(method);
        debug!(%method, url = %request.url(), "resolved request");

        Ok(Some(api::execute(request).await?))
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Ok(Config::load().unwrap_or_else(|e| {
                warn!("ignoring config file: {e:#}");
                Config::default()
            })),
        }
    }
}
