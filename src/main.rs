//
//  bbapi
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bbapi::api::ApiError;
use bbapi::cli::Cli;
use bbapi::{exit_codes, output};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();
    let compact = cli.compact;

    // Execute the request and exit
    match cli.run().await {
        Ok(Some(response)) => {
            output::write_json(&response, compact)?;
            std::process::exit(exit_codes::SUCCESS);
        }
        Ok(None) => std::process::exit(exit_codes::USAGE),
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").for_stderr().red().bold());
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBAPI_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code_for(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<ApiError>() {
        Some(api_err) if api_err.is_usage() => exit_codes::USAGE,
        _ => exit_codes::ERROR,
    }
}
