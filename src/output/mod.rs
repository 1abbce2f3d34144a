//
//  bbapi
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output
//!
//! Responses are written to stdout as JSON so they can be piped into `jq` or
//! other tools. Diagnostics go to stderr.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

/// Writes a value to stdout, pretty-printed unless `compact` is set.
pub fn write_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value, compact)
}

/// Writes a value to any writer, followed by a newline.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *writer, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}
