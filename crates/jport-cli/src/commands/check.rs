// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse Java sources and report diagnostics without emitting anything.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use tracing::{debug, info, instrument, warn};

use crate::diagnostic::{self, BatchFailure};

use super::find_source_files;

/// Check that every `.java` file under `path` parses cleanly.
#[instrument(skip_all, fields(path = %path))]
pub fn check(path: &str) -> Result<()> {
    let source_path = Utf8PathBuf::from(path);
    let source_files = find_source_files(&source_path)?;

    if source_files.is_empty() {
        miette::bail!("No .java source files found in '{path}'");
    }
    info!(count = source_files.len(), "Found source files");

    let mut failed = 0usize;
    for file in &source_files {
        match check_file(file) {
            Ok(()) => debug!(%file, "Checked"),
            Err(report) => {
                failed += 1;
                warn!(%file, "Check failed");
                eprintln!("{report:?}");
            }
        }
    }

    if failed > 0 {
        return Err(BatchFailure {
            failed,
            total: source_files.len(),
        }
        .into());
    }
    info!(count = source_files.len(), "All files parsed");
    Ok(())
}

fn check_file(file: &Utf8Path) -> Result<()> {
    let source = fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{file}'"))?;

    jport_core::parse(&source)
        .map(|_| ())
        .map_err(|error| diagnostic::with_source(error, file.as_str(), source.clone()))
}
