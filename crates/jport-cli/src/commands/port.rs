// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Transpile Java sources to C# files.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use tracing::{debug, info, instrument, warn};

use crate::diagnostic::{self, BatchFailure};

use super::find_source_files;

/// Transpile every `.java` file under `path` into `out_dir`.
///
/// Files are processed independently: a failing file is reported and
/// skipped, the rest still port, and the run as a whole fails afterwards.
#[instrument(skip_all, fields(path = %path))]
pub fn port(path: &str, out_dir: &str) -> Result<()> {
    info!("Starting port");
    let source_path = Utf8PathBuf::from(path);
    let source_files = find_source_files(&source_path)?;

    if source_files.is_empty() {
        miette::bail!("No .java source files found in '{path}'");
    }
    info!(count = source_files.len(), "Found source files");

    let out_root = Utf8PathBuf::from(out_dir);
    fs::create_dir_all(&out_root)
        .into_diagnostic()
        .wrap_err("Failed to create output directory")?;

    let mut failed = 0usize;
    for file in &source_files {
        match port_file(file, &out_root) {
            Ok(target) => debug!(%file, %target, "Ported"),
            Err(report) => {
                failed += 1;
                warn!(%file, "Port failed");
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
    info!(count = source_files.len(), "Port finished");
    Ok(())
}

fn port_file(file: &Utf8Path, out_root: &Utf8Path) -> Result<Utf8PathBuf> {
    let source = fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{file}'"))?;

    let output = jport_core::transpile(&source)
        .map_err(|error| diagnostic::with_source(error, file.as_str(), source.clone()))?;

    let stem = file
        .file_stem()
        .ok_or_else(|| miette::miette!("File '{file}' has no name"))?;
    let target = out_root.join(format!("{stem}.cs"));
    fs::write(&target, output)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write '{target}'"))?;
    Ok(target)
}
