// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

pub mod check;
pub mod port;

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;

/// Resolves a path argument to the list of `.java` files to process.
///
/// A file argument must itself be a `.java` file; a directory is searched
/// recursively.
pub fn find_source_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension() == Some("java") {
            files.push(path.to_path_buf());
        } else {
            miette::bail!("File '{path}' is not a .java source file");
        }
    } else if path.is_dir() {
        collect_java_files_recursive(path, &mut files)?;
        files.sort();
    } else {
        miette::bail!("Path '{path}' does not exist");
    }

    Ok(files)
}

/// Recursively collect all `.java` files from a directory tree.
///
/// Symlinks are skipped to avoid potential infinite recursion from circular
/// links.
fn collect_java_files_recursive(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read directory '{dir}'"))?
    {
        let entry = entry.into_diagnostic()?;
        let file_type = entry.file_type().into_diagnostic()?;
        if file_type.is_symlink() {
            continue;
        }
        let entry_path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|_| miette::miette!("Non-UTF-8 path"))?;

        if file_type.is_dir() {
            collect_java_files_recursive(&entry_path, files)?;
        } else if file_type.is_file() && entry_path.extension() == Some("java") {
            files.push(entry_path);
        }
    }
    Ok(())
}
