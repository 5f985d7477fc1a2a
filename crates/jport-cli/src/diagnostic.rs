// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics rendering using miette.
//!
//! Core pipeline errors carry byte spans but no source text; attaching a
//! [`miette::NamedSource`] here gives rendered diagnostics their file name,
//! source context lines, and arrows at the offending spans.

use miette::{Diagnostic, NamedSource, Report};
use thiserror::Error;

/// Wraps a pipeline error with the file's name and text so miette can
/// render every labelled span against the source.
pub fn with_source(error: jport_core::Error, path: &str, source: String) -> Report {
    Report::new(error).with_source_code(NamedSource::new(path, source))
}

/// Summary error for a batch run in which some files failed.
///
/// Individual failures are printed as they happen; this is the final
/// non-zero outcome.
#[derive(Debug, Error, Diagnostic)]
#[error("{failed} of {total} file(s) failed")]
#[diagnostic(code(jport::batch))]
pub struct BatchFailure {
    /// Number of files that failed.
    pub failed: usize,
    /// Number of files attempted.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names_the_file() {
        let source = "class A { } }";
        let err = jport_core::transpile(source).unwrap_err();
        let report = with_source(err, "A.java", source.to_string());
        let rendered = format!("{report:?}");
        assert!(rendered.contains("A.java"), "{rendered}");
    }

    #[test]
    fn batch_failure_message() {
        let err = BatchFailure { failed: 2, total: 5 };
        assert_eq!(err.to_string(), "2 of 5 file(s) failed");
    }
}
