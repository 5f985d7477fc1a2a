// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! jport command-line interface.
//!
//! This is the main entry point for the `jport` command.

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;

/// jport: port decompiled Java sources to C#
#[derive(Debug, Parser)]
#[command(name = "jport")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Transpile .java source files to C#
    Port {
        /// Source file or directory to transpile
        #[arg(default_value = ".")]
        path: String,

        /// Directory for the generated .cs files
        #[arg(long, default_value = "out")]
        out_dir: String,
    },

    /// Check source files for errors without emitting anything
    Check {
        /// Source file or directory to check
        #[arg(default_value = ".")]
        path: String,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| miette::miette!("failed to initialise logging: {e}"))?;

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Port { path, out_dir } => commands::port::port(&path, &out_dir),
        Command::Check { path } => commands::check::check(&path),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
