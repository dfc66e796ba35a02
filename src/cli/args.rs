//! Defines the command-line arguments and subcommands for the swiftpen CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "swiftpen",
    version,
    about = "A composable builder library for generating Swift source text."
)]
pub struct SwiftpenArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a serialized tree to Swift source text.
    Render {
        /// The path to the JSON tree file to render.
        #[arg(required = true)]
        file: PathBuf,
        /// Write the rendered text to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a serialized tree and report the first violation.
    Check {
        /// The path to the JSON tree file to check.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print the deterministic fingerprint of a serialized tree.
    Fingerprint {
        /// The path to the JSON tree file to fingerprint.
        #[arg(required = true)]
        file: PathBuf,
    },
}
