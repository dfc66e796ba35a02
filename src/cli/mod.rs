//! The swiftpen command-line interface.
//!
//! A thin host around the core: it reads a serialized tree from a file,
//! re-validates it (deserialization bypasses the construction boundary),
//! and writes `generate`'s output. A construction failure is reported with
//! a full miette diagnostic and a non-zero exit status; rendering itself
//! never fails.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use thiserror::Error;

use crate::ast::Node;
use crate::cli::args::{Command, SwiftpenArgs};
use crate::diagnostics::print_error;
use crate::fingerprint::fingerprint;
use crate::render::generate;
use crate::validate::validate;

pub mod args;
pub mod output;

/// Everything the host can fail on. The core contributes only
/// `Construction`; the rest is I/O and input-format trouble.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid tree: {source}")]
    ParseTree {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Construction(#[from] crate::diagnostics::ConstructionError),
    #[error("cannot write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write to stdout: {source}")]
    WriteStdout {
        #[source]
        source: std::io::Error,
    },
}

/// The main entry point for the CLI.
pub fn run() {
    let args = SwiftpenArgs::parse();

    let result = match args.command {
        Command::Render { file, output } => handle_render(&file, output.as_deref()),
        Command::Check { file } => handle_check(&file),
        Command::Fingerprint { file } => handle_fingerprint(&file),
    };

    if let Err(e) = result {
        match e {
            // Construction errors carry miette diagnostics; give them the
            // full fancy report.
            HostError::Construction(inner) => print_error(inner),
            other => eprintln!("Error: {other}"),
        }
        process::exit(1);
    }
}

/// Handles the `render` subcommand.
fn handle_render(path: &Path, output_path: Option<&Path>) -> Result<(), HostError> {
    let tree = load_tree(path)?;
    validate(&tree)?;
    let text = generate(&tree);
    output::write_rendered(&text, output_path)
}

/// Handles the `check` subcommand.
fn handle_check(path: &Path) -> Result<(), HostError> {
    let tree = load_tree(path)?;
    validate(&tree)?;
    println!("{} ok", path.display());
    Ok(())
}

/// Handles the `fingerprint` subcommand.
fn handle_fingerprint(path: &Path) -> Result<(), HostError> {
    let tree = load_tree(path)?;
    validate(&tree)?;
    println!("{}", fingerprint(&tree));
    Ok(())
}

fn load_tree(path: &Path) -> Result<Node, HostError> {
    let source = fs::read_to_string(path).map_err(|source| HostError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| HostError::ParseTree {
        path: path.to_path_buf(),
        source,
    })
}
