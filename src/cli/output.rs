//! Output helpers for the swiftpen CLI.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::HostError;

/// Writes rendered text to the given file, or to stdout when no file was
/// requested. The text is written verbatim; the renderer's output is the
/// shipped form.
pub fn write_rendered(text: &str, output: Option<&Path>) -> Result<(), HostError> {
    match output {
        Some(path) => fs::write(path, text).map_err(|source| HostError::WriteOutput {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .map_err(|source| HostError::WriteStdout { source })
        }
    }
}
