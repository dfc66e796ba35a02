//! swiftpen error handling.
//!
//! The core produces exactly one error kind: [`ConstructionError`], raised
//! synchronously by a builder call handed an invalid modifier, attribute,
//! or pattern configuration. There is no render-time error: rendering is
//! total over any tree that completed construction, so all validation
//! lives at the construction boundary.

use std::fmt;

use miette::Diagnostic;

/// The single error type of the core.
///
/// Carries what went wrong plus the construct the failing builder call was
/// producing, which is the best location context available before any
/// source text exists. Propagates immediately to the direct caller; no
/// retries (construction is cheap, deterministic, and pure).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionError {
    pub kind: ConstructionErrorKind,
    /// Kind name of the node the failing call was building.
    pub construct: &'static str,
}

/// Everything a builder call can reject.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionErrorKind {
    /// An access-level token outside the recognized set.
    UnknownAccessLevel { token: String },
    /// An attribute name that is not an identifier with an optional
    /// parenthesized payload.
    MalformedAttribute { name: String },
    /// A pattern or case-tag name that is not a plain identifier.
    MalformedBinding { name: String },
    /// A closure capture name that is not a plain identifier.
    InvalidCaptureName { name: String },
}

impl ConstructionError {
    pub fn new(kind: ConstructionErrorKind, construct: &'static str) -> Self {
        Self { kind, construct }
    }

    /// Error-code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self.kind {
            ConstructionErrorKind::UnknownAccessLevel { .. } => "unknown_access_level",
            ConstructionErrorKind::MalformedAttribute { .. } => "malformed_attribute",
            ConstructionErrorKind::MalformedBinding { .. } => "malformed_binding",
            ConstructionErrorKind::InvalidCaptureName { .. } => "invalid_capture_name",
        }
    }
}

impl std::error::Error for ConstructionError {}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstructionErrorKind::UnknownAccessLevel { token } => {
                write!(
                    f,
                    "Construction error: unknown access level '{}' on {}",
                    token, self.construct
                )
            }
            ConstructionErrorKind::MalformedAttribute { name } => {
                write!(
                    f,
                    "Construction error: malformed attribute name '{}' on {}",
                    name, self.construct
                )
            }
            ConstructionErrorKind::MalformedBinding { name } => {
                write!(
                    f,
                    "Construction error: malformed binding name '{}' in {}",
                    name, self.construct
                )
            }
            ConstructionErrorKind::InvalidCaptureName { name } => {
                write!(
                    f,
                    "Construction error: invalid capture name '{}' in {}",
                    name, self.construct
                )
            }
        }
    }
}

impl Diagnostic for ConstructionError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("swiftpen::construction::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match self.kind {
            ConstructionErrorKind::UnknownAccessLevel { .. } => {
                "recognized access levels are: private, fileprivate, internal, package, public, open"
            }
            ConstructionErrorKind::MalformedAttribute { .. } => {
                "attribute names are written without the leading '@': an identifier plus an optional parenthesized payload, e.g. available(iOS 15, *)"
            }
            ConstructionErrorKind::MalformedBinding { .. }
            | ConstructionErrorKind::InvalidCaptureName { .. } => {
                "names must be plain identifiers: a letter or underscore followed by letters, digits, or underscores"
            }
        };
        Some(Box::new(help.to_string()))
    }
}

/// Prints a construction error with full miette diagnostics.
///
/// Rich user-facing display for CLI contexts; library callers usually
/// propagate the error instead.
pub fn print_error(error: ConstructionError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
