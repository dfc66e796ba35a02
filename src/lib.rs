//! swiftpen: a composable builder library for constructing Swift syntax
//! trees and rendering them as formatted source text.
//!
//! Trees are immutable values built bottom-up through the builders in
//! [`ast::builder`], then rendered top-down by [`render::generate`].
//! Construction is the only place anything can fail
//! ([`diagnostics::ConstructionError`]); rendering is total and
//! deterministic. Everything is synchronous, single-threaded, and pure:
//! each call owns its tree and writes its own output buffer, so no locking
//! exists anywhere in the core.

pub use crate::ast::{Node, NodeKind, Pattern};
pub use crate::diagnostics::{ConstructionError, ConstructionErrorKind};
pub use crate::normalize::normalize;
pub use crate::render::generate;

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod fingerprint;
pub mod normalize;
pub mod render;
pub mod validate;
