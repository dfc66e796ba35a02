//! AST module for swiftpen.
//!
//! This module provides the core syntax-tree types for representing Swift
//! constructs, plus the persistent modifier/attribute chaining operations.
//! Trees are immutable values: composition never mutates an already-built
//! child, and chaining operations return a new node with the modifier set
//! extended, so unmodified subtrees are shared across parents at no cost.

// ============================================================================
// IMPORTS
// ============================================================================

use std::sync::Arc;

use im::Vector;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{ConstructionError, ConstructionErrorKind};

pub mod builder;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Shared-ownership handle for a single child node.
///
/// Single children are held behind `Arc` so that cloning a parent (as every
/// chaining operation does) never deep-copies the subtree beneath it.
pub type NodeRef = Arc<Node>;

/// One element of a syntax tree: a structural kind plus the modifier set,
/// attribute list, and inheritance list attached to it.
///
/// # Examples
///
/// ```rust
/// use swiftpen::ast::builder::variable;
/// let node = variable("total");
/// assert!(node.modifiers.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Ordered, free-form modifier tokens (`public`, `static`, `async`, ...).
    pub modifiers: Vector<String>,
    /// Ordered attribute names, rendered with a leading `@`.
    pub attributes: Vector<String>,
    /// Ordered inherited types; rendered only where a type header exists.
    pub inherits: Vector<String>,
}

/// The closed set of construct kinds a node can be.
///
/// The grammar is fixed, so this is an exhaustively matched sum type rather
/// than an open trait hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Literal(Literal),
    VariableRef {
        name: String,
    },
    Call {
        callee: NodeRef,
        /// Each argument is a `ParameterExpr` node; order is preserved.
        arguments: Vector<Node>,
    },
    /// A call or tuple argument, optionally labeled.
    ParameterExpr {
        label: Option<String>,
        value: NodeRef,
    },
    Infix {
        op: String,
        lhs: NodeRef,
        rhs: NodeRef,
    },
    /// Ternary conditional expression: `condition ? then : else`.
    ConditionalOp {
        condition: NodeRef,
        then_value: NodeRef,
        else_value: NodeRef,
    },
    Tuple {
        elements: Vector<Node>,
    },
    Closure {
        captures: Vector<Capture>,
        parameters: Vector<String>,
        body: Vector<Node>,
    },
    Assignment {
        target: NodeRef,
        value: NodeRef,
    },
    VariableDecl {
        keyword: BindingKeyword,
        name: String,
        type_annotation: Option<String>,
        value: Option<NodeRef>,
    },
    If {
        condition: NodeRef,
        then_body: Vector<Node>,
        else_branch: Option<ElseBranch>,
    },
    Guard {
        condition: NodeRef,
        else_body: Vector<Node>,
    },
    For {
        binding: NodeRef,
        iterable: NodeRef,
        /// Optional `where` filter, evaluated once per iteration.
        filter: Option<NodeRef>,
        body: Vector<Node>,
    },
    Do {
        body: Vector<Node>,
        /// `CatchArm` nodes in declaration order. Order is load-bearing:
        /// first match wins at runtime, so it is never reordered.
        arms: Vector<Node>,
    },
    /// One pattern+body pair of a `do`/`catch` block. A `None` pattern is
    /// the catch-all arm and binds the implicit `error` value.
    CatchArm {
        pattern: Option<Pattern>,
        body: Vector<Node>,
    },
    Throw {
        value: NodeRef,
    },
    FunctionDecl {
        name: String,
        parameters: Vector<Parameter>,
        return_type: Option<String>,
        body: Vector<Node>,
    },
    AggregateDecl {
        keyword: AggregateKeyword,
        name: String,
        members: Vector<Node>,
    },
    Pattern(Pattern),
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Nil,
}

/// The tail of an `if` statement.
///
/// `ElseIf` holds a further `If` node and renders as a flattened
/// `} else if ... {` chain; `Else` is the unconditional trailing body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElseBranch {
    ElseIf(NodeRef),
    Else(Vector<Node>),
}

/// How a closure holds one captured reference. Affects rendering only; the
/// core never evaluates anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureStrength {
    Strong,
    Weak,
    Unowned,
}

/// One entry of a closure capture list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    pub name: String,
    pub strength: CaptureStrength,
}

/// One declared parameter of a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// External argument label; `None` renders as `_`.
    pub label: Option<String>,
    pub name: String,
    pub type_annotation: String,
    pub default_value: Option<NodeRef>,
}

/// `let` vs `var` bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingKeyword {
    Let,
    Var,
}

/// Aggregate declaration keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateKeyword {
    Struct,
    Class,
    Enum,
}

/// Matching patterns, used inside `CatchArm` and `for`-style bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// Binds a single name: renders `let name`.
    Identifier { name: String },
    /// Matches a case tag and binds its associated values in order:
    /// renders `.name(let a, let b)`.
    TaggedCase {
        name: String,
        bindings: Vector<CaseBinding>,
    },
    /// Numeric range: half-open (`lower..<upper`) or closed
    /// (`lower...upper`).
    Range {
        lower: NodeRef,
        upper: NodeRef,
        inclusive: bool,
    },
}

/// One associated-value binding of a tagged-case pattern. The type is
/// carried as construction metadata; only the bound name is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBinding {
    pub name: String,
    pub type_annotation: String,
}

// ============================================================================
// TOKEN VALIDATION
// ============================================================================

/// The access-level tokens the target grammar recognizes.
pub const ACCESS_LEVELS: &[&str] = &[
    "private",
    "fileprivate",
    "internal",
    "package",
    "public",
    "open",
];

/// Attribute names: an identifier, optionally with a parenthesized payload,
/// e.g. `discardableResult` or `available(iOS 15, *)`.
static ATTRIBUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\([^()]*\))?$").expect("static pattern"));

/// Plain identifiers, used for capture and binding names.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"));

pub(crate) fn is_valid_attribute_name(name: &str) -> bool {
    ATTRIBUTE_NAME.is_match(name)
}

pub(crate) fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    /// Wraps a kind into a node with empty modifier, attribute, and
    /// inheritance sets.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            modifiers: Vector::new(),
            attributes: Vector::new(),
            inherits: Vector::new(),
        }
    }

    /// Returns the kind name of this node, for diagnostics and tests.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Literal(_) => "Literal",
            NodeKind::VariableRef { .. } => "VariableRef",
            NodeKind::Call { .. } => "Call",
            NodeKind::ParameterExpr { .. } => "ParameterExpr",
            NodeKind::Infix { .. } => "Infix",
            NodeKind::ConditionalOp { .. } => "ConditionalOp",
            NodeKind::Tuple { .. } => "Tuple",
            NodeKind::Closure { .. } => "Closure",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::VariableDecl { .. } => "VariableDecl",
            NodeKind::If { .. } => "If",
            NodeKind::Guard { .. } => "Guard",
            NodeKind::For { .. } => "For",
            NodeKind::Do { .. } => "Do",
            NodeKind::CatchArm { .. } => "CatchArm",
            NodeKind::Throw { .. } => "Throw",
            NodeKind::FunctionDecl { .. } => "FunctionDecl",
            NodeKind::AggregateDecl { .. } => "AggregateDecl",
            NodeKind::Pattern(_) => "Pattern",
        }
    }

    // ------------------------------------------------------------------------
    // Modifier and attribute chaining
    // ------------------------------------------------------------------------

    /// Returns a new node with the given access-level modifier appended.
    ///
    /// Fails fast if the token is not one of the recognized access levels;
    /// no partial node is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swiftpen::ast::builder::variable;
    /// let public_ref = variable("x").access("public").unwrap();
    /// assert!(public_ref.modifiers.contains(&"public".to_string()));
    /// assert!(variable("x").access("protected").is_err());
    /// ```
    pub fn access(&self, level: &str) -> Result<Node, ConstructionError> {
        if !ACCESS_LEVELS.contains(&level) {
            return Err(ConstructionError::new(
                ConstructionErrorKind::UnknownAccessLevel {
                    token: level.to_string(),
                },
                self.kind_name(),
            ));
        }
        Ok(self.with_modifier(level))
    }

    /// Returns a new node marked `throws`, optionally with a typed error:
    /// `throws(SomeError)`.
    ///
    /// Unusual combinations (a throwing tuple, say) are permitted; the
    /// renderer emits whatever modifiers are present.
    pub fn throws(&self, error_type: Option<&str>) -> Node {
        match error_type {
            Some(ty) => self.with_modifier(&format!("throws({ty})")),
            None => self.with_modifier("throws"),
        }
    }

    /// Returns a new node marked `async`.
    pub fn asynchronous(&self) -> Node {
        self.with_modifier("async")
    }

    /// Returns a new node marked `static`.
    pub fn static_member(&self) -> Node {
        self.with_modifier("static")
    }

    /// Returns a new node with an arbitrary modifier token appended.
    /// Modifiers are free-form; semantic validity is the caller's business.
    pub fn with_modifier(&self, token: &str) -> Node {
        let mut node = self.clone();
        node.modifiers.push_back(token.to_string());
        node
    }

    /// Returns a new node with the attribute appended.
    ///
    /// Fails fast on a malformed attribute name (must be an identifier with
    /// an optional parenthesized payload, written without the leading `@`).
    pub fn attribute(&self, name: &str) -> Result<Node, ConstructionError> {
        if !is_valid_attribute_name(name) {
            return Err(ConstructionError::new(
                ConstructionErrorKind::MalformedAttribute {
                    name: name.to_string(),
                },
                self.kind_name(),
            ));
        }
        let mut node = self.clone();
        node.attributes.push_back(name.to_string());
        Ok(node)
    }

    /// Returns a new node with an inherited type appended. Rendered only
    /// where the grammar has a type header (aggregate declarations).
    pub fn inherits(&self, type_name: &str) -> Node {
        let mut node = self.clone();
        node.inherits.push_back(type_name.to_string());
        node
    }

    // ------------------------------------------------------------------------
    // If-chain composition
    // ------------------------------------------------------------------------

    /// Attaches an `else if` branch to the innermost unterminated `if` of
    /// this chain, returning the extended chain. Has no effect on nodes
    /// that are not `if` statements.
    pub fn else_if(&self, condition: Node, body: impl FnOnce() -> Vec<Node>) -> Node {
        let tail = Node::new(NodeKind::If {
            condition: Arc::new(condition),
            then_body: Vector::from(body()),
            else_branch: None,
        });
        self.attach_else(ElseBranch::ElseIf(Arc::new(tail)))
    }

    /// Attaches a trailing unconditional `else` body to the innermost
    /// unterminated `if` of this chain. Has no effect on nodes that are not
    /// `if` statements.
    pub fn else_block(&self, body: impl FnOnce() -> Vec<Node>) -> Node {
        self.attach_else(ElseBranch::Else(Vector::from(body())))
    }

    fn attach_else(&self, branch: ElseBranch) -> Node {
        let NodeKind::If {
            condition,
            then_body,
            else_branch,
        } = &self.kind
        else {
            return self.clone();
        };
        let extended = match else_branch {
            // Descend into the existing else-if tail so the chain stays flat.
            Some(ElseBranch::ElseIf(inner)) => {
                Some(ElseBranch::ElseIf(Arc::new(inner.attach_else(branch))))
            }
            // Replacing a terminal else is caller responsibility.
            _ => Some(branch),
        };
        let mut node = self.clone();
        node.kind = NodeKind::If {
            condition: condition.clone(),
            then_body: then_body.clone(),
            else_branch: extended,
        };
        node
    }
}
