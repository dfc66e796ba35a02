//! Construction API: one builder per node kind.
//!
//! Builders are pure, stateless constructors. Body-taking builders accept a
//! callback producing an ordered `Vec<Node>`; the callback is evaluated
//! eagerly exactly once, and the written order is preserved verbatim with
//! no reordering, deduplication, or laziness.
//!
//! Validation happens here and only here: a malformed name fails the call
//! with a [`ConstructionError`] before any node exists. Rendering is total
//! over everything these builders return.

use std::sync::Arc;

use im::Vector;

use crate::ast::{
    is_valid_identifier, AggregateKeyword, BindingKeyword, Capture, CaptureStrength, CaseBinding,
    ElseBranch, Literal, Node, NodeKind, Parameter, Pattern,
};
use crate::diagnostics::{ConstructionError, ConstructionErrorKind};

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// Integer literal.
pub fn int(value: i64) -> Node {
    Node::new(NodeKind::Literal(Literal::Int(value)))
}

/// Floating-point literal.
pub fn float(value: f64) -> Node {
    Node::new(NodeKind::Literal(Literal::Float(value)))
}

/// String literal. The renderer handles quoting and escaping.
pub fn string(value: impl Into<String>) -> Node {
    Node::new(NodeKind::Literal(Literal::String(value.into())))
}

/// Boolean literal.
pub fn boolean(value: bool) -> Node {
    Node::new(NodeKind::Literal(Literal::Bool(value)))
}

/// The `nil` literal.
pub fn nil() -> Node {
    Node::new(NodeKind::Literal(Literal::Nil))
}

/// Reference to a variable or function by name.
///
/// # Examples
///
/// ```rust
/// use swiftpen::ast::builder::variable;
/// use swiftpen::render::generate;
/// assert_eq!(generate(&variable("count")), "count\n");
/// ```
pub fn variable(name: impl Into<String>) -> Node {
    Node::new(NodeKind::VariableRef { name: name.into() })
}

/// Call of a named function. Arguments that are not already
/// `ParameterExpr` nodes are wrapped as unlabeled arguments.
pub fn call(function: impl Into<String>, arguments: Vec<Node>) -> Node {
    call_expr(variable(function), arguments)
}

/// Call of an arbitrary callee expression (e.g. a member access).
pub fn call_expr(callee: Node, arguments: Vec<Node>) -> Node {
    let arguments = arguments.into_iter().map(into_argument).collect();
    Node::new(NodeKind::Call {
        callee: Arc::new(callee),
        arguments,
    })
}

fn into_argument(node: Node) -> Node {
    match node.kind {
        NodeKind::ParameterExpr { .. } => node,
        _ => Node::new(NodeKind::ParameterExpr {
            label: None,
            value: Arc::new(node),
        }),
    }
}

/// Unlabeled call argument.
pub fn arg(value: Node) -> Node {
    Node::new(NodeKind::ParameterExpr {
        label: None,
        value: Arc::new(value),
    })
}

/// Labeled call argument: renders `label: value`.
pub fn labeled_arg(label: impl Into<String>, value: Node) -> Node {
    Node::new(NodeKind::ParameterExpr {
        label: Some(label.into()),
        value: Arc::new(value),
    })
}

/// Member access: renders `base.name`.
///
/// Member access is modeled as an `Infix` node with the `.` operator; the
/// renderer emits it without surrounding spaces.
pub fn member(base: Node, name: impl Into<String>) -> Node {
    infix(base, ".", variable(name))
}

/// Infix operator expression: renders `lhs op rhs`.
pub fn infix(lhs: Node, op: impl Into<String>, rhs: Node) -> Node {
    Node::new(NodeKind::Infix {
        op: op.into(),
        lhs: Arc::new(lhs),
        rhs: Arc::new(rhs),
    })
}

/// Ternary conditional: renders `condition ? then : else`.
pub fn ternary(condition: Node, then_value: Node, else_value: Node) -> Node {
    Node::new(NodeKind::ConditionalOp {
        condition: Arc::new(condition),
        then_value: Arc::new(then_value),
        else_value: Arc::new(else_value),
    })
}

/// Tuple expression. Elements may be labeled via [`labeled_arg`].
pub fn tuple(elements: Vec<Node>) -> Node {
    Node::new(NodeKind::Tuple {
        elements: Vector::from(elements),
    })
}

/// Closure with a capture list, parameter names, and a statement body.
///
/// The capture list renders bracketed only when non-empty; attributes
/// chained onto the node precede the capture/parameter header.
pub fn closure(
    captures: Vec<Capture>,
    parameters: Vec<&str>,
    body: impl FnOnce() -> Vec<Node>,
) -> Node {
    Node::new(NodeKind::Closure {
        captures: Vector::from(captures),
        parameters: parameters.into_iter().map(String::from).collect(),
        body: Vector::from(body()),
    })
}

/// Capture with an explicit strength. The name must be a plain identifier.
pub fn capture(name: &str, strength: CaptureStrength) -> Result<Capture, ConstructionError> {
    if !is_valid_identifier(name) {
        return Err(ConstructionError::new(
            ConstructionErrorKind::InvalidCaptureName {
                name: name.to_string(),
            },
            "Closure",
        ));
    }
    Ok(Capture {
        name: name.to_string(),
        strength,
    })
}

/// Weak capture: renders `weak name` inside the capture list.
pub fn weak(name: &str) -> Result<Capture, ConstructionError> {
    capture(name, CaptureStrength::Weak)
}

/// Unowned capture: renders `unowned name` inside the capture list.
pub fn unowned(name: &str) -> Result<Capture, ConstructionError> {
    capture(name, CaptureStrength::Unowned)
}

/// Strong capture: renders as the bare name inside the capture list.
pub fn strong(name: &str) -> Result<Capture, ConstructionError> {
    capture(name, CaptureStrength::Strong)
}

// ============================================================================
// PATTERNS
// ============================================================================

/// Identifier-binding pattern: renders `let name`.
pub fn bind(name: &str) -> Result<Pattern, ConstructionError> {
    if !is_valid_identifier(name) {
        return Err(ConstructionError::new(
            ConstructionErrorKind::MalformedBinding {
                name: name.to_string(),
            },
            "Pattern",
        ));
    }
    Ok(Pattern::Identifier {
        name: name.to_string(),
    })
}

/// Tagged-case pattern with optional named associated-value bindings:
/// renders `.name(let a, let b)`. Each binding pairs a name with its type;
/// the type is metadata and is not rendered.
pub fn tagged_case(
    name: &str,
    bindings: Vec<(&str, &str)>,
) -> Result<Pattern, ConstructionError> {
    if !is_valid_identifier(name) {
        return Err(ConstructionError::new(
            ConstructionErrorKind::MalformedBinding {
                name: name.to_string(),
            },
            "Pattern",
        ));
    }
    let mut bound = Vector::new();
    for (binding_name, type_annotation) in bindings {
        if !is_valid_identifier(binding_name) {
            return Err(ConstructionError::new(
                ConstructionErrorKind::MalformedBinding {
                    name: binding_name.to_string(),
                },
                "Pattern",
            ));
        }
        bound.push_back(CaseBinding {
            name: binding_name.to_string(),
            type_annotation: type_annotation.to_string(),
        });
    }
    Ok(Pattern::TaggedCase {
        name: name.to_string(),
        bindings: bound,
    })
}

/// Half-open range pattern: renders `lower..<upper`.
pub fn range(lower: Node, upper: Node) -> Pattern {
    Pattern::Range {
        lower: Arc::new(lower),
        upper: Arc::new(upper),
        inclusive: false,
    }
}

/// Closed range pattern: renders `lower...upper`.
pub fn closed_range(lower: Node, upper: Node) -> Pattern {
    Pattern::Range {
        lower: Arc::new(lower),
        upper: Arc::new(upper),
        inclusive: true,
    }
}

/// Wraps a pattern into a node so it can stand in binding positions.
pub fn pattern(pattern: Pattern) -> Node {
    Node::new(NodeKind::Pattern(pattern))
}

// ============================================================================
// STATEMENTS AND CONTROL FLOW
// ============================================================================

/// Assignment statement: renders `target = value`.
pub fn assign(target: Node, value: Node) -> Node {
    Node::new(NodeKind::Assignment {
        target: Arc::new(target),
        value: Arc::new(value),
    })
}

/// Immutable binding: renders `let name = value`.
pub fn let_decl(name: impl Into<String>, value: Node) -> Node {
    variable_decl(BindingKeyword::Let, name, None, Some(value))
}

/// Mutable binding: renders `var name = value`.
pub fn var_decl(name: impl Into<String>, value: Node) -> Node {
    variable_decl(BindingKeyword::Var, name, None, Some(value))
}

/// Fully general variable declaration with optional type annotation and
/// optional initializer.
pub fn variable_decl(
    keyword: BindingKeyword,
    name: impl Into<String>,
    type_annotation: Option<&str>,
    value: Option<Node>,
) -> Node {
    Node::new(NodeKind::VariableDecl {
        keyword,
        name: name.into(),
        type_annotation: type_annotation.map(String::from),
        value: value.map(Arc::new),
    })
}

/// `if` statement. Chain `else if` / `else` tails with [`Node::else_if`]
/// and [`Node::else_block`].
///
/// # Examples
///
/// ```rust
/// use swiftpen::ast::builder::{boolean, call, if_block, string};
/// let stmt = if_block(boolean(true), || vec![call("print", vec![string("hi")])])
///     .else_block(|| vec![call("print", vec![string("bye")])]);
/// let text = swiftpen::render::generate(&stmt);
/// assert!(text.contains("} else {"));
/// ```
pub fn if_block(condition: Node, then_body: impl FnOnce() -> Vec<Node>) -> Node {
    Node::new(NodeKind::If {
        condition: Arc::new(condition),
        then_body: Vector::from(then_body()),
        else_branch: None,
    })
}

/// `if`/`else` in one call, for the common two-branch shape.
pub fn if_else(
    condition: Node,
    then_body: impl FnOnce() -> Vec<Node>,
    else_body: impl FnOnce() -> Vec<Node>,
) -> Node {
    Node::new(NodeKind::If {
        condition: Arc::new(condition),
        then_body: Vector::from(then_body()),
        else_branch: Some(ElseBranch::Else(Vector::from(else_body()))),
    })
}

/// `guard condition else { ... }`.
pub fn guard_else(condition: Node, else_body: impl FnOnce() -> Vec<Node>) -> Node {
    Node::new(NodeKind::Guard {
        condition: Arc::new(condition),
        else_body: Vector::from(else_body()),
    })
}

/// `for binding in iterable { ... }` with no filter clause.
pub fn for_in(binding: Node, iterable: Node, body: impl FnOnce() -> Vec<Node>) -> Node {
    Node::new(NodeKind::For {
        binding: Arc::new(binding),
        iterable: Arc::new(iterable),
        filter: None,
        body: Vector::from(body()),
    })
}

/// `for binding in iterable where filter { ... }`. The filter is evaluated
/// once per iteration before the body runs.
pub fn for_in_where(
    binding: Node,
    iterable: Node,
    filter: Node,
    body: impl FnOnce() -> Vec<Node>,
) -> Node {
    Node::new(NodeKind::For {
        binding: Arc::new(binding),
        iterable: Arc::new(iterable),
        filter: Some(Arc::new(filter)),
        body: Vector::from(body()),
    })
}

/// `do { ... }` with an ordered list of catch arms. Arms render in the
/// order given here; first match wins at runtime, so the renderer never
/// reorders or deduplicates them.
pub fn do_catch(body: impl FnOnce() -> Vec<Node>, arms: Vec<Node>) -> Node {
    Node::new(NodeKind::Do {
        body: Vector::from(body()),
        arms: Vector::from(arms),
    })
}

/// Catch arm matching a pattern. Names bound by the pattern are usable
/// inside this arm's body only.
pub fn catch_arm(pattern: Pattern, body: impl FnOnce() -> Vec<Node>) -> Node {
    Node::new(NodeKind::CatchArm {
        pattern: Some(pattern),
        body: Vector::from(body()),
    })
}

/// Catch-all arm: matches anything and binds the implicit `error` value.
pub fn catch_all(body: impl FnOnce() -> Vec<Node>) -> Node {
    Node::new(NodeKind::CatchArm {
        pattern: None,
        body: Vector::from(body()),
    })
}

/// `throw value`.
pub fn throw(value: Node) -> Node {
    Node::new(NodeKind::Throw {
        value: Arc::new(value),
    })
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Function declaration. Modifiers (`access`, `asynchronous`, `throws`,
/// `static_member`) and attributes chain onto the returned node.
pub fn function(
    name: impl Into<String>,
    parameters: Vec<Parameter>,
    return_type: Option<&str>,
    body: impl FnOnce() -> Vec<Node>,
) -> Node {
    Node::new(NodeKind::FunctionDecl {
        name: name.into(),
        parameters: Vector::from(parameters),
        return_type: return_type.map(String::from),
        body: Vector::from(body()),
    })
}

/// Labeled function parameter: renders `label name: Type`.
pub fn param(label: &str, name: &str, type_annotation: &str) -> Parameter {
    Parameter {
        label: Some(label.to_string()),
        name: name.to_string(),
        type_annotation: type_annotation.to_string(),
        default_value: None,
    }
}

/// Unlabeled function parameter: renders `_ name: Type`.
pub fn unlabeled_param(name: &str, type_annotation: &str) -> Parameter {
    Parameter {
        label: None,
        name: name.to_string(),
        type_annotation: type_annotation.to_string(),
        default_value: None,
    }
}

/// Parameter with a default value: renders `label name: Type = default`.
pub fn param_with_default(
    label: &str,
    name: &str,
    type_annotation: &str,
    default_value: Node,
) -> Parameter {
    Parameter {
        label: Some(label.to_string()),
        name: name.to_string(),
        type_annotation: type_annotation.to_string(),
        default_value: Some(Arc::new(default_value)),
    }
}

/// Aggregate type declaration. Inherited types chain on via
/// [`Node::inherits`].
pub fn aggregate(
    keyword: AggregateKeyword,
    name: impl Into<String>,
    members: impl FnOnce() -> Vec<Node>,
) -> Node {
    Node::new(NodeKind::AggregateDecl {
        keyword,
        name: name.into(),
        members: Vector::from(members()),
    })
}

/// `struct` declaration.
pub fn struct_decl(name: impl Into<String>, members: impl FnOnce() -> Vec<Node>) -> Node {
    aggregate(AggregateKeyword::Struct, name, members)
}

/// `class` declaration.
pub fn class_decl(name: impl Into<String>, members: impl FnOnce() -> Vec<Node>) -> Node {
    aggregate(AggregateKeyword::Class, name, members)
}

/// `enum` declaration.
pub fn enum_decl(name: impl Into<String>, members: impl FnOnce() -> Vec<Node>) -> Node {
    aggregate(AggregateKeyword::Enum, name, members)
}
