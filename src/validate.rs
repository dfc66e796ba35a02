//! Tree re-validation.
//!
//! Trees built through the construction API are valid by construction, but
//! trees deserialized from JSON bypass that boundary. [`validate`] re-runs
//! the same token checks over a whole tree, failing on the first violation.
//! Pure: never mutates its input.

use crate::ast::{is_valid_attribute_name, is_valid_identifier, Node, NodeKind, Pattern};
use crate::diagnostics::{ConstructionError, ConstructionErrorKind};

/// Checks every node of the tree against the construction-boundary rules.
pub fn validate(tree: &Node) -> Result<(), ConstructionError> {
    for attr in &tree.attributes {
        if !is_valid_attribute_name(attr) {
            return Err(ConstructionError::new(
                ConstructionErrorKind::MalformedAttribute { name: attr.clone() },
                tree.kind_name(),
            ));
        }
    }
    match &tree.kind {
        NodeKind::Closure { captures, body, .. } => {
            for capture in captures {
                if !is_valid_identifier(&capture.name) {
                    return Err(ConstructionError::new(
                        ConstructionErrorKind::InvalidCaptureName {
                            name: capture.name.clone(),
                        },
                        tree.kind_name(),
                    ));
                }
            }
            for stmt in body {
                validate(stmt)?;
            }
            Ok(())
        }
        NodeKind::CatchArm { pattern, body } => {
            if let Some(pattern) = pattern {
                validate_pattern(pattern)?;
            }
            for stmt in body {
                validate(stmt)?;
            }
            Ok(())
        }
        NodeKind::Pattern(pattern) => validate_pattern(pattern),
        _ => {
            for child in children(tree) {
                validate(&child)?;
            }
            Ok(())
        }
    }
}

fn validate_pattern(pattern: &Pattern) -> Result<(), ConstructionError> {
    match pattern {
        Pattern::Identifier { name } => check_identifier(name),
        Pattern::TaggedCase { name, bindings } => {
            check_identifier(name)?;
            for binding in bindings {
                check_identifier(&binding.name)?;
            }
            Ok(())
        }
        Pattern::Range { lower, upper, .. } => {
            validate(lower)?;
            validate(upper)
        }
    }
}

fn check_identifier(name: &str) -> Result<(), ConstructionError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ConstructionError::new(
            ConstructionErrorKind::MalformedBinding {
                name: name.to_string(),
            },
            "Pattern",
        ))
    }
}

/// Collects the direct child nodes of a node, in composition order.
fn children(node: &Node) -> Vec<Node> {
    use crate::ast::ElseBranch;
    match &node.kind {
        NodeKind::Literal(_) | NodeKind::VariableRef { .. } => vec![],
        NodeKind::Call { callee, arguments } => {
            let mut out = vec![(**callee).clone()];
            out.extend(arguments.iter().cloned());
            out
        }
        NodeKind::ParameterExpr { value, .. } => vec![(**value).clone()],
        NodeKind::Infix { lhs, rhs, .. } => vec![(**lhs).clone(), (**rhs).clone()],
        NodeKind::ConditionalOp {
            condition,
            then_value,
            else_value,
        } => vec![
            (**condition).clone(),
            (**then_value).clone(),
            (**else_value).clone(),
        ],
        NodeKind::Tuple { elements } => elements.iter().cloned().collect(),
        NodeKind::Closure { body, .. } => body.iter().cloned().collect(),
        NodeKind::Assignment { target, value } => vec![(**target).clone(), (**value).clone()],
        NodeKind::VariableDecl { value, .. } => {
            value.iter().map(|v| (**v).clone()).collect()
        }
        NodeKind::If {
            condition,
            then_body,
            else_branch,
        } => {
            let mut out = vec![(**condition).clone()];
            out.extend(then_body.iter().cloned());
            match else_branch {
                Some(ElseBranch::ElseIf(inner)) => out.push((**inner).clone()),
                Some(ElseBranch::Else(body)) => out.extend(body.iter().cloned()),
                None => {}
            }
            out
        }
        NodeKind::Guard {
            condition,
            else_body,
        } => {
            let mut out = vec![(**condition).clone()];
            out.extend(else_body.iter().cloned());
            out
        }
        NodeKind::For {
            binding,
            iterable,
            filter,
            body,
        } => {
            let mut out = vec![(**binding).clone(), (**iterable).clone()];
            if let Some(filter) = filter {
                out.push((**filter).clone());
            }
            out.extend(body.iter().cloned());
            out
        }
        NodeKind::Do { body, arms } => {
            let mut out: Vec<Node> = body.iter().cloned().collect();
            out.extend(arms.iter().cloned());
            out
        }
        NodeKind::CatchArm { body, .. } => body.iter().cloned().collect(),
        NodeKind::Throw { value } => vec![(**value).clone()],
        NodeKind::FunctionDecl {
            parameters, body, ..
        } => {
            let mut out: Vec<Node> = parameters
                .iter()
                .filter_map(|p| p.default_value.as_ref().map(|d| (**d).clone()))
                .collect();
            out.extend(body.iter().cloned());
            out
        }
        NodeKind::AggregateDecl { members, .. } => members.iter().cloned().collect(),
        NodeKind::Pattern(_) => vec![],
    }
}
