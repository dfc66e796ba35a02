//! Renderer: depth-first traversal of a syntax tree into indented source
//! text.
//!
//! [`generate`] is the single rendering entry point. It is total over any
//! successfully constructed tree (validation happens at the construction
//! boundary, so nothing here can fail) and deterministic: the same tree
//! always yields byte-identical text. Child order is emitted exactly as
//! composed; in particular catch arms encode first-match-wins semantics
//! and are never reordered or deduplicated.

use im::Vector;

use crate::ast::{
    AggregateKeyword, BindingKeyword, CaptureStrength, ElseBranch, Literal, Node, NodeKind,
    Parameter, Pattern,
};

const INDENT: &str = "    ";

/// Renders a tree into formatted source text.
///
/// # Examples
///
/// ```rust
/// use swiftpen::ast::builder::{call, string};
/// use swiftpen::render::generate;
/// let stmt = call("print", vec![string("hello")]);
/// assert_eq!(generate(&stmt), "print(\"hello\")\n");
/// ```
pub fn generate(tree: &Node) -> String {
    let mut renderer = Renderer::new();
    renderer.emit_stmt(tree);
    renderer.buf
}

struct Renderer {
    buf: String,
    indent: usize,
}

impl Renderer {
    fn new() -> Self {
        Self::with_indent(0)
    }

    fn with_indent(indent: usize) -> Self {
        Self {
            buf: String::new(),
            indent,
        }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push_str(INDENT);
        }
    }

    /// Emits a block body one level deeper.
    fn emit_body(&mut self, body: &Vector<Node>) {
        self.indent += 1;
        for stmt in body {
            self.emit_stmt(stmt);
        }
        self.indent -= 1;
    }

    /// Attribute and modifier prefix for statement positions.
    fn emit_decoration(&mut self, node: &Node) {
        let deco = decoration(node);
        self.write(&deco);
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_stmt(&mut self, node: &Node) {
        match &node.kind {
            // Expression kinds at statement position render as one line.
            NodeKind::Literal(_)
            | NodeKind::VariableRef { .. }
            | NodeKind::Call { .. }
            | NodeKind::ParameterExpr { .. }
            | NodeKind::Infix { .. }
            | NodeKind::ConditionalOp { .. }
            | NodeKind::Tuple { .. }
            | NodeKind::Closure { .. } => {
                self.write_indent();
                let text = self.expr(node);
                self.write(&text);
                self.newline();
            }
            NodeKind::Pattern(pattern) => {
                self.write_indent();
                let text = self.pattern_text(pattern);
                self.write(&text);
                self.newline();
            }
            NodeKind::Assignment { target, value } => {
                self.write_indent();
                self.emit_decoration(node);
                let line = format!("{} = {}", self.expr(target), self.expr(value));
                self.write(&line);
                self.newline();
            }
            NodeKind::VariableDecl {
                keyword,
                name,
                type_annotation,
                value,
            } => {
                self.write_indent();
                self.emit_decoration(node);
                let kw = match keyword {
                    BindingKeyword::Let => "let",
                    BindingKeyword::Var => "var",
                };
                let mut line = format!("{kw} {name}");
                if let Some(ty) = type_annotation {
                    line.push_str(&format!(": {ty}"));
                }
                if let Some(value) = value {
                    line.push_str(&format!(" = {}", self.expr(value)));
                }
                self.write(&line);
                self.newline();
            }
            NodeKind::If {
                condition,
                then_body,
                else_branch,
            } => {
                self.write_indent();
                self.emit_decoration(node);
                self.emit_if(condition, then_body, else_branch.as_ref());
            }
            NodeKind::Guard {
                condition,
                else_body,
            } => {
                self.write_indent();
                self.emit_decoration(node);
                let head = format!("guard {} else {{", self.expr(condition));
                self.write(&head);
                self.newline();
                self.emit_body(else_body);
                self.write_indent();
                self.write("}");
                self.newline();
            }
            NodeKind::For {
                binding,
                iterable,
                filter,
                body,
            } => {
                self.write_indent();
                self.emit_decoration(node);
                let mut head = format!("for {} in {}", self.expr(binding), self.expr(iterable));
                if let Some(filter) = filter {
                    head.push_str(&format!(" where {}", self.expr(filter)));
                }
                head.push_str(" {");
                self.write(&head);
                self.newline();
                self.emit_body(body);
                self.write_indent();
                self.write("}");
                self.newline();
            }
            NodeKind::Do { body, arms } => {
                self.write_indent();
                self.emit_decoration(node);
                self.write("do {");
                self.newline();
                self.emit_body(body);
                self.write_indent();
                self.write("}");
                // Arms continue from the closing brace, in declaration
                // order. First match wins; never reorder.
                for arm in arms {
                    self.emit_catch_tail(arm);
                }
                self.newline();
            }
            NodeKind::CatchArm { pattern, body } => {
                // In isolation, an arm is still a valid fragment.
                self.write_indent();
                match pattern {
                    Some(pattern) => {
                        let text = self.pattern_text(pattern);
                        let head = format!("catch {text} {{");
                        self.write(&head);
                    }
                    None => self.write("catch {"),
                }
                self.newline();
                self.emit_body(body);
                self.write_indent();
                self.write("}");
                self.newline();
            }
            NodeKind::Throw { value } => {
                self.write_indent();
                self.emit_decoration(node);
                let line = format!("throw {}", self.expr(value));
                self.write(&line);
                self.newline();
            }
            NodeKind::FunctionDecl {
                name,
                parameters,
                return_type,
                body,
            } => {
                self.emit_function(node, name, parameters, return_type.as_deref(), body);
            }
            NodeKind::AggregateDecl {
                keyword,
                name,
                members,
            } => {
                self.write_indent();
                self.emit_decoration(node);
                let kw = match keyword {
                    AggregateKeyword::Struct => "struct",
                    AggregateKeyword::Class => "class",
                    AggregateKeyword::Enum => "enum",
                };
                let mut head = format!("{kw} {name}");
                if !node.inherits.is_empty() {
                    let types: Vec<&str> = node.inherits.iter().map(String::as_str).collect();
                    head.push_str(&format!(": {}", types.join(", ")));
                }
                head.push_str(" {");
                self.write(&head);
                self.newline();
                self.emit_body(members);
                self.write_indent();
                self.write("}");
                self.newline();
            }
        }
    }

    /// Emits an if/else-if/else chain as a single flattened tail: each
    /// `else if` continues on the closing brace of the previous block
    /// instead of opening a nested one.
    fn emit_if(
        &mut self,
        condition: &Node,
        then_body: &Vector<Node>,
        else_branch: Option<&ElseBranch>,
    ) {
        let head = format!("if {} {{", self.expr(condition));
        self.write(&head);
        self.newline();
        self.emit_body(then_body);

        let mut tail = else_branch.cloned();
        loop {
            match tail {
                None => {
                    self.write_indent();
                    self.write("}");
                    self.newline();
                    return;
                }
                Some(ElseBranch::Else(body)) => {
                    self.write_indent();
                    self.write("} else {");
                    self.newline();
                    self.emit_body(&body);
                    self.write_indent();
                    self.write("}");
                    self.newline();
                    return;
                }
                Some(ElseBranch::ElseIf(next)) => {
                    if let NodeKind::If {
                        condition,
                        then_body,
                        else_branch,
                    } = &next.kind
                    {
                        self.write_indent();
                        let head = format!("}} else if {} {{", self.expr(condition));
                        self.write(&head);
                        self.newline();
                        self.emit_body(then_body);
                        tail = else_branch.clone();
                    } else {
                        // A non-if tail still closes the chain as a plain
                        // else block.
                        self.write_indent();
                        self.write("} else {");
                        self.newline();
                        self.indent += 1;
                        self.emit_stmt(&next);
                        self.indent -= 1;
                        self.write_indent();
                        self.write("}");
                        self.newline();
                        return;
                    }
                }
            }
        }
    }

    /// Emits one ` catch ... { ... }` continuation after a closing brace.
    fn emit_catch_tail(&mut self, arm: &Node) {
        match &arm.kind {
            NodeKind::CatchArm { pattern, body } => {
                match pattern {
                    Some(pattern) => {
                        let text = self.pattern_text(pattern);
                        let head = format!(" catch {text} {{");
                        self.write(&head);
                    }
                    None => self.write(" catch {"),
                }
                self.newline();
                self.emit_body(body);
                self.write_indent();
                self.write("}");
            }
            // Anything else becomes the body of a catch-all arm; the
            // renderer stays total.
            _ => {
                self.write(" catch {");
                self.newline();
                self.indent += 1;
                self.emit_stmt(arm);
                self.indent -= 1;
                self.write_indent();
                self.write("}");
            }
        }
    }

    fn emit_function(
        &mut self,
        node: &Node,
        name: &str,
        parameters: &Vector<Parameter>,
        return_type: Option<&str>,
        body: &Vector<Node>,
    ) {
        self.write_indent();
        for attr in &node.attributes {
            let text = format!("@{attr} ");
            self.write(&text);
        }
        // Effect modifiers belong after the parameter list in the target
        // grammar; everything else prefixes the keyword.
        let (effects, prefix): (Vec<&String>, Vec<&String>) =
            node.modifiers.iter().partition(|m| is_effect_modifier(m));
        for modifier in prefix {
            let text = format!("{modifier} ");
            self.write(&text);
        }
        let params: Vec<String> = parameters.iter().map(parameter_text_of(self)).collect();
        let mut head = format!("func {name}({})", params.join(", "));
        for effect in ordered_effects(&effects) {
            head.push_str(&format!(" {effect}"));
        }
        if let Some(ty) = return_type {
            head.push_str(&format!(" -> {ty}"));
        }
        head.push_str(" {");
        self.write(&head);
        self.newline();
        self.emit_body(body);
        self.write_indent();
        self.write("}");
        self.newline();
    }

    // ── Expressions ──────────────────────────────────────────────────

    /// Renders a node in expression position. Statement kinds landing here
    /// render as an inline fragment so the traversal stays total.
    fn expr(&self, node: &Node) -> String {
        match &node.kind {
            // Closure attributes belong inside the brace header, so only
            // modifiers prefix the literal.
            NodeKind::Closure { .. } => {
                let mut prefix = String::new();
                for modifier in &node.modifiers {
                    prefix.push_str(modifier);
                    prefix.push(' ');
                }
                return format!("{prefix}{}", self.closure_text(node));
            }
            // Statement kinds in expression position render as an inline
            // fragment; their decoration is applied by emit_stmt.
            NodeKind::Assignment { .. }
            | NodeKind::VariableDecl { .. }
            | NodeKind::If { .. }
            | NodeKind::Guard { .. }
            | NodeKind::For { .. }
            | NodeKind::Do { .. }
            | NodeKind::CatchArm { .. }
            | NodeKind::Throw { .. }
            | NodeKind::FunctionDecl { .. }
            | NodeKind::AggregateDecl { .. } => return self.inline_stmt(node),
            _ => {}
        }

        let deco = decoration(node);
        let text = match &node.kind {
            NodeKind::Literal(lit) => literal_text(lit),
            NodeKind::VariableRef { name } => name.clone(),
            NodeKind::Call { callee, arguments } => {
                let args: Vec<String> = arguments.iter().map(|a| self.expr(a)).collect();
                format!("{}({})", self.expr(callee), args.join(", "))
            }
            NodeKind::ParameterExpr { label, value } => match label {
                Some(label) => format!("{label}: {}", self.expr(value)),
                None => self.expr(value),
            },
            NodeKind::Infix { op, lhs, rhs } => {
                if op == "." {
                    format!("{}.{}", self.expr(lhs), self.expr(rhs))
                } else {
                    format!("{} {op} {}", self.expr(lhs), self.expr(rhs))
                }
            }
            NodeKind::ConditionalOp {
                condition,
                then_value,
                else_value,
            } => format!(
                "{} ? {} : {}",
                self.expr(condition),
                self.expr(then_value),
                self.expr(else_value)
            ),
            NodeKind::Tuple { elements } => {
                let parts: Vec<String> = elements.iter().map(|e| self.expr(e)).collect();
                format!("({})", parts.join(", "))
            }
            NodeKind::Pattern(pattern) => self.pattern_text(pattern),
            // Handled by the early returns above; kept for exhaustiveness.
            _ => self.inline_stmt(node),
        };
        if deco.is_empty() {
            text
        } else {
            format!("{deco}{text}")
        }
    }

    /// Multi-line closure literal at the current indent level.
    ///
    /// The bracketed capture list appears only when non-empty; attributes
    /// precede the capture/parameter header; statements separate on
    /// newlines.
    fn closure_text(&self, node: &Node) -> String {
        let NodeKind::Closure {
            captures,
            parameters,
            body,
        } = &node.kind
        else {
            return String::new();
        };

        let mut header = String::new();
        for attr in &node.attributes {
            header.push_str(&format!(" @{attr}"));
        }
        if !captures.is_empty() {
            let entries: Vec<String> = captures
                .iter()
                .map(|c| match c.strength {
                    CaptureStrength::Strong => c.name.clone(),
                    CaptureStrength::Weak => format!("weak {}", c.name),
                    CaptureStrength::Unowned => format!("unowned {}", c.name),
                })
                .collect();
            header.push_str(&format!(" [{}]", entries.join(", ")));
        }
        if !parameters.is_empty() {
            let names: Vec<&str> = parameters.iter().map(String::as_str).collect();
            header.push_str(&format!(" {}", names.join(", ")));
        }
        if !header.is_empty() {
            header.push_str(" in");
        }

        let mut sub = Renderer::with_indent(self.indent + 1);
        for stmt in body {
            sub.emit_stmt(stmt);
        }
        let mut out = format!("{{{header}\n{}", sub.buf);
        for _ in 0..self.indent {
            out.push_str(INDENT);
        }
        out.push('}');
        out
    }

    /// Renders a statement-kind node as an inline expression fragment.
    fn inline_stmt(&self, node: &Node) -> String {
        let mut sub = Renderer::with_indent(self.indent);
        sub.emit_stmt(node);
        let text = sub.buf;
        let trimmed = text.strip_suffix('\n').unwrap_or(&text);
        trimmed.trim_start().to_string()
    }

    fn pattern_text(&self, pattern: &Pattern) -> String {
        match pattern {
            Pattern::Identifier { name } => format!("let {name}"),
            Pattern::TaggedCase { name, bindings } => {
                if bindings.is_empty() {
                    format!(".{name}")
                } else {
                    let bound: Vec<String> =
                        bindings.iter().map(|b| format!("let {}", b.name)).collect();
                    format!(".{name}({})", bound.join(", "))
                }
            }
            Pattern::Range {
                lower,
                upper,
                inclusive,
            } => {
                let op = if *inclusive { "..." } else { "..<" };
                format!("{}{op}{}", self.expr(lower), self.expr(upper))
            }
        }
    }
}

// ── Free helpers ─────────────────────────────────────────────────────

fn decoration(node: &Node) -> String {
    let mut out = String::new();
    for attr in &node.attributes {
        out.push_str(&format!("@{attr} "));
    }
    for modifier in &node.modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    out
}

fn is_effect_modifier(token: &str) -> bool {
    token == "async" || token == "throws" || token == "rethrows" || token.starts_with("throws(")
}

/// `async` precedes the throws tokens in the grammar, whatever order they
/// were chained in.
fn ordered_effects<'a>(effects: &[&'a String]) -> Vec<&'a String> {
    let mut out: Vec<&String> = effects
        .iter()
        .filter(|m| m.as_str() == "async")
        .copied()
        .collect();
    out.extend(effects.iter().filter(|m| m.as_str() != "async").copied());
    out
}

fn parameter_text_of(renderer: &Renderer) -> impl Fn(&Parameter) -> String + '_ {
    move |param: &Parameter| {
        let mut text = match &param.label {
            Some(label) if label == &param.name => {
                format!("{}: {}", param.name, param.type_annotation)
            }
            Some(label) => format!("{label} {}: {}", param.name, param.type_annotation),
            None => format!("_ {}: {}", param.name, param.type_annotation),
        };
        if let Some(default) = &param.default_value {
            text.push_str(&format!(" = {}", renderer.expr(default)));
        }
        text
    }
}

fn literal_text(lit: &Literal) -> String {
    match lit {
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => {
            let s = v.to_string();
            if s.contains('.') || s.contains('e') || s.contains("inf") || s.contains("NaN") {
                s
            } else {
                format!("{s}.0")
            }
        }
        Literal::String(s) => format!("\"{}\"", escape_string(s)),
        Literal::Bool(b) => b.to_string(),
        Literal::Nil => "nil".to_string(),
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_literals_always_carry_a_decimal_point() {
        assert_eq!(literal_text(&Literal::Float(1.0)), "1.0");
        assert_eq!(literal_text(&Literal::Float(2.5)), "2.5");
    }

    #[test]
    fn string_literals_escape_quotes_and_newlines() {
        assert_eq!(escape_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
    }
}
