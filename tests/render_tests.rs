//! Renderer property tests.
//!
//! These pin down the grammar shapes the renderer must reproduce exactly:
//! chained conditionals, loop filters, closure capture lists, and ordered
//! catch arms. Brace balance is asserted over whole documents since every
//! opened block must close exactly once.

use swiftpen::ast::builder::{
    assign, boolean, call, catch_all, catch_arm, closed_range, closure, do_catch, for_in,
    for_in_where, guard_else, if_block, if_else, int, labeled_arg, member, pattern, range,
    string, strong, tagged_case, ternary, throw, tuple, unowned, variable, variable_decl, weak,
};
use swiftpen::ast::BindingKeyword;
use swiftpen::render::generate;

fn brace_balance(text: &str) -> (usize, usize) {
    let opens = text.matches('{').count();
    let closes = text.matches('}').count();
    (opens, closes)
}

fn count_occurrences(text: &str, needle: &str) -> usize {
    text.matches(needle).count()
}

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn generate_is_idempotent_over_an_unmodified_tree() {
        let tree = if_block(boolean(true), || {
            vec![call("print", vec![string("yes")])]
        });
        let first = generate(&tree);
        let second = generate(&tree);
        assert_eq!(first, second);
    }

    #[test]
    fn every_node_renders_a_nonempty_fragment_in_isolation() {
        let samples = vec![
            int(0),
            variable("x"),
            call("f", vec![]),
            member(variable("list"), "count"),
            throw(variable("err")),
            catch_all(|| vec![]),
        ];
        for node in samples {
            assert!(!generate(&node).trim().is_empty());
        }
    }
}

#[cfg(test)]
mod conditional_chain_tests {
    use super::*;

    #[test]
    fn else_if_else_renders_as_a_single_flattened_tail() {
        let chain = if_block(variable("c1"), || vec![call("t1", vec![])])
            .else_if(variable("c2"), || vec![call("t2", vec![])])
            .else_block(|| vec![call("e", vec![])]);
        let text = generate(&chain);

        let if_pos = text.find("if c1 {").expect("if head");
        let else_if_pos = text.find("} else if c2 {").expect("chained else if");
        let else_pos = text.find("} else {").expect("trailing else");
        assert!(if_pos < else_if_pos && else_if_pos < else_pos);

        assert_eq!(count_occurrences(&text, "if c1"), 1);
        assert_eq!(count_occurrences(&text, "else if c2"), 1);
        let (opens, closes) = brace_balance(&text);
        assert_eq!(opens, closes);
    }

    #[test]
    fn else_if_does_not_nest_an_extra_block() {
        let chain = if_block(variable("a"), || vec![call("f", vec![])])
            .else_if(variable("b"), || vec![call("g", vec![])]);
        let text = generate(&chain);
        // A nested rendering would indent the else-if head; the chain keeps
        // it at column zero.
        assert!(text.contains("\n} else if b {\n"));
        let (opens, closes) = brace_balance(&text);
        assert_eq!(opens, closes);
    }

    #[test]
    fn if_else_builds_the_two_branch_shape_in_one_call() {
        let stmt = if_else(
            variable("ready"),
            || vec![call("go", vec![])],
            || vec![call("wait", vec![])],
        );
        let text = generate(&stmt);
        assert!(text.starts_with("if ready {\n"));
        assert!(text.contains("\n} else {\n    wait()\n}\n"));
    }

    #[test]
    fn plain_if_closes_with_a_single_brace() {
        let stmt = if_block(variable("ready"), || vec![call("go", vec![])]);
        assert_eq!(generate(&stmt), "if ready {\n    go()\n}\n");
    }
}

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn for_with_filter_renders_the_where_clause() {
        let stmt = for_in_where(
            variable("x"),
            variable("xs"),
            variable("pred"),
            || vec![call("use", vec![variable("x")])],
        );
        let text = generate(&stmt);
        assert!(text.contains("for x in xs where pred {"));
    }

    #[test]
    fn for_without_filter_has_no_where_token() {
        let stmt = for_in(variable("x"), variable("xs"), || {
            vec![call("use", vec![variable("x")])]
        });
        let text = generate(&stmt);
        assert!(text.contains("for x in xs {"));
        assert!(!text.contains("where"));
    }
}

#[cfg(test)]
mod closure_tests {
    use super::*;

    #[test]
    fn weak_capture_renders_bracketed_before_the_body() {
        let node = closure(
            vec![weak("self").expect("valid capture")],
            vec![],
            || vec![call("refresh", vec![])],
        );
        let text = generate(&node);
        assert!(text.starts_with("{ [weak self] in\n"));
        assert!(text.contains("refresh()"));
    }

    #[test]
    fn unowned_and_strong_captures_share_one_bracket() {
        let node = closure(
            vec![
                unowned("delegate").expect("valid capture"),
                strong("logger").expect("valid capture"),
            ],
            vec![],
            || vec![call("notify", vec![])],
        );
        let text = generate(&node);
        // A strong capture renders as the bare name.
        assert!(text.starts_with("{ [unowned delegate, logger] in\n"));
    }

    #[test]
    fn empty_capture_list_renders_no_bracket() {
        let node = closure(vec![], vec!["value"], || {
            vec![call("sink", vec![variable("value")])]
        });
        let text = generate(&node);
        assert!(!text.contains('['));
        assert!(text.starts_with("{ value in\n"));
    }

    #[test]
    fn closure_attributes_precede_the_capture_header() {
        let node = closure(
            vec![weak("self").expect("valid capture")],
            vec![],
            || vec![call("refresh", vec![])],
        )
        .attribute("Sendable")
        .expect("valid attribute");
        let text = generate(&node);
        assert!(text.starts_with("{ @Sendable [weak self] in\n"));
    }
}

#[cfg(test)]
mod statement_tests {
    use super::*;

    #[test]
    fn guard_renders_its_else_body() {
        let stmt = guard_else(variable("hasFunds"), || {
            vec![throw(member(variable("VendingError"), "outOfStock"))]
        });
        let text = generate(&stmt);
        assert!(text.starts_with("guard hasFunds else {\n"));
        assert!(text.contains("    throw VendingError.outOfStock\n"));
        let (opens, closes) = brace_balance(&text);
        assert_eq!(opens, closes);
    }

    #[test]
    fn assignment_and_typed_declaration_render_inline() {
        let stmt = assign(member(variable("machine"), "coins"), int(12));
        assert_eq!(generate(&stmt), "machine.coins = 12\n");

        let decl = variable_decl(BindingKeyword::Var, "total", Some("Int"), Some(int(0)));
        assert_eq!(generate(&decl), "var total: Int = 0\n");
    }

    #[test]
    fn ternary_and_tuple_render_as_single_expressions() {
        let expr = ternary(variable("ok"), string("yes"), string("no"));
        assert_eq!(generate(&expr), "ok ? \"yes\" : \"no\"\n");

        let pair = tuple(vec![labeled_arg("x", int(1)), labeled_arg("y", int(2))]);
        assert_eq!(generate(&pair), "(x: 1, y: 2)\n");
    }

    #[test]
    fn range_patterns_render_both_openness_forms() {
        assert_eq!(generate(&pattern(range(int(1), int(5)))), "1..<5\n");
        assert_eq!(generate(&pattern(closed_range(int(1), int(5)))), "1...5\n");
    }
}

#[cfg(test)]
mod catch_arm_tests {
    use super::*;

    #[test]
    fn arms_render_in_declaration_order_exactly_once() {
        let block = do_catch(
            || vec![call("risky", vec![])],
            vec![
                catch_arm(
                    tagged_case("timeout", vec![]).expect("valid pattern"),
                    || vec![call("retry", vec![])],
                ),
                catch_arm(
                    tagged_case("offline", vec![]).expect("valid pattern"),
                    || vec![call("queue", vec![])],
                ),
                catch_all(|| vec![call("log", vec![variable("error")])]),
            ],
        );
        let text = generate(&block);

        let a = text.find("catch .timeout").expect("first arm");
        let b = text.find("catch .offline").expect("second arm");
        let c = text.rfind(" catch {").expect("catch-all arm");
        assert!(a < b && b < c);
        assert_eq!(count_occurrences(&text, "catch .timeout"), 1);
        assert_eq!(count_occurrences(&text, "catch .offline"), 1);
    }

    #[test]
    fn tagged_case_bindings_expose_names_to_the_arm_body() {
        let arm = catch_arm(
            tagged_case("insufficientFunds", vec![("coinsNeeded", "Int")])
                .expect("valid pattern"),
            || {
                vec![call(
                    "print",
                    vec![variable("coinsNeeded")],
                )]
            },
        );
        let text = generate(&arm);
        assert!(text.contains("catch .insufficientFunds(let coinsNeeded) {"));
        assert!(text.contains("print(coinsNeeded)"));
    }

    #[test]
    fn do_block_scenario_holds_order_and_brace_balance() {
        let block = do_catch(
            || vec![call("f", vec![])],
            vec![
                catch_arm(tagged_case("x", vec![]).expect("valid pattern"), || {
                    vec![]
                }),
                catch_all(|| vec![]),
            ],
        );
        let text = generate(&block);

        assert_eq!(count_occurrences(&text, "do {"), 1);
        let tagged = text.find("catch .x").expect("tagged arm");
        let fallback = text.rfind(" catch {").expect("catch-all");
        assert!(tagged < fallback);
        let (opens, closes) = brace_balance(&text);
        assert_eq!(opens, closes);
    }
}
