//! Normalizer and structural-equivalence tests.

use swiftpen::ast::builder::{call, if_block, string, variable};
use swiftpen::normalize::normalize;
use swiftpen::render::generate;

#[test]
fn normalize_is_stable_over_rendered_output() {
    let tree = if_block(variable("ok"), || {
        vec![call("print", vec![string("done")])]
    });
    let rendered = generate(&tree);
    let once = normalize(&rendered);
    let twice = normalize(&once);
    assert_eq!(once, twice);
}

#[test]
fn normalized_forms_compare_equal_across_whitespace_variants() {
    let canonical = normalize("if ok {\n    print(\"done\")\n}\n");
    let sloppy = normalize("if  ok   {\n\n\n  print(\"done\")\n\n}\n");
    assert_eq!(canonical, sloppy);
}

#[test]
fn normalize_is_not_the_rendered_form() {
    let tree = if_block(variable("ok"), || {
        vec![call("print", vec![string("done")])]
    });
    let rendered = generate(&tree);
    // The shipped output keeps its indentation; normalization strips it.
    assert!(rendered.contains("    print"));
    assert!(!normalize(&rendered).contains("    print"));
}
