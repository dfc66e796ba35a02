//! Serialization, validation, and fingerprint tests.
//!
//! Deserialized trees bypass the construction boundary, so `validate` must
//! catch what the builders would have rejected; the fingerprint must be a
//! stable function of tree structure alone.

use swiftpen::ast::builder::{
    call, catch_all, catch_arm, do_catch, string, tagged_case, variable,
};
use swiftpen::ast::Node;
use swiftpen::fingerprint::fingerprint;
use swiftpen::render::generate;
use swiftpen::validate::validate;

fn sample_tree() -> Node {
    do_catch(
        || vec![call("transfer", vec![string("savings")])],
        vec![
            catch_arm(
                tagged_case("insufficientFunds", vec![("coinsNeeded", "Int")])
                    .expect("valid pattern"),
                || vec![call("top_up", vec![variable("coinsNeeded")])],
            ),
            catch_all(|| vec![call("log", vec![variable("error")])]),
        ],
    )
}

#[test]
fn trees_round_trip_through_json() {
    let tree = sample_tree();
    let json = serde_json::to_string(&tree).expect("serialize");
    let reloaded: Node = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(tree, reloaded);
    assert_eq!(generate(&tree), generate(&reloaded));
}

#[test]
fn builder_output_passes_validation() {
    assert!(validate(&sample_tree()).is_ok());
}

#[test]
fn validation_rejects_tokens_the_builders_would_have() {
    // Simulates a hand-edited tree file: the attribute never went through
    // the construction boundary.
    let mut tampered = variable("x");
    tampered.attributes.push_back("not an attribute!".to_string());
    assert!(validate(&tampered).is_err());
}

#[test]
fn validation_descends_into_catch_arm_bodies() {
    let mut bad_leaf = variable("y");
    bad_leaf.attributes.push_back("also bad!".to_string());
    let tree = do_catch(|| vec![bad_leaf], vec![catch_all(|| vec![])]);
    assert!(validate(&tree).is_err());
}

#[test]
fn fingerprint_is_stable_and_structure_sensitive() {
    let a = sample_tree();
    let b = sample_tree();
    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert_eq!(fingerprint(&a), fingerprint(&a));

    let different = call("transfer", vec![string("checking")]);
    assert_ne!(fingerprint(&a), fingerprint(&different));
}

#[test]
fn fingerprint_tracks_modifier_changes() {
    let plain = call("fetch", vec![]);
    let throwing = plain.throws(None);
    assert_ne!(fingerprint(&plain), fingerprint(&throwing));
}
