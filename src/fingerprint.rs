//! Deterministic tree fingerprinting.
//!
//! External build-acceleration systems cache rendered output keyed by a
//! fingerprint of the input tree. The core has no awareness of any cache;
//! it only guarantees the two properties a cache needs: [`generate`] is
//! byte-deterministic, and [`fingerprint`] is a stable, collision-resistant
//! key over tree structure.
//!
//! [`generate`]: crate::render::generate

use sha2::{Digest, Sha256};

use crate::ast::Node;

/// SHA-256 of the canonical JSON serialization of the tree, hex-encoded.
///
/// Structurally equal trees fingerprint identically; any change to a kind,
/// modifier, attribute, or child order changes the digest.
pub fn fingerprint(tree: &Node) -> String {
    // Struct field order is fixed, so the JSON form is canonical.
    let bytes = serde_json::to_vec(tree).expect("serialize tree");
    let digest = Sha256::digest(&bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
