use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule hit.
///
/// Identity fields:
/// - rule tag
/// - patient identity
/// - first absence day (if any)
pub fn rule_hit_fingerprint(
    rule_name: &str,
    pasient_ident: &str,
    forste_fom: Option<&str>,
) -> String {
    let mut parts = vec![rule_name, pasient_ident];
    if let Some(fom) = forste_fom {
        parts.push(fom);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
