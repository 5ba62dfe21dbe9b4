use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - artifact file name (empty when the finding has no location)
/// - message
pub fn fingerprint_for_finding(check_id: &str, code: &str, artifact: &str, message: &str) -> String {
    let canonical = [check_id, code, artifact, message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
