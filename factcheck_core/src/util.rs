//! Content fingerprinting for cached artifacts.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 fingerprint of a source file's bytes.
///
/// The fact set name is mixed in so the training and test caches never share
/// a fingerprint even when built from identical files.
#[must_use]
pub fn content_fingerprint(fact_set: &str, content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fact_set.as_bytes());
    hasher.update(b":");
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_fingerprint() {
        let h1 = content_fingerprint("training", b"1\tParis 's birth place\t1.0");
        let h2 = content_fingerprint("training", b"1\tParis 's birth place\t1.0");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn fact_set_changes_fingerprint() {
        let h1 = content_fingerprint("training", b"same");
        let h2 = content_fingerprint("test", b"same");
        assert_ne!(h1, h2);
    }
}
