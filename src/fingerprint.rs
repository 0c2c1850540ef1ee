//! Identity fingerprints for nodes and modules
//!
//! Fingerprints are cheap identity tokens for de-duplication and change
//! detection, not security primitives.

use crate::models::{NodeKind, OmfRevision, Status};
use crc32fast::Hasher as Crc32;
use sha2::{Digest, Sha256};

/// Fingerprint of a node's identity: name, OID, status and kind, in that order.
///
/// CRC-32 over the concatenated fields, as 8 lowercase hex digits. No other
/// field (description, type, access) takes part.
pub fn node_fingerprint(name: &str, oid: &str, status: Status, kind: NodeKind) -> String {
    let mut hasher = Crc32::new();
    hasher.update(name.as_bytes());
    hasher.update(oid.as_bytes());
    hasher.update(status.as_str().as_bytes());
    hasher.update(kind.as_str().as_bytes());
    format!("{:08x}", hasher.finalize())
}

/// Fingerprint of a module's content identity.
///
/// SHA-256 over description, name, then each revision's description and date
/// in revision order, truncated to 128 bits (32 lowercase hex digits).
pub fn module_fingerprint(description: &str, name: &str, revisions: &[OmfRevision]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(description.as_bytes());
    hasher.update(name.as_bytes());
    for revision in revisions {
        hasher.update(revision.description.as_bytes());
        hasher.update(revision.date.to_string().as_bytes());
    }
    hasher.finalize()[..16]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn revision(year: i32, description: &str) -> OmfRevision {
        OmfRevision {
            date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_node_fingerprint_is_stable() {
        let a = node_fingerprint("ifIndex", "1.3.6.1.2.1.2.2.1.1", Status::Current, NodeKind::Column);
        let b = node_fingerprint("ifIndex", "1.3.6.1.2.1.2.2.1.1", Status::Current, NodeKind::Column);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_node_fingerprint_tracks_each_identity_field() {
        let base = node_fingerprint("ifIndex", "1.3.6.1.2.1.2.2.1.1", Status::Current, NodeKind::Column);

        assert_ne!(base, node_fingerprint("ifDescr", "1.3.6.1.2.1.2.2.1.1", Status::Current, NodeKind::Column));
        assert_ne!(base, node_fingerprint("ifIndex", "1.3.6.1.2.1.2.2.1.2", Status::Current, NodeKind::Column));
        assert_ne!(base, node_fingerprint("ifIndex", "1.3.6.1.2.1.2.2.1.1", Status::Deprecated, NodeKind::Column));
        assert_ne!(base, node_fingerprint("ifIndex", "1.3.6.1.2.1.2.2.1.1", Status::Current, NodeKind::Scalar));
    }

    #[test]
    fn test_node_fingerprint_matches_concatenation() {
        let mut hasher = Crc32::new();
        hasher.update(b"sysName1.3.6.1.2.1.1.5CurrentScalar");
        let expected = format!("{:08x}", hasher.finalize());

        assert_eq!(
            node_fingerprint("sysName", "1.3.6.1.2.1.1.5", Status::Current, NodeKind::Scalar),
            expected
        );
    }

    #[test]
    fn test_module_fingerprint_changes_with_inputs() {
        let revisions = vec![revision(2020, "Initial"), revision(2023, "Added counters")];
        let base = module_fingerprint("Example MIB", "EXAMPLE-MIB", &revisions);

        assert_eq!(base, module_fingerprint("Example MIB", "EXAMPLE-MIB", &revisions));
        assert_eq!(base.len(), 32);

        assert_ne!(base, module_fingerprint("Changed", "EXAMPLE-MIB", &revisions));
        assert_ne!(base, module_fingerprint("Example MIB", "OTHER-MIB", &revisions));
        assert_ne!(base, module_fingerprint("Example MIB", "EXAMPLE-MIB", &revisions[..1]));

        let mut edited = revisions.clone();
        edited[1].description = "Added gauges".to_string();
        assert_ne!(base, module_fingerprint("Example MIB", "EXAMPLE-MIB", &edited));

        let mut redated = revisions;
        redated[0] = revision(2019, "Initial");
        assert_ne!(base, module_fingerprint("Example MIB", "EXAMPLE-MIB", &redated));
    }
}
