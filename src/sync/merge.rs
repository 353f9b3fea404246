//! Reconciliation of a freshly fetched server snapshot with the local
//! replica.

use crate::models::{Snapshot, Well};

/// Merges a remote snapshot with the local replica into a new working set.
///
/// The remote snapshot is authoritative: every remote record appears first,
/// unchanged and in remote order. A provisional local record survives only
/// if no remote record shares its `(name, area)` pair; a match is treated
/// as a probable duplicate, meaning the record was already synced and a
/// durable twin now exists under a different identity. Surviving
/// provisional records keep their original local order and their layers.
///
/// Known imprecision: two genuinely distinct wells sharing name and area
/// are indistinguishable under this heuristic, and the provisional one is
/// dropped. There is no persisted provisional-to-durable mapping to do
/// better.
///
/// Pure function: no I/O, inputs are not mutated, output is deterministic.
pub fn merge(remote: &[Well], local: &[Well]) -> Snapshot {
    let mut merged: Snapshot = remote.to_vec();

    for well in local {
        if !well.is_provisional() {
            continue;
        }
        let probable_duplicate = remote
            .iter()
            .any(|r| r.name == well.name && r.area == well.area);
        if !probable_duplicate {
            merged.push(well.clone());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::WellId;
    use crate::models::{Lithology, WellInput};

    fn durable_well(id: &str, name: &str, area: &str) -> Well {
        Well {
            id: WellId::durable(id),
            name: name.to_string(),
            area: area.to_string(),
            structure: "Foundation".to_string(),
            design_depth: 20.0,
            layers: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn provisional_well(name: &str, area: &str) -> Well {
        Well::new_provisional(WellInput {
            name: name.to_string(),
            area: area.to_string(),
            structure: "Foundation".to_string(),
            design_depth: 20.0,
        })
    }

    #[test]
    fn test_remote_records_form_ordered_prefix() {
        let remote = vec![
            durable_well("1", "W1", "A1"),
            durable_well("2", "W2", "A2"),
            durable_well("3", "W3", "A3"),
        ];
        let local = vec![provisional_well("W9", "A9")];

        let merged = merge(&remote, &local);
        assert_eq!(&merged[..3], &remote[..]);
    }

    #[test]
    fn test_unmatched_provisional_survives_verbatim() {
        let remote = vec![durable_well("1", "W1", "A1")];
        let mut pending = provisional_well("W2", "A2");
        pending
            .place_layer(0.0, 3.0, Lithology::Peat, None)
            .unwrap();
        let local = vec![pending.clone()];

        let merged = merge(&remote, &local);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], pending);
        assert_eq!(merged[1].layers.len(), 1);
    }

    #[test]
    fn test_probable_duplicate_dropped() {
        let remote = vec![durable_well("srv_42", "W1", "A1")];

        let mut pending = provisional_well("W1", "A1");
        pending.id = WellId::from("offline_1700000000000");
        let local = vec![pending];

        let merged = merge(&remote, &local);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, WellId::durable("srv_42"));
    }

    #[test]
    fn test_name_match_alone_is_not_a_duplicate() {
        let remote = vec![durable_well("1", "W1", "A1")];
        let local = vec![provisional_well("W1", "A2")];

        let merged = merge(&remote, &local);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_stale_durable_local_records_dropped() {
        // A durable record the server no longer returns does not survive;
        // remote is the truth for the durable namespace.
        let remote = vec![durable_well("1", "W1", "A1")];
        let local = vec![durable_well("99", "W-old", "A-old")];

        let merged = merge(&remote, &local);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, WellId::durable("1"));
    }

    #[test]
    fn test_surviving_provisionals_keep_local_order() {
        let remote = vec![durable_well("1", "W1", "A1")];
        let local = vec![
            provisional_well("P1", "A1"),
            provisional_well("P2", "A2"),
            provisional_well("P3", "A3"),
        ];

        let merged = merge(&remote, &local);
        let names: Vec<&str> = merged[1..].iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let remote = vec![durable_well("1", "W1", "A1"), durable_well("2", "W2", "A2")];
        let local = vec![
            provisional_well("W1", "A1"),
            provisional_well("P1", "A9"),
            durable_well("77", "gone", "gone"),
        ];

        let once = merge(&remote, &local);
        let twice = merge(&remote, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let remote = vec![durable_well("1", "W1", "A1")];
        let local = vec![provisional_well("P1", "A1")];
        let remote_before = remote.clone();
        let local_before = local.clone();

        let _ = merge(&remote, &local);
        assert_eq!(remote, remote_before);
        assert_eq!(local, local_before);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(&[], &[]).is_empty());

        let local = vec![provisional_well("P1", "A1")];
        let merged = merge(&[], &local);
        assert_eq!(merged.len(), 1);
    }
}
