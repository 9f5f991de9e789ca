//! Property tests over arbitrary node sets and keys.

use std::collections::HashSet;

use proptest::prelude::*;
use vnhash::{HashRing, MIN_REPLICAS};

fn node_names() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[a-z0-9:.-]{1,12}", 1..6)
}

fn lookup_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(any::<String>(), 1..64)
}

fn ring_of(nodes: &HashSet<String>) -> HashRing {
    let ring = HashRing::default();
    for node in nodes {
        ring.add(node);
    }
    ring
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn get_is_deterministic(nodes in node_names(), keys in lookup_keys()) {
        let ring = ring_of(&nodes);
        for key in &keys {
            prop_assert_eq!(ring.get(key), ring.get(key));
        }
    }

    #[test]
    fn get_returns_live_node(nodes in node_names(), keys in lookup_keys()) {
        let ring = ring_of(&nodes);
        for key in &keys {
            let owner = ring.get(key);
            prop_assert!(owner.as_ref().is_some_and(|n| nodes.contains(n)), "{:?}", owner);
        }
    }

    #[test]
    fn add_then_remove_is_invisible(
        nodes in node_names(),
        extra in "[a-z]{1,12}",
        keys in lookup_keys(),
    ) {
        prop_assume!(!nodes.contains(&extra));
        let ring = ring_of(&nodes);
        let before: Vec<_> = keys.iter().map(|k| ring.get(k)).collect();
        let positions = ring.position_count();

        ring.add(&extra);
        ring.remove(&extra);

        let after: Vec<_> = keys.iter().map(|k| ring.get(k)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(ring.position_count(), positions);
        prop_assert!(!ring.contains(&extra));
    }

    #[test]
    fn readd_keeps_only_last_replica_count(
        node in "[a-z]{1,12}",
        first in 1usize..400,
        second in 1usize..400,
    ) {
        let ring = HashRing::new(200);
        ring.add_with_replicas(&node, first);
        ring.add_with_replicas(&node, second);

        let expected = second.min(200);
        prop_assert_eq!(ring.replicas_of(&node), Some(expected));
        prop_assert_eq!(ring.position_count(), expected);
    }

    #[test]
    fn single_node_owns_all_keys(node in "[a-z]{1,12}", keys in lookup_keys()) {
        let ring = HashRing::new(MIN_REPLICAS);
        ring.add(&node);
        for key in &keys {
            let owner = ring.get(key);
            prop_assert_eq!(owner.as_deref(), Some(node.as_str()));
        }
    }

    #[test]
    fn removing_everything_empties_ring(nodes in node_names()) {
        let ring = ring_of(&nodes);
        for node in &nodes {
            ring.remove(node);
        }
        prop_assert!(ring.is_empty());
        prop_assert_eq!(ring.node_count(), 0);
        prop_assert_eq!(ring.get("key"), None);
    }
}
