//! Tests for consistent-hash placement

use shardcache::HashRing;

fn numeric_ring(replicas: usize) -> HashRing {
    HashRing::with_hasher(replicas, |data: &[u8]| {
        std::str::from_utf8(data)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    })
}

/// Test that every key maps to one of the added nodes
#[test]
fn test_every_key_has_an_owner() {
    let mut ring = HashRing::new(3);
    ring.add(["A", "B"]);

    for i in 0..1000 {
        let owner = ring.get(&format!("k{}", i)).unwrap();
        assert!(owner == "A" || owner == "B");
    }
}

/// Test that a key hashing past the last position wraps to the first
#[test]
fn test_wraparound_to_smallest_position() {
    let mut ring = numeric_ring(1);
    // Positions: "010" -> 10 (node "10"), "020" -> 20 (node "20")
    ring.add(["10", "20"]);

    assert_eq!(ring.get("15"), Some("20"));
    assert_eq!(ring.get("20"), Some("20"));
    assert_eq!(ring.get("21"), Some("10"));
    assert_eq!(ring.get("4294967295"), Some("10"));
}

/// Test that placements do not depend on the order nodes were added in
#[test]
fn test_add_order_does_not_matter() {
    let mut one_call = HashRing::new(50);
    one_call.add(["alpha", "beta", "gamma"]);

    let mut separate = HashRing::new(50);
    separate.add(["gamma"]);
    separate.add(["alpha"]);
    separate.add(["beta"]);

    for i in 0..500 {
        let key = format!("session:{}", i);
        assert_eq!(one_call.get(&key), separate.get(&key));
    }
}

/// Test that an empty ring reports no owner instead of failing
#[test]
fn test_empty_ring() {
    let ring = HashRing::new(10);
    assert_eq!(ring.get("anything"), None);
    assert_eq!(ring.len(), 0);
}

/// Test that virtual nodes spread keys over all real nodes
#[test]
fn test_virtual_nodes_spread_load() {
    let mut ring = HashRing::new(100);
    ring.add(["n1", "n2", "n3", "n4"]);
    assert_eq!(ring.len(), 400);

    let mut counts = std::collections::HashMap::new();
    for i in 0..10_000 {
        *counts.entry(ring.get(&format!("obj-{}", i)).unwrap()).or_insert(0usize) += 1;
    }

    assert_eq!(counts.len(), 4);
    for (node, count) in counts {
        assert!(count > 1000, "{} only owns {} keys", node, count);
    }
}
