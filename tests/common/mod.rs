// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)] // each test binary uses a different subset

use std::sync::{Arc, Mutex};

use interleave_search::{
    Graph, NodeId, OptionGenerator, PermutationConsumer, Permutations,
};
use num_bigint::BigUint;

/// One emitted permutation: its ordinal and the chosen node ids in order.
pub type Leaf = (BigUint, Vec<NodeId>);

/// Consumer that copies every emitted permutation out of the reused buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingConsumer {
    pub leaves: Vec<Leaf>,
}

impl PermutationConsumer<NodeId> for CollectingConsumer {
    fn consume(&mut self, n: &BigUint, permutation: &[NodeId]) {
        self.leaves.push((n.clone(), permutation.to_vec()));
    }
}

/// Consumer whose clones all append into one shared list, for the parallel
/// iteration tests.
#[derive(Debug, Clone, Default)]
pub struct SharedCollector {
    pub leaves: Arc<Mutex<Vec<Leaf>>>,
}

impl SharedCollector {
    pub fn into_leaves(self) -> Vec<Leaf> {
        self.leaves.lock().unwrap().clone()
    }
}

impl PermutationConsumer<NodeId> for SharedCollector {
    fn consume(&mut self, n: &BigUint, permutation: &[NodeId]) {
        self.leaves
            .lock()
            .unwrap()
            .push((n.clone(), permutation.to_vec()));
    }
}

/// Run `for_each` to completion and return every leaf.
pub fn enumerate<G>(permutations: &mut Permutations<G>) -> Vec<Leaf>
where
    G: OptionGenerator<Choice = NodeId>,
{
    let mut consumer = CollectingConsumer::default();
    permutations.for_each(&mut consumer);
    consumer.leaves
}

/// Map each leaf's node ids to their payload strings.
pub fn orderings(graph: &Graph<&'static str>, leaves: &[Leaf]) -> Vec<Vec<&'static str>> {
    leaves
        .iter()
        .map(|(_, perm)| perm.iter().map(|&n| *graph.value(n)).collect())
        .collect()
}

/// The ordinal-to-payload map, sorted by ordinal.
pub fn ordinal_map(graph: &Graph<&'static str>, leaves: &[Leaf]) -> Vec<(BigUint, Vec<&'static str>)> {
    let mut map: Vec<_> = leaves
        .iter()
        .map(|(n, perm)| (n.clone(), perm.iter().map(|&id| *graph.value(id)).collect()))
        .collect();
    map.sort();
    map
}

/// Assert that the leaf ordinals are exactly `0..leaves.len()`.
pub fn assert_dense_unique_ordinals(leaves: &[Leaf]) {
    let mut ordinals: Vec<BigUint> = leaves.iter().map(|(n, _)| n.clone()).collect();
    ordinals.sort();
    let expected: Vec<BigUint> = (0..leaves.len()).map(BigUint::from).collect();
    assert_eq!(ordinals, expected, "ordinals are not dense and unique");
}

/// Assert that no two leaves share an ordinal. Unlike
/// [`assert_dense_unique_ordinals`] this also holds for graphs whose choice
/// tree is uneven, where the ordinal space has gaps.
pub fn assert_unique_ordinals(leaves: &[Leaf]) {
    let mut ordinals: Vec<BigUint> = leaves.iter().map(|(n, _)| n.clone()).collect();
    ordinals.sort();
    ordinals.dedup();
    assert_eq!(ordinals.len(), leaves.len(), "duplicate ordinals emitted");
}

/// Assert that every node appears at most once per permutation.
pub fn assert_at_most_once_membership(leaves: &[Leaf]) {
    for (n, perm) in leaves {
        for (idx, node) in perm.iter().enumerate() {
            assert!(
                !perm[idx + 1..].contains(node),
                "permutation {n} contains {node:?} twice"
            );
        }
    }
}

/// Assert that `permutation(n)` regenerates every emitted leaf exactly.
pub fn assert_random_access_matches<G>(permutations: &mut Permutations<G>, leaves: &[Leaf])
where
    G: OptionGenerator<Choice = NodeId>,
{
    for (n, perm) in leaves {
        let regenerated = permutations
            .permutation(n)
            .expect("emitted ordinal is in range");
        assert_eq!(&regenerated, perm, "random access diverged at ordinal {n}");
    }
}

/// Assert that replaying each leaf against a fresh fork of `generator` only
/// ever chooses nodes from the most recently returned frontier.
pub fn assert_chosen_from_frontier<G>(generator: &mut G, leaves: &[Leaf])
where
    G: OptionGenerator<Choice = NodeId>,
{
    for (n, perm) in leaves {
        let mut replay = generator.fork();
        let mut last: Option<NodeId> = None;
        for node in perm {
            let options = replay.generate(last.as_ref());
            assert!(
                options.contains(node),
                "permutation {n} chose {node:?} outside the frontier {options:?}"
            );
            last = Some(*node);
        }
        assert!(
            replay.generate(last.as_ref()).is_empty(),
            "permutation {n} stopped before its frontier was empty"
        );
    }
}
