// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive enumeration of event interleavings constrained by a
//! dependency graph.
//!
//! The intended use is model-checking concurrent systems: the events that can
//! occur in the system are nodes in a graph, the constraints on their order
//! are edges, and this crate produces every serial order of events consistent
//! with those constraints. Each ordering can then be replayed against a
//! system under test or a reference interpreter to check invariants.
//!
//! # Architecture
//!
//! The crate couples three pieces:
//!
//! 1. **Option generators** ([`OptionGenerator`]): stateful objects that,
//!    given the most recently chosen event, return the set of events that may
//!    legally come next. [`GraphPermutation`] is the dependency-graph
//!    generator; [`SimplePermutation`] is the degenerate no-dependencies
//!    case.
//! 2. **The enumerator** ([`Permutations`]): a depth-first worklist walk over
//!    generator states that visits every complete ordering, assigns each a
//!    unique arbitrary-precision ordinal, and supports random access to any
//!    ordering by its ordinal.
//! 3. **The callback algebra** ([`callback`]): per-node predicates returning
//!    [`StateChange`] values that decide when a node becomes available or is
//!    inhibited as its predecessors are visited. Callbacks compose at runtime
//!    through [`Combination`].
//!
//! Branching is cheap because generators *fork*: per-node state is kept in
//! copy-on-write layers chained behind shared frozen parents, so forking a
//! branch is O(1) and each branch pays only for the states it actually
//! touches.
//!
//! # Determinism
//!
//! Given identical construction order of nodes and edges, two independent
//! enumerations produce identical ordinal-to-permutation maps. No code path
//! that influences enumeration order iterates a hash table.
//!
//! # Example
//!
//! Two independent events `a` and `b` must both occur before `c`:
//!
//! ```
//! use interleave_search::{AvailableAll, Graph, GraphPermutation, Permutations};
//! use num_bigint::BigUint;
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! let c = graph.add_node("c");
//! graph.add_edge(a, c);
//! graph.add_edge(b, c);
//! graph.set_callback(c, Box::new(AvailableAll::new([a, b])));
//!
//! let mut permutations = Permutations::new(GraphPermutation::new(&graph, [a, b]));
//! let mut orderings = Vec::new();
//! permutations.for_each(&mut |_n: &BigUint, perm: &[_]| {
//!     // the permutation buffer is reused, so copy it to retain it
//!     orderings.push(graph.values(perm));
//! });
//!
//! assert_eq!(orderings.len(), 2);
//! assert!(orderings.contains(&vec![&"a", &"b", &"c"]));
//! assert!(orderings.contains(&vec![&"b", &"a", &"c"]));
//! ```

pub mod callback;
pub mod engine;
pub mod generator;
pub mod graph;
pub mod statistics;

// Re-export commonly used types
pub use callback::{
    AvailableAll, AvailableAny, Callback, Combination, Combiner, InhibitAll, InhibitAny,
    InhibitThenAvailable, StateChange,
};
pub use engine::{Error, PermutationConsumer, Permutations};
pub use generator::{GraphPermutation, OptionGenerator, SimplePermutation};
pub use graph::{Graph, NodeId};
