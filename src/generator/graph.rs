// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The dependency-graph option generator.
//!
//! A [`GraphPermutation`] walks a [`Graph`] one chosen node at a time,
//! maintaining per-branch node state (availability, inhibition, visited
//! predecessors) and the *frontier*: the ordered list of nodes currently
//! eligible to be chosen next.
//!
//! # The `generate` step
//!
//! Advancing past a chosen node has three phases:
//!
//! 1. The chosen node is inhibited and removed from the frontier, so it can
//!    never be chosen twice on one branch. This rule is also what keeps
//!    enumeration of a cyclic graph terminating.
//! 2. Each successor, in stored edge order, that is neither inhibited nor
//!    already credited with this predecessor gains the chosen node in its
//!    visited-incoming list.
//! 3. The successor's callback is consulted with the updated list and its
//!    verdict applied: `MakeAvailable` appends the node to the frontier
//!    (unless already present or inhibited), `Inhibit` removes it and
//!    permanently rules it out, `NoChange` does nothing.
//!
//! The frontier's order is therefore a function of edge insertion order and
//! discovery order alone, which is what makes the enumeration deterministic.

use crate::callback::StateChange;
use crate::graph::{Graph, NodeId};

use super::state::StateTable;
use super::OptionGenerator;

/// Option generator producing every ordering of graph nodes permitted by the
/// graph's edges and callbacks.
///
/// Starting nodes may belong to the same or to disjoint components of the
/// graph; they form the initial frontier in construction order.
#[derive(Debug)]
pub struct GraphPermutation<'g, V> {
    graph: &'g Graph<V>,
    frontier: Vec<NodeId>,
    states: StateTable,
}

impl<'g, V> GraphPermutation<'g, V> {
    /// Create a generator whose initial frontier is `starting_nodes`, in the
    /// given order. A node listed more than once is taken once.
    pub fn new(graph: &'g Graph<V>, starting_nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut generator = GraphPermutation {
            graph,
            frontier: Vec::new(),
            states: StateTable::default(),
        };
        for node in starting_nodes {
            let state = generator.states.state_mut(node);
            if state.available {
                continue;
            }
            state.available = true;
            generator.frontier.push(node);
        }
        generator
    }

    /// The nodes currently eligible to be chosen next.
    pub fn frontier(&self) -> &[NodeId] {
        &self.frontier
    }

    fn mark_chosen(&mut self, chosen: NodeId) {
        let state = self.states.state_mut(chosen);
        state.available = false;
        state.inhibited = true;
        if let Some(pos) = self.frontier.iter().position(|&n| n == chosen) {
            self.frontier.remove(pos);
        }
    }

    fn propagate(&mut self, chosen: NodeId) {
        let graph = self.graph;
        for &succ in graph.outgoing(chosen) {
            if let Some(state) = self.states.get(succ) {
                if state.inhibited {
                    continue;
                }
                if state.incoming_visited.contains(&chosen) {
                    // this predecessor has already been credited
                    continue;
                }
            }
            let state = self.states.state_mut(succ);
            state.incoming_visited.push(chosen);
            match graph.callback(succ).state_change(succ, &state.incoming_visited) {
                StateChange::NoChange => {}
                StateChange::MakeAvailable => {
                    if !state.available && !state.inhibited {
                        state.available = true;
                        self.frontier.push(succ);
                    }
                }
                StateChange::Inhibit => {
                    if state.available {
                        state.available = false;
                        let pos = self
                            .frontier
                            .iter()
                            .position(|&n| n == succ)
                            .expect("available node is on the frontier");
                        self.frontier.remove(pos);
                    }
                    state.inhibited = true;
                }
            }
        }
    }
}

impl<'g, V> OptionGenerator for GraphPermutation<'g, V> {
    type Choice = NodeId;

    fn generate(&mut self, last_chosen: Option<&NodeId>) -> Vec<NodeId> {
        if let Some(&chosen) = last_chosen {
            self.mark_chosen(chosen);
            self.propagate(chosen);
        }
        self.frontier.clone()
    }

    fn fork(&mut self) -> Self {
        GraphPermutation {
            graph: self.graph,
            frontier: self.frontier.clone(),
            states: self.states.fork(),
        }
    }
}
