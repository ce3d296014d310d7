// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-branch node state with copy-on-write structural sharing.
//!
//! Every branch of the enumeration owns a [`StateTable`]: a small local map
//! of the node states this branch has touched, chained to the frozen tables
//! of the branches it forked from. Lookups walk the chain; mutation first
//! copies the found state into the local map. Frozen layers sit behind `Rc`
//! and are never written again, so branch isolation is enforced by the type
//! system rather than by discipline.
//!
//! Forking is O(1): the forking table freezes its local layer onto the chain
//! and both sides continue with empty local maps over the shared parent.

use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use crate::graph::NodeId;

/// Enumeration state of a single node on a single branch.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeState {
    /// True iff the node is currently a candidate in the frontier.
    pub available: bool,
    /// Sticky: once set, the node can never rejoin the frontier on this
    /// branch or any branch forked from it.
    pub inhibited: bool,
    /// Already-chosen predecessors that have reached this node, in
    /// first-arrival order, duplicate-free.
    pub incoming_visited: Vec<NodeId>,
}

/// Chained copy-on-write map from node to [`NodeState`].
///
/// The map is never iterated, only probed by id, so it has no influence on
/// enumeration order.
#[derive(Debug, Default)]
pub(crate) struct StateTable {
    local: HashMap<NodeId, NodeState>,
    parent: Option<Rc<StateTable>>,
}

impl StateTable {
    /// Look up the current state of `node`, walking the parent chain.
    pub fn get(&self, node: NodeId) -> Option<&NodeState> {
        if let Some(state) = self.local.get(&node) {
            return Some(state);
        }
        let mut table = self.parent.as_deref();
        while let Some(t) = table {
            if let Some(state) = t.local.get(&node) {
                return Some(state);
            }
            table = t.parent.as_deref();
        }
        None
    }

    /// Mutable access to the state of `node`, copying it into the local
    /// layer first if an ancestor owns it. Creates a fresh default state if
    /// the node has never been touched on this branch.
    pub fn state_mut(&mut self, node: NodeId) -> &mut NodeState {
        if !self.local.contains_key(&node) {
            let inherited = self
                .parent
                .as_deref()
                .and_then(|p| p.get(node))
                .cloned()
                .unwrap_or_default();
            self.local.insert(node, inherited);
        }
        self.local.get_mut(&node).expect("state inserted above")
    }

    /// Freeze the local layer and split off a sibling table over the shared
    /// frozen chain.
    pub fn fork(&mut self) -> StateTable {
        if !self.local.is_empty() {
            let frozen = Rc::new(StateTable {
                local: mem::take(&mut self.local),
                parent: self.parent.take(),
            });
            self.parent = Some(Rc::clone(&frozen));
        }
        StateTable {
            local: HashMap::new(),
            parent: self.parent.clone(),
        }
    }
}
