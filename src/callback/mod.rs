// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! State-change callbacks attached to graph nodes.
//!
//! Whenever a node gains a newly visited incoming predecessor, the generator
//! consults the node's callback to decide what happens to the node: nothing,
//! it becomes available for selection, or it is inhibited and can never be
//! selected on this branch.
//!
//! The standard families cover the common dependency shapes:
//! - [`AvailableAny`]: available as soon as any predecessor is visited
//!   (the default).
//! - [`AvailableAll`]: available once every listed node has been visited
//!   (join semantics).
//! - [`InhibitAny`] / [`InhibitAll`]: the inhibiting duals.
//! - [`Combination`]: runs several callbacks against the same inputs and
//!   merges their answers through a [`Combiner`] such as
//!   [`InhibitThenAvailable`].
//!
//! Callbacks MUST be pure functions of their arguments. The engine may
//! evaluate them on any branch in any order, and branches share structure, so
//! hidden state would corrupt the enumeration.

use std::fmt::Debug;

use crate::graph::NodeId;

/// Verdict of a callback about the node it guards.
///
/// Produced each time the node gains a newly visited incoming predecessor.
/// Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Leave the node's availability exactly as it is.
    NoChange,

    /// Make the node a candidate for selection. Ignored if the node is
    /// already available or has been inhibited.
    MakeAvailable,

    /// Permanently remove the node from consideration on this branch and
    /// all of its descendants. Inhibition is sticky: it dominates any later
    /// `MakeAvailable`.
    Inhibit,
}

/// Per-node availability predicate.
///
/// `visited_incoming` lists the already-chosen predecessors that have reached
/// the node so far, in first-arrival order and duplicate-free; the
/// implementation may rely on that.
///
/// Implementations must be pure: same arguments, same answer, no side
/// effects.
pub trait Callback: Debug + Send + Sync {
    fn state_change(&self, node: NodeId, visited_incoming: &[NodeId]) -> StateChange;
}

/// Always answers [`StateChange::MakeAvailable`]: the node becomes eligible
/// as soon as its first predecessor is visited. This is the default callback
/// for every new node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailableAny;

impl Callback for AvailableAny {
    fn state_change(&self, _node: NodeId, _visited_incoming: &[NodeId]) -> StateChange {
        StateChange::MakeAvailable
    }
}

/// Answers [`StateChange::MakeAvailable`] once every required node has been
/// visited, and [`StateChange::NoChange`] until then. Never inhibits.
///
/// With the required set equal to the node's full incoming edge list this is
/// classic join semantics: the node waits for all of its predecessors.
#[derive(Debug, Clone)]
pub struct AvailableAll {
    required: Vec<NodeId>,
}

impl AvailableAll {
    pub fn new(required: impl IntoIterator<Item = NodeId>) -> Self {
        AvailableAll {
            required: required.into_iter().collect(),
        }
    }
}

impl Callback for AvailableAll {
    fn state_change(&self, _node: NodeId, visited_incoming: &[NodeId]) -> StateChange {
        if self.required.iter().all(|r| visited_incoming.contains(r)) {
            StateChange::MakeAvailable
        } else {
            StateChange::NoChange
        }
    }
}

/// Always answers [`StateChange::Inhibit`]: the first visited predecessor
/// permanently rules the node out.
#[derive(Debug, Clone, Copy, Default)]
pub struct InhibitAny;

impl Callback for InhibitAny {
    fn state_change(&self, _node: NodeId, _visited_incoming: &[NodeId]) -> StateChange {
        StateChange::Inhibit
    }
}

/// Answers [`StateChange::Inhibit`] once every required node has been
/// visited, and [`StateChange::NoChange`] until then.
#[derive(Debug, Clone)]
pub struct InhibitAll {
    required: Vec<NodeId>,
}

impl InhibitAll {
    pub fn new(required: impl IntoIterator<Item = NodeId>) -> Self {
        InhibitAll {
            required: required.into_iter().collect(),
        }
    }
}

impl Callback for InhibitAll {
    fn state_change(&self, _node: NodeId, visited_incoming: &[NodeId]) -> StateChange {
        if self.required.iter().all(|r| visited_incoming.contains(r)) {
            StateChange::Inhibit
        } else {
            StateChange::NoChange
        }
    }
}

/// Merges the verdicts of several callbacks evaluated against the same
/// inputs.
///
/// Receives the sub-callbacks themselves alongside their results, so a
/// combiner can weight particular callbacks differently if it needs to.
pub trait Combiner: Debug + Send + Sync {
    fn combine(
        &self,
        node: NodeId,
        visited_incoming: &[NodeId],
        callbacks: &[Box<dyn Callback>],
        results: &[StateChange],
    ) -> StateChange;
}

/// Runs every registered sub-callback against the same inputs and delegates
/// the merged verdict to a [`Combiner`].
///
/// # Example
///
/// A node that becomes available after either of two predecessors, unless a
/// third has already been visited:
///
/// ```
/// use interleave_search::callback::{
///     AvailableAll, Combination, InhibitAll, InhibitThenAvailable,
/// };
/// use interleave_search::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// let veto = graph.add_node("veto");
/// let guarded = graph.add_node("guarded");
///
/// let callback = Combination::new(InhibitThenAvailable)
///     .add_callback(Box::new(InhibitAll::new([veto])))
///     .add_callback(Box::new(AvailableAll::new([a])))
///     .add_callback(Box::new(AvailableAll::new([b])));
/// graph.set_callback(guarded, Box::new(callback));
/// ```
#[derive(Debug)]
pub struct Combination<C> {
    combiner: C,
    callbacks: Vec<Box<dyn Callback>>,
}

impl<C: Combiner> Combination<C> {
    pub fn new(combiner: C) -> Self {
        Combination {
            combiner,
            callbacks: Vec::new(),
        }
    }

    /// Register another sub-callback. Evaluation order is registration
    /// order, though the provided combiners are order-insensitive.
    pub fn add_callback(mut self, callback: Box<dyn Callback>) -> Self {
        self.callbacks.push(callback);
        self
    }
}

impl<C: Combiner> Callback for Combination<C> {
    fn state_change(&self, node: NodeId, visited_incoming: &[NodeId]) -> StateChange {
        let results: Vec<StateChange> = self
            .callbacks
            .iter()
            .map(|cb| cb.state_change(node, visited_incoming))
            .collect();
        self.combiner
            .combine(node, visited_incoming, &self.callbacks, &results)
    }
}

/// Combiner giving inhibition strict precedence: any `Inhibit` wins; failing
/// that, any `MakeAvailable` wins; otherwise `NoChange`.
///
/// Note for authors of novel combiners: a `MakeAvailable` accompanied by any
/// number of `NoChange` sub-results is treated exactly like `MakeAvailable`
/// alone. Sub-result order never matters here.
#[derive(Debug, Clone, Copy, Default)]
pub struct InhibitThenAvailable;

impl Combiner for InhibitThenAvailable {
    fn combine(
        &self,
        _node: NodeId,
        _visited_incoming: &[NodeId],
        _callbacks: &[Box<dyn Callback>],
        results: &[StateChange],
    ) -> StateChange {
        if results.contains(&StateChange::Inhibit) {
            StateChange::Inhibit
        } else if results.contains(&StateChange::MakeAvailable) {
            StateChange::MakeAvailable
        } else {
            StateChange::NoChange
        }
    }
}
