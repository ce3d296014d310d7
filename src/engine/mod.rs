// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The permutation enumerator.
//!
//! [`Permutations`] drives an [`OptionGenerator`] depth-first over every
//! complete sequence of choices it permits. The walk uses an explicit
//! worklist of frames rather than recursion, and a single prefix buffer that
//! is truncated and extended as frames at different depths are popped.
//!
//! # Ordinals
//!
//! Every permutation has a unique number, assigned mixed-radix: a frame that
//! offers `k` options at cumulative place value `c` gives option `i` the
//! ordinal contribution `i * c` and multiplies the place value by `k` for
//! the next step. The assignment depends only on each option's position in
//! its frontier, never on the order frames happen to be popped, and
//! [`Permutations::permutation`] inverts it to regenerate any permutation
//! from its ordinal alone.
//!
//! Ordinals grow factorially with the breadth of the choice tree, so they
//! are arbitrary-precision [`BigUint`]s throughout.
//!
//! # Branching
//!
//! When a frame offers several options, the first child reuses the frame's
//! own generator in place and every further child receives a fork. Children
//! are pushed in frontier order onto a LIFO worklist, so the reused
//! generator is not advanced until all forked siblings have completed their
//! subtrees.
//!
//! # Example
//!
//! ```
//! use interleave_search::{Permutations, SimplePermutation};
//! use num_bigint::BigUint;
//!
//! let mut permutations = Permutations::new(SimplePermutation::new(["a", "b", "c"]));
//! let mut count = 0u64;
//! permutations.for_each(&mut |_n: &BigUint, perm: &[&str]| {
//!     assert_eq!(perm.len(), 3);
//!     count += 1;
//! });
//! assert_eq!(count, 6);
//!
//! // any emitted ordering can be regenerated from its ordinal
//! let third = permutations.permutation(&BigUint::from(3u32)).unwrap();
//! assert_eq!(third.len(), 3);
//! ```

mod consumer;
mod par;

pub use consumer::PermutationConsumer;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::generator::OptionGenerator;
use crate::statistics::{Counters, Statistics};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("permutation ordinal {ordinal} is out of range for this generator")]
    OrdinalOutOfRange { ordinal: BigUint },
}

/// One branch point of the depth-first walk.
struct Frame<G: OptionGenerator> {
    /// Partial ordinal of this branch.
    n: BigUint,
    /// Prefix length once this frame's own choice is appended.
    depth: usize,
    /// The choice that produced this frame. Absent only at the root.
    value: Option<G::Choice>,
    /// Generator state reflecting the prefix up to, but not including, this
    /// frame's own choice.
    generator: G,
    /// Product of the option counts of all ancestor frames: the mixed-radix
    /// place value for choices made below this frame.
    cumu_opts: BigUint,
}

/// Iterator-of-sorts over every permutation an [`OptionGenerator`] permits.
///
/// Construct with [`Permutations::new`], then iterate with
/// [`for_each`](Permutations::for_each) or
/// [`for_each_par`](Permutations::for_each_par), or regenerate a single
/// permutation from its ordinal with
/// [`permutation`](Permutations::permutation).
pub struct Permutations<G: OptionGenerator> {
    generator: G,
    statistics: Statistics,
}

impl<G: OptionGenerator> Permutations<G> {
    pub fn new(generator: G) -> Self {
        Permutations {
            generator,
            statistics: Statistics::new(),
        }
    }

    /// Walk every permutation in the calling thread, invoking
    /// `consumer.consume(n, perm)` once per completed permutation.
    ///
    /// The `perm` slice is reused between invocations; consumers that retain
    /// permutations must copy them.
    pub fn for_each<C>(&mut self, consumer: &mut C)
    where
        C: PermutationConsumer<G::Choice>,
    {
        self.statistics = Statistics::new();
        let mut perm: Vec<G::Choice> = Vec::new();
        let mut worklist = vec![Frame {
            n: BigUint::zero(),
            depth: 0,
            value: None,
            generator: self.generator.fork(),
            cumu_opts: BigUint::one(),
        }];

        while let Some(frame) = worklist.pop() {
            let Frame {
                n,
                depth,
                value,
                mut generator,
                cumu_opts,
            } = frame;
            self.statistics.increment(Counters::Frames);

            // rebuild the prefix for this branch: drop deeper siblings'
            // choices, then append our own
            perm.truncate(depth.saturating_sub(1));
            if let Some(value) = &value {
                perm.push(value.clone());
            }

            let options = generator.generate(value.as_ref());
            if options.is_empty() {
                self.statistics.increment(Counters::Leaves);
                consumer.consume(&n, &perm);
                continue;
            }

            let count = options.len();
            let child_cumu = &cumu_opts * BigUint::from(count);
            let mut forks = Vec::with_capacity(count - 1);
            for _ in 1..count {
                forks.push(generator.fork());
                self.statistics.increment(Counters::Forks);
            }
            let mut forks = forks.into_iter();
            let mut reused = Some(generator);

            for (idx, option) in options.into_iter().enumerate() {
                let child_n = if count == 1 {
                    n.clone()
                } else {
                    &n + BigUint::from(idx) * &cumu_opts
                };
                // option 0 inherits this frame's generator; pushed first, it
                // is popped last, after every forked sibling has finished
                let generator = match reused.take() {
                    Some(generator) => generator,
                    None => forks.next().expect("one fork per remaining option"),
                };
                worklist.push(Frame {
                    n: child_n,
                    depth: depth + 1,
                    value: Some(option),
                    generator,
                    cumu_opts: child_cumu.clone(),
                });
            }
        }

        log::debug!(
            "enumeration complete: {} permutations over {} frames ({} forks)",
            self.statistics.get(Counters::Leaves),
            self.statistics.get(Counters::Frames),
            self.statistics.get(Counters::Forks),
        );
    }

    /// Regenerate the single permutation with ordinal `n`.
    ///
    /// This is the inverse of the ordinal assignment performed by
    /// [`for_each`](Permutations::for_each): at each step the next choice
    /// index is `n mod k` and `n` shrinks to `n div k`, where `k` is the
    /// number of options at that step.
    ///
    /// Iterating a range of ordinals through this method is slower than
    /// [`for_each`](Permutations::for_each), which shares generator state
    /// between permutations with common prefixes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrdinalOutOfRange`] if `n` is not the ordinal of any
    /// permutation, i.e. `n` was not consumed exactly by the time the
    /// generator completed.
    pub fn permutation(&mut self, n: &BigUint) -> Result<Vec<G::Choice>, Error> {
        let mut remaining = n.clone();
        let mut generator = self.generator.fork();
        let mut last: Option<G::Choice> = None;
        let mut perm = Vec::new();

        loop {
            let mut options = generator.generate(last.as_ref());
            if options.is_empty() {
                if remaining.is_zero() {
                    return Ok(perm);
                }
                return Err(Error::OrdinalOutOfRange { ordinal: n.clone() });
            }
            let count = BigUint::from(options.len());
            let choice = (&remaining % &count)
                .to_usize()
                .expect("choice index is below an in-memory option count");
            remaining /= &count;

            let value = options.swap_remove(choice);
            perm.push(value.clone());
            last = Some(value);
            generator = generator.fork();
        }
    }

    /// Tallies from the most recent [`for_each`](Permutations::for_each)
    /// walk.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}
