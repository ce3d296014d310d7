// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Consumers of enumerated permutations.

use num_bigint::BigUint;

/// Receiver for the permutations produced by
/// [`Permutations::for_each`](crate::Permutations::for_each) and
/// [`Permutations::for_each_par`](crate::Permutations::for_each_par).
///
/// `n` is the permutation's unique ordinal. Both arguments should be treated
/// as read-only views: the `permutation` slice aliases a buffer the
/// enumerator reuses for the next permutation, so a consumer that retains it
/// must copy it first.
///
/// Any `FnMut(&BigUint, &[T])` closure is a consumer.
pub trait PermutationConsumer<T> {
    fn consume(&mut self, n: &BigUint, permutation: &[T]);
}

impl<T, F> PermutationConsumer<T> for F
where
    F: FnMut(&BigUint, &[T]),
{
    fn consume(&mut self, n: &BigUint, permutation: &[T]) {
        self(n, permutation)
    }
}
