// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Plain permutations with no dependencies between values.

use super::OptionGenerator;

/// Option generator yielding every ordering of a flat list of values.
///
/// With elements `a, b, c` every permutation is produced: `a,b,c`; `a,c,b`;
/// `b,a,c`; `b,c,a`; `c,a,b`; `c,b,a`. Useful on its own for small brute
/// force runs, and as the degenerate reference point for the dependency
/// graph generator.
#[derive(Debug, Clone)]
pub struct SimplePermutation<T> {
    remaining: Vec<T>,
}

impl<T: Clone + PartialEq> SimplePermutation<T> {
    pub fn new(elems: impl IntoIterator<Item = T>) -> Self {
        SimplePermutation {
            remaining: elems.into_iter().collect(),
        }
    }
}

impl<T: Clone + PartialEq> OptionGenerator for SimplePermutation<T> {
    type Choice = T;

    fn generate(&mut self, last_chosen: Option<&T>) -> Vec<T> {
        if let Some(last) = last_chosen {
            if let Some(pos) = self.remaining.iter().position(|e| e == last) {
                self.remaining.remove(pos);
            }
        }
        self.remaining.clone()
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}
