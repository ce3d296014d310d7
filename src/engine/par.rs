// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parallel fan-out of permutations to a pool of consumer clones.
//!
//! Enumeration itself stays single-threaded; only consumption is spread
//! across workers. Permutations are copied out of the enumerator's reused
//! buffer into fixed-size batches and shipped through a bounded channel, so
//! a slow consumer applies backpressure to the walk instead of ballooning
//! memory.

use std::num::NonZeroUsize;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use num_bigint::BigUint;

use super::{OptionGenerator, PermutationConsumer, Permutations};

type Batch<T> = Vec<(BigUint, Vec<T>)>;

/// Consumer that fills batches and ships them to the worker pool.
struct BatchingConsumer<T> {
    tx: mpsc::SyncSender<Batch<T>>,
    batch: Batch<T>,
    batch_size: usize,
}

impl<T: Clone> BatchingConsumer<T> {
    fn flush(&mut self) {
        if !self.batch.is_empty() {
            let batch = std::mem::replace(&mut self.batch, Vec::with_capacity(self.batch_size));
            self.tx
                .send(batch)
                .expect("permutation workers exited before the walk finished");
        }
    }
}

impl<T: Clone> PermutationConsumer<T> for BatchingConsumer<T> {
    fn consume(&mut self, n: &BigUint, permutation: &[T]) {
        // the enumerator reuses its prefix buffer, so the batch owns copies
        self.batch.push((n.clone(), permutation.to_vec()));
        if self.batch.len() == self.batch_size {
            self.flush();
        }
    }
}

impl<G: OptionGenerator> Permutations<G> {
    /// Walk every permutation, fanning consumption out over a worker pool.
    ///
    /// One worker per unit of available parallelism is spawned, each owning
    /// a clone of `consumer`. Batches of `batch_size` permutations flow
    /// through a bounded queue; the pool always drains to completion before
    /// this method returns. Ordering of `consume` calls across workers is
    /// unspecified, so ordinals are the only reliable identity of a
    /// permutation.
    ///
    /// Very small batches thrash the queue lock; if consuming a permutation
    /// is quick, sizes in the thousands keep the workers busy. It is the
    /// caller's responsibility that clones of `consumer` are safe to run
    /// from multiple threads.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn for_each_par<C>(&mut self, batch_size: usize, consumer: C)
    where
        C: PermutationConsumer<G::Choice> + Clone + Send,
        G::Choice: Clone + Send,
    {
        assert!(batch_size > 0, "batch_size must be at least 1");
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let (tx, rx) = mpsc::sync_channel::<Batch<G::Choice>>(workers * workers);
        let rx = Arc::new(Mutex::new(rx));
        log::debug!("fanning out batches of {batch_size} permutations to {workers} workers");

        thread::scope(|scope| {
            for _ in 0..workers {
                let rx = Arc::clone(&rx);
                let mut consumer = consumer.clone();
                scope.spawn(move || loop {
                    let batch = rx.lock().expect("batch queue lock poisoned").recv();
                    match batch {
                        Ok(batch) => {
                            for (n, perm) in &batch {
                                consumer.consume(n, perm);
                            }
                        }
                        // channel closed: the walk is complete and drained
                        Err(mpsc::RecvError) => break,
                    }
                });
            }

            let mut batcher = BatchingConsumer {
                tx,
                batch: Vec::with_capacity(batch_size),
                batch_size,
            };
            self.for_each(&mut batcher);
            batcher.flush();
            // dropping the batcher closes the channel; leaving the scope
            // joins the workers
        });
    }
}
