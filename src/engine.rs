//! Generic map-reduce over partitions.
//!
//! Every analysis runs the same way: each partition goes to a fixed-size
//! worker pool, workers produce independent partial aggregates, and the
//! coordinator folds them together with a caller-supplied merge. Merges must
//! be commutative and associative, partials arrive in completion order.
use std::sync::mpsc;

use log::info;
use rayon::prelude::*;

use crate::error::Error;

/// Fixed-size worker pool shared by ingestion and analysis.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(n_workers: usize) -> Result<Self, Error> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_workers)
            .build()?;
        Ok(WorkerPool { pool })
    }

    /// Maps `map_fn` over every unit in parallel and folds the partial
    /// results on the calling thread.
    ///
    /// `zero` is the merge identity: an empty unit list yields it untouched.
    /// The first worker error aborts the fold.
    pub fn map_reduce<P, A, F, M>(
        &self,
        units: &[P],
        map_fn: F,
        merge_fn: M,
        zero: A,
    ) -> Result<A, Error>
    where
        P: Sync,
        A: Send,
        F: Fn(&P) -> Result<A, Error> + Send + Sync,
        M: Fn(A, A) -> A,
    {
        info!(
            "dispatching {} unit(s) to {} worker(s)",
            units.len(),
            self.pool.current_num_threads()
        );

        let (tx, rx) = mpsc::channel();
        self.pool.install(|| {
            units.par_iter().for_each_with(tx, |tx, unit| {
                // the receiver outlives the pool scope, send cannot fail
                let _ = tx.send(map_fn(unit));
            });
        });

        rx.into_iter()
            .try_fold(zero, |acc, partial| Ok(merge_fn(acc, partial?)))
    }

    /// Runs `op` inside the pool so nested parallel iterators inherit the
    /// configured worker count.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
