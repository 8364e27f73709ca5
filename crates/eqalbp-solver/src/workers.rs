//! Independent parallel workers.
//!
//! Each worker gets its own [`LineSession`] forked from a template, so
//! workers share only the read-only model and filters.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::session::LineSession;

/// Runs `worker` once per seed, in parallel, each on a fresh fork of
/// `template`. Results come back in seed order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use eqalbp_config::EngineConfig;
/// use eqalbp_core::{ProblemModel, Task};
/// use eqalbp_solver::{run_workers, LineSession};
///
/// let model = ProblemModel::new(vec![Task::new(0, 2), Task::new(1, 3)], 2, Vec::new()).unwrap();
/// let template =
///     LineSession::initialize(Arc::new(model), &[Some(0), Some(0)], EngineConfig::default())
///         .unwrap();
///
/// let loads = run_workers(&template, &[1, 2, 3], |index, session| {
///     session.on_unassign(1);
///     session.on_assign(1, index % 2);
///     session.state().load(0)
/// });
/// assert_eq!(loads, vec![5, 2, 5]);
/// ```
pub fn run_workers<T, F>(template: &LineSession, seeds: &[u64], worker: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &mut LineSession) -> T + Sync + Send,
{
    info!(event = "workers_start", workers = seeds.len());
    seeds
        .par_iter()
        .enumerate()
        .map(|(index, &seed)| {
            let mut session = template.fork(seed);
            debug!(event = "worker_start", worker = index, seed);
            worker(index, &mut session)
        })
        .collect()
}

/// `count` worker seeds drawn from a generator seeded with `base`.
pub fn derive_seeds(base: u64, count: usize) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(base);
    (0..count).map(|_| rng.random()).collect()
}
