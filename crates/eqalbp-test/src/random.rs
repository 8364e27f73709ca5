//! Seeded random instances and move sequences.
//!
//! Instances are acyclic by construction: tasks are shuffled, and each task
//! may only depend on tasks earlier in the shuffled order.

use eqalbp_core::{Equipment, ProblemModel, Task};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Size parameters of a random instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceShape {
    pub tasks: usize,
    pub stations: usize,
    pub equipment_types: usize,
    /// Probability of an edge between two tasks that may be ordered.
    pub edge_probability: f64,
    /// Probability that a task's initial station is left unassigned.
    pub unassigned_probability: f64,
}

impl Default for InstanceShape {
    fn default() -> Self {
        Self {
            tasks: 20,
            stations: 5,
            equipment_types: 4,
            edge_probability: 0.15,
            unassigned_probability: 0.2,
        }
    }
}

/// A random model together with a random initial assignment.
#[derive(Debug, Clone)]
pub struct Instance {
    pub seed: u64,
    pub model: ProblemModel,
    pub initial: Vec<Option<usize>>,
}

/// Builds a reproducible random instance from `seed`.
pub fn random_instance(shape: InstanceShape, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Every type gets one pinned instance; some get a second one.
    let mut equipment = Vec::new();
    for equipment_type in 0..shape.equipment_types {
        let copies = if rng.random_bool(0.3) { 2 } else { 1 };
        for _ in 0..copies {
            let station = rng.random_range(0..shape.stations);
            equipment.push(Equipment::pinned(equipment.len(), equipment_type, station));
        }
    }

    let mut order: Vec<usize> = (0..shape.tasks).collect();
    order.shuffle(&mut rng);
    let mut dependencies = vec![Vec::new(); shape.tasks];
    for (i, &task) in order.iter().enumerate() {
        for &earlier in &order[..i] {
            if rng.random_bool(shape.edge_probability) {
                dependencies[task].push(earlier);
            }
        }
    }

    let tasks = dependencies
        .into_iter()
        .enumerate()
        .map(|(id, deps)| {
            let mut task = Task::new(id, rng.random_range(1..=30)).with_dependencies(deps);
            if shape.equipment_types > 0 {
                let required = rng.random_range(0..=2usize.min(shape.equipment_types));
                task = task.with_equipment(
                    (0..required).map(|_| rng.random_range(0..shape.equipment_types)),
                );
            }
            task
        })
        .collect();

    let model = ProblemModel::new(tasks, shape.stations, equipment)
        .expect("random instances are acyclic with dense ids");

    let initial = (0..shape.tasks)
        .map(|_| {
            if rng.random_bool(shape.unassigned_probability) {
                None
            } else {
                Some(rng.random_range(0..shape.stations))
            }
        })
        .collect();

    Instance {
        seed,
        model,
        initial,
    }
}

/// A reproducible sequence of `(task, target)` moves; `None` targets leave
/// the task unassigned.
pub fn random_moves(
    model: &ProblemModel,
    count: usize,
    unassign_probability: f64,
    seed: u64,
) -> Vec<(usize, Option<usize>)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    if model.task_count() == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let task = rng.random_range(0..model.task_count());
            let target = if rng.random_bool(unassign_probability) {
                None
            } else {
                Some(rng.random_range(0..model.station_count()))
            };
            (task, target)
        })
        .collect()
}

/// Proptest strategy over small random instances.
pub fn arb_instance() -> impl Strategy<Value = Instance> {
    (1usize..25, 1usize..7, 0usize..5, 0.0f64..0.4, any::<u64>()).prop_map(
        |(tasks, stations, equipment_types, edge_probability, seed)| {
            let shape = InstanceShape {
                tasks,
                stations,
                equipment_types,
                edge_probability,
                unassigned_probability: 0.3,
            };
            random_instance(shape, seed)
        },
    )
}
