// Score director trait definition.

use eqalbp_core::{AssignmentState, HardMediumSoftScore, ProblemModel};

use crate::calculation::{ScoreAggregates, ScorePhase};

// The score director manages the assignment and score calculation.
//
// It is responsible for:
// - Maintaining the working assignment
// - Calculating scores (incrementally when possible)
// - Latching the construction → local-search phase switch
//
// Every reassignment is reported as `on_unassign(task)` followed, unless the
// task is left unassigned, by `on_assign(task, station)`. This holds for
// no-op moves to the same station too.
pub trait ScoreDirector: Send {
    // Returns the problem model.
    fn model(&self) -> &ProblemModel;

    // Returns the working assignment.
    fn state(&self) -> &AssignmentState;

    // Removes `task` from its station.
    //
    // Panics if `task` is unknown to the model.
    fn on_unassign(&mut self, task: usize);

    // Puts `task`, previously passed to `on_unassign`, on `station`.
    //
    // Panics if `task` or `station` is unknown, or if `task` has no pending
    // `on_unassign`.
    fn on_assign(&mut self, task: usize, station: usize);

    // Calculates and returns the current score.
    fn score(&mut self) -> HardMediumSoftScore;

    // Returns the aggregates behind the current score.
    fn aggregates(&self) -> ScoreAggregates;

    // Returns the current phase.
    fn phase(&self) -> ScorePhase;

    // Recomputes every aggregate from the working assignment.
    fn reset_from_scratch(&mut self);

    // Returns true if this score director supports incremental scoring.
    fn is_incremental(&self) -> bool {
        false
    }
}
