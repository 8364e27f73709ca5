//! Move trait definition.

use std::fmt::Debug;

use eqalbp_scoring::ScoreDirector;

/// A change to the station of one or more tasks.
///
/// Undo is explicit: [`do_move`](Move::do_move) returns whatever
/// [`undo_move`](Move::undo_move) needs to restore the previous assignment,
/// which lets a driver try a move, read the score and revert it.
pub trait Move: Send + Sync + Debug {
    /// State captured by `do_move` for `undo_move`.
    type Undo: Debug;

    /// Returns true if this move would change the assignment.
    fn is_doable<D: ScoreDirector + ?Sized>(&self, score_director: &D) -> bool;

    /// Executes this move through the score director's hooks.
    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) -> Self::Undo;

    /// Reverts a preceding `do_move` of this move.
    fn undo_move<D: ScoreDirector + ?Sized>(&self, undo: Self::Undo, score_director: &mut D);

    /// Returns the tasks involved in this move.
    fn task_indices(&self) -> &[usize];
}
