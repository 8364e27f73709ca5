//! ChangeMove - moves a task to a station.

use eqalbp_scoring::ScoreDirector;

use super::Move;

/// A move that puts a task on a station, or unassigns it when `to` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeMove {
    task: usize,
    to: Option<usize>,
}

impl ChangeMove {
    pub fn new(task: usize, to: Option<usize>) -> Self {
        Self { task, to }
    }

    pub fn task(&self) -> usize {
        self.task
    }

    /// Returns the target station.
    pub fn to_station(&self) -> Option<usize> {
        self.to
    }
}

/// Moves `task` to `station`, issuing the hook pair.
pub(crate) fn reassign<D: ScoreDirector + ?Sized>(
    score_director: &mut D,
    task: usize,
    station: Option<usize>,
) {
    score_director.on_unassign(task);
    if let Some(station) = station {
        score_director.on_assign(task, station);
    }
}

impl Move for ChangeMove {
    /// The station the task left.
    type Undo = Option<usize>;

    fn is_doable<D: ScoreDirector + ?Sized>(&self, score_director: &D) -> bool {
        score_director.state().station_of(self.task) != self.to
    }

    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) -> Option<usize> {
        let from = score_director.state().station_of(self.task);
        reassign(score_director, self.task, self.to);
        from
    }

    fn undo_move<D: ScoreDirector + ?Sized>(&self, from: Option<usize>, score_director: &mut D) {
        reassign(score_director, self.task, from);
    }

    fn task_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.task)
    }
}
