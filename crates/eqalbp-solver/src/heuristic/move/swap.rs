//! SwapMove - exchanges the stations of two tasks.

use eqalbp_scoring::ScoreDirector;

use super::Move;

/// A move that exchanges the stations of two tasks.
///
/// Either task may be unassigned; the other then ends up unassigned. Swapping
/// again restores the previous assignment. Swapping a task with itself does
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    tasks: [usize; 2],
}

impl SwapMove {
    pub fn new(left: usize, right: usize) -> Self {
        Self {
            tasks: [left, right],
        }
    }

    pub fn left(&self) -> usize {
        self.tasks[0]
    }

    pub fn right(&self) -> usize {
        self.tasks[1]
    }

    fn swap<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        let [left, right] = self.tasks;
        if left == right {
            return;
        }
        let left_station = score_director.state().station_of(left);
        let right_station = score_director.state().station_of(right);

        score_director.on_unassign(left);
        score_director.on_unassign(right);
        if let Some(station) = right_station {
            score_director.on_assign(left, station);
        }
        if let Some(station) = left_station {
            score_director.on_assign(right, station);
        }
    }
}

impl Move for SwapMove {
    type Undo = ();

    fn is_doable<D: ScoreDirector + ?Sized>(&self, score_director: &D) -> bool {
        let [left, right] = self.tasks;
        let state = score_director.state();
        left != right && state.station_of(left) != state.station_of(right)
    }

    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        self.swap(score_director);
    }

    fn undo_move<D: ScoreDirector + ?Sized>(&self, _undo: (), score_director: &mut D) {
        self.swap(score_director);
    }

    fn task_indices(&self) -> &[usize] {
        &self.tasks
    }
}
