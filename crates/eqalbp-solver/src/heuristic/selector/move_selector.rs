//! Typed move selectors.

use std::fmt::Debug;
use std::sync::Arc;

use rand::Rng;
use smallvec::SmallVec;

use eqalbp_scoring::ScoreDirector;

use crate::heuristic::filter::{is_independent_pair, StationWindowFilters};
use crate::heuristic::r#move::{ChangeMove, Move, SwapMove};

/// A selector that yields moves of type `M` for the current assignment.
pub trait MoveSelector<M: Move>: Send + Debug {
    /// Returns an iterator over every doable, filter-accepted move.
    fn iter_moves<'a, D: ScoreDirector + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> impl Iterator<Item = M> + 'a;

    /// Returns the number of moves `iter_moves` yields.
    fn size<D: ScoreDirector + ?Sized>(&self, score_director: &D) -> usize {
        self.iter_moves(score_director).count()
    }

    /// Picks one move uniformly from `iter_moves`, or `None` if there is none.
    fn random_move<D: ScoreDirector + ?Sized, R: Rng + ?Sized>(
        &self,
        score_director: &D,
        rng: &mut R,
    ) -> Option<M> {
        pick_uniform(self.iter_moves(score_director), rng)
    }
}

fn pick_uniform<M, R: Rng + ?Sized>(moves: impl Iterator<Item = M>, rng: &mut R) -> Option<M> {
    let mut moves: Vec<M> = moves.collect();
    if moves.is_empty() {
        return None;
    }
    let index = rng.random_range(0..moves.len());
    Some(moves.swap_remove(index))
}

/// Generates [`ChangeMove`]s to every accepted station other than the
/// current one, plus unassign moves when enabled.
///
/// Without filters (movable equipment) every station is a candidate.
#[derive(Debug, Clone, Default)]
pub struct ChangeMoveSelector {
    filters: Option<Arc<StationWindowFilters>>,
    allow_unassign: bool,
}

impl ChangeMoveSelector {
    pub fn new(filters: Option<Arc<StationWindowFilters>>) -> Self {
        Self {
            filters,
            allow_unassign: false,
        }
    }

    /// Also yield moves that unassign an assigned task.
    pub fn with_unassign(mut self, allow_unassign: bool) -> Self {
        self.allow_unassign = allow_unassign;
        self
    }

    #[inline]
    fn accepts(&self, task: usize, station: usize) -> bool {
        self.filters
            .as_ref()
            .map_or(true, |filters| filters.is_feasible_move(task, station))
    }
}

impl MoveSelector<ChangeMove> for ChangeMoveSelector {
    fn iter_moves<'a, D: ScoreDirector + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> impl Iterator<Item = ChangeMove> + 'a {
        let state = score_director.state();
        let station_count = state.station_count();
        let allow_unassign = self.allow_unassign;

        (0..state.task_count()).flat_map(move |task| {
            let current = state.station_of(task);
            let unassign =
                (allow_unassign && current.is_some()).then(|| ChangeMove::new(task, None));
            (0..station_count)
                .filter(move |&station| current != Some(station) && self.accepts(task, station))
                .map(move |station| ChangeMove::new(task, Some(station)))
                .chain(unassign)
        })
    }

    /// Samples a task, then one of its candidate targets. Falls back to a
    /// full enumeration when sampling keeps hitting tasks with no candidate.
    fn random_move<D: ScoreDirector + ?Sized, R: Rng + ?Sized>(
        &self,
        score_director: &D,
        rng: &mut R,
    ) -> Option<ChangeMove> {
        let state = score_director.state();
        let task_count = state.task_count();

        for _ in 0..task_count {
            let task = rng.random_range(0..task_count);
            let current = state.station_of(task);
            let stations: SmallVec<[usize; 16]> = (0..state.station_count())
                .filter(|&station| current != Some(station) && self.accepts(task, station))
                .collect();
            let options = stations.len() + usize::from(self.allow_unassign && current.is_some());
            if options == 0 {
                continue;
            }
            // One past the stations means unassign
            let pick = rng.random_range(0..options);
            return Some(ChangeMove::new(task, stations.get(pick).copied()));
        }
        pick_uniform(self.iter_moves(score_director), rng)
    }
}

/// Generates [`SwapMove`]s between tasks on different stations that do not
/// depend on each other.
///
/// With filters, each task must also be accepted at the other's station.
#[derive(Debug, Clone, Default)]
pub struct SwapMoveSelector {
    filters: Option<Arc<StationWindowFilters>>,
}

impl SwapMoveSelector {
    pub fn new(filters: Option<Arc<StationWindowFilters>>) -> Self {
        Self { filters }
    }

    fn accepts<D: ScoreDirector + ?Sized>(&self, score_director: &D, m: &SwapMove) -> bool {
        if !m.is_doable(score_director) {
            return false;
        }
        let (left, right) = (m.left(), m.right());
        let Some(filters) = &self.filters else {
            return is_independent_pair(score_director.model(), left, right);
        };
        if !filters.is_feasible_swap(left, right) {
            return false;
        }
        let state = score_director.state();
        let lands = |task: usize, station: Option<usize>| {
            station.map_or(true, |s| filters.is_feasible_move(task, s))
        };
        lands(left, state.station_of(right)) && lands(right, state.station_of(left))
    }
}

impl MoveSelector<SwapMove> for SwapMoveSelector {
    fn iter_moves<'a, D: ScoreDirector + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> impl Iterator<Item = SwapMove> + 'a {
        let task_count = score_director.state().task_count();
        (0..task_count)
            .flat_map(move |left| {
                (left + 1..task_count).map(move |right| SwapMove::new(left, right))
            })
            .filter(move |m| self.accepts(score_director, m))
    }

    /// Samples random pairs, falling back to a full enumeration.
    fn random_move<D: ScoreDirector + ?Sized, R: Rng + ?Sized>(
        &self,
        score_director: &D,
        rng: &mut R,
    ) -> Option<SwapMove> {
        let task_count = score_director.state().task_count();
        if task_count < 2 {
            return None;
        }
        for _ in 0..task_count {
            let left = rng.random_range(0..task_count);
            let right = rng.random_range(0..task_count);
            let m = SwapMove::new(left.min(right), left.max(right));
            if self.accepts(score_director, &m) {
                return Some(m);
            }
        }
        pick_uniform(self.iter_moves(score_director), rng)
    }
}
