//! Hook-order bookkeeping shared by the directors.

use eqalbp_core::AssignmentState;

/// Tasks that went through `on_unassign` and may now be assigned.
///
/// A swap unassigns two tasks before assigning either, so more than one task
/// can be pending at a time. Lookups are by task index.
#[derive(Debug, Clone)]
pub(crate) struct PendingHooks {
    pending: Vec<bool>,
    count: usize,
}

impl PendingHooks {
    pub(crate) fn new(task_count: usize) -> Self {
        Self {
            pending: vec![false; task_count],
            count: 0,
        }
    }

    pub(crate) fn unassigned(&mut self, task: usize) {
        if !self.pending[task] {
            self.pending[task] = true;
            self.count += 1;
        }
    }

    /// Consumes the pending entry of `task`.
    ///
    /// # Panics
    ///
    /// Panics if `task` has no pending `on_unassign`.
    pub(crate) fn assigned(&mut self, task: usize) {
        if !self.pending[task] {
            panic!(
                "on_assign({}) called without a preceding on_unassign({})",
                task, task
            );
        }
        self.pending[task] = false;
        self.count -= 1;
    }

    pub(crate) fn clear(&mut self) {
        self.pending.fill(false);
        self.count = 0;
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.count
    }
}

/// # Panics
///
/// Panics if `task` is unknown to the assignment's model.
#[inline]
pub(crate) fn check_task(hook: &str, state: &AssignmentState, task: usize) {
    assert!(
        task < state.task_count(),
        "{}: unknown task {} (model has {} tasks)",
        hook,
        task,
        state.task_count()
    );
}

/// # Panics
///
/// Panics if `station` is out of range.
#[inline]
pub(crate) fn check_station(hook: &str, state: &AssignmentState, station: usize) {
    assert!(
        station < state.station_count(),
        "{}: unknown station {} (model has {} stations)",
        hook,
        station,
        state.station_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_swap_order() {
        let mut pending = PendingHooks::new(6);
        pending.unassigned(3);
        pending.unassigned(5);
        pending.unassigned(3);
        assert_eq!(pending.len(), 2);
        pending.assigned(5);
        pending.assigned(3);
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn test_tasks_left_unassigned_stay_bounded() {
        let mut pending = PendingHooks::new(4);
        for _ in 0..3 {
            for task in 0..4 {
                pending.unassigned(task);
            }
        }
        assert_eq!(pending.len(), 4);
        pending.assigned(2);
        assert_eq!(pending.len(), 3);
        pending.clear();
        assert_eq!(pending.len(), 0);
    }

    #[test]
    #[should_panic(expected = "without a preceding on_unassign")]
    fn test_assign_without_unassign_panics() {
        let mut pending = PendingHooks::new(3);
        pending.unassigned(1);
        pending.assigned(2);
    }

    #[test]
    #[should_panic(expected = "without a preceding on_unassign")]
    fn test_double_assign_panics() {
        let mut pending = PendingHooks::new(3);
        pending.unassigned(1);
        pending.assigned(1);
        pending.assigned(1);
    }
}
