//! Move system for modifying the assignment.
//!
//! Every move reports its changes to a [`ScoreDirector`] as
//! `on_unassign`/`on_assign` pairs, so the director's score always matches
//! the assignment.
//!
//! # Move Types
//!
//! - [`ChangeMove`]: moves one task to another station, or unassigns it
//! - [`SwapMove`]: exchanges the stations of two tasks
//!
//! [`ScoreDirector`]: eqalbp_scoring::ScoreDirector

mod change;
mod swap;
mod traits;

#[cfg(test)]
mod tests;

pub use change::ChangeMove;
pub use swap::SwapMove;
pub use traits::Move;
