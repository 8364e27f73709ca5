//! Move selectors.
//!
//! Selectors enumerate the candidate moves a driver considers from the
//! current assignment, skipping moves the static filters reject.

mod move_selector;


pub use move_selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector};
