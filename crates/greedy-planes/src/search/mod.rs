//! One pass of Kernighan-Lin style greedy moving.
//!
//! A pass moves every point exactly once, always taking the cheapest move
//! available, and then rolls back to the prefix of moves with the lowest
//! cumulative cost.

mod candidates;
mod evaluator;
mod pass;

pub use candidates::Move;
pub use evaluator::MoveEvaluator;
pub use pass::{run_pass, PassReport};
