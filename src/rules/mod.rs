//! Game rules as pure functions over engine state.
//!
//! - `legal_actions`: what may be done with a drawn or public card
//! - `apply_change`: the change-card dice effect
//! - `ScoreBoard`: colour ownership and the winner tie-break chain
//!
//! `Game` owns the state and calls into these; none of them mutate anything
//! beyond the arguments they are handed.

pub mod change;
pub mod legal;
pub mod scoring;

pub use change::{
    apply_change, plan_change, required_picks, ChangeSelection, ColorPick, Dice, Sign, STARTING_DIE,
};
pub use legal::legal_actions;
pub use scoring::{score_for, ColorScore, PlayerScore, ScoreBoard, TIEBREAK_COLORS};
