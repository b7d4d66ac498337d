//! Engine error type.
//!
//! Every variant is a caller error: a documented precondition of the state
//! machine was violated. Operations check all preconditions before mutating,
//! so a returned error always leaves the game exactly as it was.

use thiserror::Error;

use super::action::{ActionKind, ActionSet};
use super::state::Phase;

/// Errors raised by dealing, the turn engine and the action resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Bad player count or removal parameters at deal/start time.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Operation invoked in a phase (or situation) that forbids it.
    #[error("`{operation}` is not allowed in phase {phase}: {reason}")]
    IllegalState {
        operation: &'static str,
        phase: Phase,
        reason: String,
    },

    /// Chosen action is not in the legal set for the current card.
    #[error("{action} is not legal here (legal: {legal})")]
    IllegalAction { action: ActionKind, legal: ActionSet },

    /// The card or public choice does not match what the engine offered.
    #[error("unexpected card: {reason}")]
    UnexpectedCard { reason: String },

    /// Colour list violates the change-card contract.
    #[error("illegal change-card selection: {reason}")]
    IllegalChangeSelection { reason: String },

    /// Auction handler did not account for every pile card exactly once.
    #[error("auction returned {got} recipients for {expected} pile cards")]
    AuctionMismatch { expected: usize, got: usize },
}

impl GameError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        GameError::InvalidConfiguration { reason: reason.into() }
    }

    pub(crate) fn state(operation: &'static str, phase: Phase, reason: impl Into<String>) -> Self {
        GameError::IllegalState {
            operation,
            phase,
            reason: reason.into(),
        }
    }

    pub(crate) fn selection(reason: impl Into<String>) -> Self {
        GameError::IllegalChangeSelection { reason: reason.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = GameError::state("turn", Phase::Waiting, "game has not started");
        assert_eq!(
            err.to_string(),
            "`turn` is not allowed in phase waiting: game has not started"
        );

        let err = GameError::IllegalAction {
            action: ActionKind::ShowCard,
            legal: [ActionKind::TakeCard, ActionKind::PileCard].into_iter().collect(),
        };
        assert_eq!(err.to_string(), "show is not legal here (legal: {take, pile})");

        let err = GameError::AuctionMismatch { expected: 3, got: 2 };
        assert_eq!(err.to_string(), "auction returned 2 recipients for 3 pile cards");
    }
}
