//! # libros
//!
//! Round engine for a turn-based card game for 2-4 players.
//!
//! A shared deck is drawn one card at a time by the active player, who must
//! resolve each card by taking it, piling it, showing it to the table,
//! discarding it or (for change cards) using it to move the scoring dice.
//! When the active player's turn-cycle is spent, the shown cards are taken
//! one by one round the table. Once the deck runs out, the pile goes to
//! auction and the round is scored.
//!
//! ## Design Principles
//!
//! 1. **Caller-driven**: the engine never chooses for a player. `turn()`
//!    produces a card and its legal actions; `resolve()` applies a choice.
//!    `DecisionPolicy` implementations supply choices for the driver helpers.
//!
//! 2. **Conserved cards**: cards only move between locations, and a failed
//!    call moves nothing.
//!
//! 3. **Deterministic**: a seed fixes the deal; the same seed and the same
//!    decisions replay the same round.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, configuration, actions, phases, errors
//! - `cards`: cards and deck construction
//! - `rules`: legal actions, the change-card effect and scoring
//! - `policy`: decision policies for seats
//! - `auction`: pile distribution at round end
//! - `game`: the round state machine

pub mod core;
pub mod cards;
pub mod rules;
pub mod policy;
pub mod auction;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng,
    DealConfig, GameConfig,
    ActionKind, ActionRecord, ActionSet, ActionTally,
    GameSnapshot, Phase,
    GameError, Result,
};

pub use crate::cards::{deal, Card, CardKind, Deck, Kind, Letter, ScoringColor};

pub use crate::rules::{
    apply_change, legal_actions, score_for,
    ChangeSelection, ColorPick, Dice, Sign,
    ColorScore, PlayerScore, ScoreBoard,
};

pub use crate::policy::{Decision, DecisionPolicy, RandomPolicy, ScriptedPolicy};

pub use crate::auction::{AuctionHandler, DiscardAuction, Recipient, RotationAuction};

pub use crate::game::{Draw, Game};
