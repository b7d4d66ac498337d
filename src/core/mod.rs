//! Core engine types: seats, RNG, configuration, actions, phases, errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{InvalidSeat, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{
    default_cards_to_remove, default_gold_to_remove, turns_per_player, validate_player_count,
    DealConfig, GameConfig, MAX_PLAYERS, MIN_PLAYERS,
};
pub use action::{ActionKind, ActionRecord, ActionSet, ActionTally};
pub use state::{GameSnapshot, Phase};
pub use error::{GameError, Result};
