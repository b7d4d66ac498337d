//! Round configuration.
//!
//! - `DealConfig`: player count and the two deck-thinning knobs
//! - `GameConfig`: deal knobs plus the seed that drives the shuffle
//!
//! Both are plain serde types so a harness can load them from JSON.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Check that a table size is 2, 3 or 4.
pub fn validate_player_count(player_count: usize) -> Result<()> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        Ok(())
    } else {
        Err(GameError::config(format!(
            "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {player_count}"
        )))
    }
}

/// Cards dealt away unseen before play: 21, 12 or 7 for 2, 3 or 4 players.
#[must_use]
pub const fn default_cards_to_remove(player_count: usize) -> usize {
    match player_count {
        2 => 21,
        3 => 12,
        _ => 7,
    }
}

/// Gold cards removed per value before shuffling: `4 - player_count`.
#[must_use]
pub const fn default_gold_to_remove(player_count: usize) -> u32 {
    4u32.saturating_sub(player_count as u32)
}

/// Turns in one turn-cycle: one to hand, one to pile, one shown per opponent.
#[must_use]
pub const fn turns_per_player(player_count: usize) -> u32 {
    player_count as u32 + 1
}

/// Parameters of a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealConfig {
    /// Number of players (2-4).
    pub player_count: usize,

    /// Cards removed unseen after the shuffle. `None` uses the table default.
    pub cards_to_remove: Option<usize>,

    /// Gold cards removed per value. `None` uses `4 - player_count`.
    pub gold_to_remove: Option<u32>,
}

impl DealConfig {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            cards_to_remove: None,
            gold_to_remove: None,
        }
    }

    #[must_use]
    pub fn with_cards_to_remove(mut self, count: usize) -> Self {
        self.cards_to_remove = Some(count);
        self
    }

    #[must_use]
    pub fn with_gold_to_remove(mut self, count: u32) -> Self {
        self.gold_to_remove = Some(count);
        self
    }

    #[must_use]
    pub fn resolved_cards_to_remove(&self) -> usize {
        self.cards_to_remove
            .unwrap_or_else(|| default_cards_to_remove(self.player_count))
    }

    #[must_use]
    pub fn resolved_gold_to_remove(&self) -> u32 {
        self.gold_to_remove
            .unwrap_or_else(|| default_gold_to_remove(self.player_count))
    }
}

/// Configuration consumed by `Game::with_config`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the deal shuffle.
    pub seed: u64,

    /// Overrides the table's default unseen-removal count.
    pub cards_to_remove: Option<usize>,

    /// Overrides the table's default gold removal.
    pub gold_to_remove: Option<u32>,
}

impl GameConfig {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            cards_to_remove: None,
            gold_to_remove: None,
        }
    }

    #[must_use]
    pub fn with_cards_to_remove(mut self, count: usize) -> Self {
        self.cards_to_remove = Some(count);
        self
    }

    #[must_use]
    pub fn with_gold_to_remove(mut self, count: u32) -> Self {
        self.gold_to_remove = Some(count);
        self
    }

    /// The deal parameters for a table of `player_count`.
    #[must_use]
    pub fn deal_config(&self, player_count: usize) -> DealConfig {
        DealConfig {
            player_count,
            cards_to_remove: self.cards_to_remove,
            gold_to_remove: self.gold_to_remove,
        }
    }
}
