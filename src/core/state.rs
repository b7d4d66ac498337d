//! Game phase and the read-only snapshot observers see.
//!
//! ## Phase
//!
//! `waiting → start → next_player ⇄ turn ⇄ public → auction → end`.
//! `start` and `next_player` are transient: the engine passes through them
//! inside a single call and never rests there.
//!
//! ## GameSnapshot
//!
//! Everything an observer may know about a round at one instant: phase,
//! active seat, budget, pile sizes, the public queue, dice and hand sizes.
//! Snapshots serialize with serde and have a compact `bincode` form.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::cards::Card;
use crate::rules::Dice;

/// Macro-state of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Seats are joining.
    Waiting,
    /// Dealing (transient).
    Start,
    /// Handing the draw to the next seat (transient).
    NextPlayer,
    /// Active seat draws and resolves cards.
    Turn,
    /// Seats take the shown cards one by one.
    Public,
    /// Deck and public queue are exhausted; the pile awaits distribution.
    Auction,
    /// Round over; scoring is available.
    End,
}

impl Phase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Start => "start",
            Phase::NextPlayer => "next_player",
            Phase::Turn => "turn",
            Phase::Public => "public",
            Phase::Auction => "auction",
            Phase::End => "end",
        }
    }

    /// Phases in which `turn()` may be called.
    #[must_use]
    pub const fn is_drawing(self) -> bool {
        matches!(self, Phase::Turn | Phase::Public)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Point-in-time view of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,

    /// Seat whose turn it is; `None` before `start`.
    pub active_player: Option<PlayerId>,

    pub turns_remaining: u32,
    pub turns_per_player: u32,

    /// Turn-cycle number (0 before `start`).
    pub cycle: u32,

    pub deck_count: usize,
    pub pile_count: usize,
    pub discarded_count: usize,

    /// The shown cards, oldest first.
    pub public: Vec<Card>,

    /// Card produced by `turn()` and not yet resolved.
    pub pending: Option<Card>,

    pub dice: Dice,
    pub hand_sizes: PlayerMap<usize>,
}

impl GameSnapshot {
    #[must_use]
    pub fn public_count(&self) -> usize {
        self.public.len()
    }

    /// Cards currently accounted for across every location.
    ///
    /// A drawn card waiting for resolution is still counted, so this equals
    /// the dealt deck size at every observation point.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.deck_count
            + self.pile_count
            + self.public.len()
            + self.discarded_count
            + self.hand_sizes.values().sum::<usize>()
            + usize::from(self.pending.is_some() && self.phase == Phase::Turn)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::NextPlayer.to_string(), "next_player");
        assert_eq!(Phase::End.to_string(), "end");
        assert!(Phase::Turn.is_drawing());
        assert!(Phase::Public.is_drawing());
        assert!(!Phase::Auction.is_drawing());
    }

    #[test]
    fn test_card_total_counts_pending_draw_once() {
        let mut snapshot = GameSnapshot {
            phase: Phase::Turn,
            active_player: Some(PlayerId::new(1)),
            turns_remaining: 2,
            turns_per_player: 3,
            cycle: 1,
            deck_count: 10,
            pile_count: 1,
            discarded_count: 2,
            public: vec![Card::gold(1)],
            pending: Some(Card::gold(2)),
            dice: Dice::default(),
            hand_sizes: PlayerMap::filled(2, 1),
        };
        assert_eq!(snapshot.card_total(), 10 + 1 + 1 + 2 + 2 + 1);

        // a pending public pick is still sitting in the public queue
        snapshot.phase = Phase::Public;
        assert_eq!(snapshot.card_total(), 10 + 1 + 1 + 2 + 2);
    }

    #[test]
    fn test_snapshot_bytes_round_trip() {
        let snapshot = GameSnapshot {
            phase: Phase::Auction,
            active_player: Some(PlayerId::new(2)),
            turns_remaining: 0,
            turns_per_player: 4,
            cycle: 18,
            deck_count: 0,
            pile_count: 18,
            discarded_count: 3,
            public: Vec::new(),
            pending: None,
            dice: Dice::default(),
            hand_sizes: PlayerMap::filled(3, 17),
        };

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(GameSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }
}
