//! Action kinds, legal-action sets and the per-cycle action tally.
//!
//! A drawn card is resolved by exactly one `ActionKind`. The set of kinds a
//! player may choose is an `ActionSet`, a small bitset so that computing it
//! is a pure function and comparing two sets is a single integer compare.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;
use crate::cards::Card;

/// How a drawn (or public) card is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Into the active player's hand.
    TakeCard,
    /// Onto the shared pile.
    PileCard,
    /// Into the shared public queue.
    ShowCard,
    /// Into the discard; consumes the take budget.
    DiscardCard,
    /// Apply the change-card dice effect, then discard; consumes the take budget.
    UseCard,
}

impl ActionKind {
    /// Every kind, in canonical order.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::TakeCard,
        ActionKind::PileCard,
        ActionKind::ShowCard,
        ActionKind::DiscardCard,
        ActionKind::UseCard,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Short lowercase name used in logs and the simulator output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::TakeCard => "take",
            ActionKind::PileCard => "pile",
            ActionKind::ShowCard => "show",
            ActionKind::DiscardCard => "discard",
            ActionKind::UseCard => "use",
        }
    }

    /// Whether this action spends the one-take-per-cycle budget.
    #[must_use]
    pub const fn consumes_take(self) -> bool {
        matches!(
            self,
            ActionKind::TakeCard | ActionKind::DiscardCard | ActionKind::UseCard
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of action kinds.
///
/// ```
/// use libros::core::{ActionKind, ActionSet};
///
/// let mut set = ActionSet::turn_defaults();
/// assert!(set.contains(ActionKind::ShowCard));
/// set.remove(ActionKind::ShowCard);
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSet(u8);

impl ActionSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Take, pile and show: the starting point for a draw in the `turn` phase.
    #[must_use]
    pub const fn turn_defaults() -> Self {
        Self(ActionKind::TakeCard.bit() | ActionKind::PileCard.bit() | ActionKind::ShowCard.bit())
    }

    #[must_use]
    pub const fn contains(self, action: ActionKind) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn insert(&mut self, action: ActionKind) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: ActionKind) {
        self.0 &= !action.bit();
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in canonical order.
    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL.into_iter().filter(move |a| self.contains(*a))
    }

    /// The `n`th member in canonical order.
    #[must_use]
    pub fn nth(self, n: usize) -> Option<ActionKind> {
        self.iter().nth(n)
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        let mut set = ActionSet::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, action) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(action.name())?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// How many times each action was taken in the current turn-cycle.
///
/// Cleared only when a fresh turn-cycle begins, never during the public
/// cleanup sub-phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTally {
    counts: FxHashMap<ActionKind, u32>,
}

impl ActionTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn count(&self, action: ActionKind) -> u32 {
        self.counts.get(&action).copied().unwrap_or(0)
    }

    /// Record one resolution of `action`.
    ///
    /// Discarding or using a card also spends the take budget.
    pub fn record(&mut self, action: ActionKind) {
        *self.counts.entry(action).or_insert(0) += 1;
        if matches!(action, ActionKind::DiscardCard | ActionKind::UseCard) {
            *self.counts.entry(ActionKind::TakeCard).or_insert(0) += 1;
        }
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// A resolved action, kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who resolved the card.
    pub player: PlayerId,

    /// The card resolved.
    pub card: Card,

    /// The action chosen.
    pub action: ActionKind,

    /// `Turn` for drawn cards, `Public` for cleanup picks.
    pub phase: Phase,

    /// Turn-cycle number (starts at 1).
    pub cycle: u32,

    /// Sequence number within the round.
    pub sequence: u32,
}
