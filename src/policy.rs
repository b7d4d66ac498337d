//! Decision policies: how a seat picks an action or a public card.
//!
//! The engine never decides for a player. When it needs a choice it asks the
//! seat's `DecisionPolicy`:
//! - `choose_action`: one member of the legal set for a card, plus a colour
//!   selection when the choice is `UseCard`
//! - `choose_public_card`: an index into the public queue during cleanup
//!
//! Policies are trusted to answer but not to answer correctly: the engine
//! validates every decision and rejects illegal ones.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, ScoringColor};
use crate::core::{ActionKind, ActionSet, GameRng};
use crate::rules::{required_picks, ChangeSelection, ColorPick, Sign};

/// A chosen action and, for `UseCard`, its colour selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ActionKind,
    pub selection: ChangeSelection,
}

impl Decision {
    /// An action with no colour selection.
    #[must_use]
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            selection: ChangeSelection::none(),
        }
    }

    /// `UseCard` with the given colours.
    #[must_use]
    pub fn use_card(selection: ChangeSelection) -> Self {
        Self {
            action: ActionKind::UseCard,
            selection,
        }
    }
}

/// Chooses actions for one seat.
pub trait DecisionPolicy: Send {
    /// Pick an action for `card` from `legal`.
    fn choose_action(&mut self, card: &Card, legal: ActionSet) -> Decision;

    /// Pick one of the public `candidates` by index.
    fn choose_public_card(&mut self, candidates: &[Card]) -> usize;

    /// Short name for logs.
    fn name(&self) -> &str {
        "policy"
    }
}

// =============================================================================
// Random Policy
// =============================================================================

/// Uniformly random legal choices.
///
/// `UseCard` comes with a random selection of the right shape, so every
/// decision this policy makes is accepted by the engine.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    fn random_color(&mut self) -> ScoringColor {
        ScoringColor::ALL[self.rng.below(ScoringColor::ALL.len())]
    }

    fn random_selection(&mut self, card: &Card) -> ChangeSelection {
        if card.value() == 0 {
            let sign = if self.rng.flip() { Sign::Plus } else { Sign::Minus };
            return ChangeSelection::signed(sign, self.random_color());
        }
        (0..required_picks(card.value()))
            .map(|_| ColorPick::plain(self.random_color()))
            .collect()
    }
}

impl DecisionPolicy for RandomPolicy {
    fn choose_action(&mut self, card: &Card, legal: ActionSet) -> Decision {
        let Some(action) = legal.nth(self.rng.below(legal.len())) else {
            // nothing legal; the engine will reject whatever comes back
            return Decision::new(ActionKind::TakeCard);
        };
        match action {
            ActionKind::UseCard => Decision::use_card(self.random_selection(card)),
            other => Decision::new(other),
        }
    }

    fn choose_public_card(&mut self, candidates: &[Card]) -> usize {
        self.rng.below(candidates.len())
    }

    fn name(&self) -> &str {
        "random"
    }
}

// =============================================================================
// Scripted Policy
// =============================================================================

/// Replays queued decisions, then falls back to the first legal action and
/// the oldest public card.
///
/// Queued decisions are returned as-is, legal or not, so tests can drive the
/// engine into its error paths.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    actions: VecDeque<Decision>,
    public_picks: VecDeque<usize>,
}

impl ScriptedPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue action decisions, answered in order.
    #[must_use]
    pub fn with_actions(mut self, decisions: impl IntoIterator<Item = Decision>) -> Self {
        self.actions.extend(decisions);
        self
    }

    /// Queue public-card indices, answered in order.
    #[must_use]
    pub fn with_public_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.public_picks.extend(picks);
        self
    }

    /// Decisions not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.actions.len() + self.public_picks.len()
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn choose_action(&mut self, _card: &Card, legal: ActionSet) -> Decision {
        self.actions
            .pop_front()
            .unwrap_or_else(|| Decision::new(legal.nth(0).unwrap_or(ActionKind::TakeCard)))
    }

    fn choose_public_card(&mut self, _candidates: &[Card]) -> usize {
        self.public_picks.pop_front().unwrap_or(0)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
