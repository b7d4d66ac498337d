//! Legal-action computation.
//!
//! A pure function of the phase, the card, the cycle's tally and the table
//! size. Calling it twice without resolving anything gives the same set.

use crate::cards::Card;
use crate::core::action::{ActionKind, ActionSet, ActionTally};
use crate::core::state::Phase;

/// Actions available for `card`.
///
/// - `public`: a change card may be discarded or used; anything else must be taken.
/// - `turn`: take, pile and show, each capped per turn-cycle (one take, one
///   pile, one show per opponent). A change card that could still be taken
///   may instead be discarded or used.
/// - any other phase: nothing.
#[must_use]
pub fn legal_actions(phase: Phase, card: &Card, tally: &ActionTally, player_count: usize) -> ActionSet {
    match phase {
        Phase::Public => {
            if card.is_change() {
                [ActionKind::DiscardCard, ActionKind::UseCard].into_iter().collect()
            } else {
                [ActionKind::TakeCard].into_iter().collect()
            }
        }
        Phase::Turn => {
            let mut actions = ActionSet::turn_defaults();

            let shows_allowed = player_count.saturating_sub(1) as u32;
            if tally.count(ActionKind::ShowCard) >= shows_allowed {
                actions.remove(ActionKind::ShowCard);
            }
            if tally.count(ActionKind::PileCard) >= 1 {
                actions.remove(ActionKind::PileCard);
            }
            if tally.count(ActionKind::TakeCard) >= 1 {
                actions.remove(ActionKind::TakeCard);
            }

            if card.is_change() && actions.contains(ActionKind::TakeCard) {
                actions.insert(ActionKind::DiscardCard);
                actions.insert(ActionKind::UseCard);
            }

            actions
        }
        _ => ActionSet::empty(),
    }
}
