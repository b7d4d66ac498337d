//! Deck construction.
//!
//! The full set is 87 cards (78 plus three gold values of 11 cards each,
//! minus `gold_to_remove` per value). Letters are handed out in construction
//! order, per colour, before the shuffle, so they never depend on the RNG.
//! After shuffling, `cards_to_remove` cards are dropped unseen.

use serde::{Deserialize, Serialize};

use super::card::{Card, Letter, ScoringColor};
use crate::core::config::{validate_player_count, DealConfig};
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;

/// Copies of each gold value before removal.
pub const GOLD_PER_VALUE: u32 = 11;

/// Gold values in the set.
pub const GOLD_VALUES: [i32; 3] = [1, 2, 3];

/// `(colour, value, count)` for the lettered cards, in construction order.
pub const SCORING_COMPOSITION: [(ScoringColor, i32, usize); 12] = [
    (ScoringColor::Blue, 2, 4),
    (ScoringColor::Blue, 3, 3),
    (ScoringColor::Blue, 4, 2),
    (ScoringColor::Brown, 2, 4),
    (ScoringColor::Brown, 3, 3),
    (ScoringColor::Brown, 4, 2),
    (ScoringColor::Red, 1, 7),
    (ScoringColor::Red, 2, 2),
    (ScoringColor::Orange, 1, 7),
    (ScoringColor::Orange, 2, 2),
    (ScoringColor::Green, 1, 7),
    (ScoringColor::Green, 2, 2),
];

/// `(value, count)` for change cards. Value 0 is the plus-or-minus card.
pub const CHANGE_COMPOSITION: [(i32, usize); 5] = [(-2, 2), (-1, 2), (2, 2), (1, 2), (0, 1)];

/// The draw pile. The top of the deck is the end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Card> {
        self.cards
    }

    /// Put a card on top. Used to stage a known draw in tests and tools.
    pub fn push_top(&mut self, card: Card) {
        self.cards.push(card);
    }
}

/// The unshuffled base set, letters assigned.
pub fn build_full_set(gold_to_remove: u32) -> Result<Vec<Card>> {
    if gold_to_remove > GOLD_PER_VALUE {
        return Err(GameError::config(format!(
            "cannot remove {gold_to_remove} gold cards per value, only {GOLD_PER_VALUE} exist"
        )));
    }
    let gold_count = (GOLD_PER_VALUE - gold_to_remove) as usize;

    let mut next_letter = [0usize; ScoringColor::ALL.len()];
    let mut cards = Vec::with_capacity(87);

    for (color, value, count) in SCORING_COMPOSITION {
        for _ in 0..count {
            let slot = &mut next_letter[color.index()];
            let letter = Letter::from_index(*slot)
                .ok_or_else(|| GameError::config(format!("ran out of letters for {color}")))?;
            *slot += 1;
            cards.push(Card::scoring(color, value, letter));
        }
    }

    for (value, count) in CHANGE_COMPOSITION {
        cards.extend(std::iter::repeat(Card::change(value)).take(count));
    }

    for value in GOLD_VALUES {
        cards.extend(std::iter::repeat(Card::gold(value)).take(gold_count));
    }

    Ok(cards)
}

/// Deal a shuffled deck using the supplied RNG.
pub fn deal_with_rng(config: &DealConfig, rng: &mut GameRng) -> Result<Deck> {
    validate_player_count(config.player_count)?;

    let mut cards = build_full_set(config.resolved_gold_to_remove())?;
    let to_remove = config.resolved_cards_to_remove();
    if to_remove > cards.len() {
        return Err(GameError::config(format!(
            "cannot remove {to_remove} cards from a set of {}",
            cards.len()
        )));
    }

    rng.shuffle(&mut cards);
    cards.drain(..to_remove);

    Ok(Deck::from_cards(cards))
}

/// Deal a shuffled deck for `player_count` players with a fresh random seed.
///
/// `None` for either knob uses the table default.
///
/// ```
/// use libros::cards::deal;
///
/// assert_eq!(deal(2, None, None).unwrap().len(), 60);
/// assert_eq!(deal(3, None, None).unwrap().len(), 72);
/// assert_eq!(deal(4, None, None).unwrap().len(), 80);
/// assert!(deal(5, None, None).is_err());
/// ```
pub fn deal(player_count: usize, cards_to_remove: Option<usize>, gold_to_remove: Option<u32>) -> Result<Deck> {
    let config = DealConfig {
        player_count,
        cards_to_remove,
        gold_to_remove,
    };
    deal_with_rng(&config, &mut GameRng::from_entropy())
}
