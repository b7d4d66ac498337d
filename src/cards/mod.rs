//! Cards and the deck.
//!
//! ## Key Types
//!
//! - `Card`: immutable `(kind, value)`; scoring colours carry a tiebreak letter
//! - `ScoringColor`: the five colours that score dice
//! - `Deck`: the shuffled draw pile
//! - `deal`: build, shuffle and thin a deck for 2-4 players

pub mod card;
pub mod deck;

pub use card::{Card, CardKind, Kind, Letter, ScoringColor, UnknownColor};
pub use deck::{build_full_set, deal, deal_with_rng, Deck};
