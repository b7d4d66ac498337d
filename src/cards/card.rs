//! Card values.
//!
//! A card is an immutable `(kind, value)` pair. Only the five scoring colours
//! carry a tiebreak letter, and the type says so: `CardKind::Scoring` holds
//! the letter, `Gold` and `Change` have none.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five colours that score dice at round end.
///
/// Declaration order is deck-construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoringColor {
    Blue,
    Brown,
    Red,
    Orange,
    Green,
}

impl ScoringColor {
    pub const ALL: [ScoringColor; 5] = [
        ScoringColor::Blue,
        ScoringColor::Brown,
        ScoringColor::Red,
        ScoringColor::Orange,
        ScoringColor::Green,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScoringColor::Blue => "blue",
            ScoringColor::Brown => "brown",
            ScoringColor::Red => "red",
            ScoringColor::Orange => "orange",
            ScoringColor::Green => "green",
        }
    }

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ScoringColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a colour name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown colour {0:?}")]
pub struct UnknownColor(pub String);

impl FromStr for ScoringColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoringColor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// Per-colour tiebreak letter: `A` for the first card of a colour built, `B`
/// for the second, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Letter(u8);

impl Letter {
    pub const A: Letter = Letter(b'A');

    /// The letter at 0-based position `index` in the alphabet.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i < 26)
            .map(|i| Letter(b'A' + i))
    }

    /// Letter from an ASCII character (`'a'` and `'A'` both give `A`).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then(|| Letter(upper as u8))
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// What kind of card this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Scoring { color: ScoringColor, letter: Letter },
    Change,
    Gold,
}

/// Flat colour-or-kind tag, for grouping and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    Blue,
    Brown,
    Red,
    Orange,
    Green,
    Change,
    Gold,
}

impl From<ScoringColor> for Kind {
    fn from(color: ScoringColor) -> Self {
        match color {
            ScoringColor::Blue => Kind::Blue,
            ScoringColor::Brown => Kind::Brown,
            ScoringColor::Red => Kind::Red,
            ScoringColor::Orange => Kind::Orange,
            ScoringColor::Green => Kind::Green,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Blue => "blue",
            Kind::Brown => "brown",
            Kind::Red => "red",
            Kind::Orange => "orange",
            Kind::Green => "green",
            Kind::Change => "change",
            Kind::Gold => "gold",
        };
        f.write_str(name)
    }
}

/// A card. Compared by value: two blue 2s lettered `C` are the same card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    kind: CardKind,
    value: i32,
}

impl Card {
    #[must_use]
    pub const fn scoring(color: ScoringColor, value: i32, letter: Letter) -> Self {
        Self {
            kind: CardKind::Scoring { color, letter },
            value,
        }
    }

    #[must_use]
    pub const fn gold(value: i32) -> Self {
        Self {
            kind: CardKind::Gold,
            value,
        }
    }

    #[must_use]
    pub const fn change(value: i32) -> Self {
        Self {
            kind: CardKind::Change,
            value,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CardKind {
        self.kind
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Tiebreak letter; `None` for gold and change cards.
    #[must_use]
    pub const fn letter(&self) -> Option<Letter> {
        match self.kind {
            CardKind::Scoring { letter, .. } => Some(letter),
            _ => None,
        }
    }

    /// Scoring colour; `None` for gold and change cards.
    #[must_use]
    pub const fn color(&self) -> Option<ScoringColor> {
        match self.kind {
            CardKind::Scoring { color, .. } => Some(color),
            _ => None,
        }
    }

    #[must_use]
    pub const fn color_or_kind(&self) -> Kind {
        match self.kind {
            CardKind::Scoring { color, .. } => match color {
                ScoringColor::Blue => Kind::Blue,
                ScoringColor::Brown => Kind::Brown,
                ScoringColor::Red => Kind::Red,
                ScoringColor::Orange => Kind::Orange,
                ScoringColor::Green => Kind::Green,
            },
            CardKind::Change => Kind::Change,
            CardKind::Gold => Kind::Gold,
        }
    }

    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self.kind, CardKind::Change)
    }

    #[must_use]
    pub const fn is_gold(&self) -> bool {
        matches!(self.kind, CardKind::Gold)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Scoring { color, letter } => write!(f, "{color} {} ({letter})", self.value),
            CardKind::Change => write!(f, "change {:+}", self.value),
            CardKind::Gold => write!(f, "gold {}", self.value),
        }
    }
}
