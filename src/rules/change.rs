//! Dice and the change-card effect.
//!
//! Every scoring colour has a die starting at 3. A change card of value `v`
//! moves `max(|v|, 1)` dice by one step each: up for positive values, down
//! for negative ones. The value-0 card moves a single die either way, so its
//! pick carries a sign (`"+green"`, `"-blue"`). Choosing no colours at all is
//! always allowed and does nothing. Dice have no floor.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, ScoringColor};
use crate::core::error::{GameError, Result};

/// Starting count of every die.
pub const STARTING_DIE: i32 = 3;

/// Per-colour die counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice([i32; 5]);

impl Default for Dice {
    fn default() -> Self {
        Self([STARTING_DIE; 5])
    }
}

impl Dice {
    /// Dice with explicit counts, in `ScoringColor::ALL` order.
    #[must_use]
    pub const fn from_counts(counts: [i32; 5]) -> Self {
        Self(counts)
    }

    #[must_use]
    pub fn get(&self, color: ScoringColor) -> i32 {
        self.0[color.index()]
    }

    pub fn adjust(&mut self, color: ScoringColor, delta: i32) {
        self.0[color.index()] += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoringColor, i32)> + '_ {
        ScoringColor::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.iter().sum()
    }
}

impl Index<ScoringColor> for Dice {
    type Output = i32;

    fn index(&self, color: ScoringColor) -> &Self::Output {
        &self.0[color.index()]
    }
}

/// Direction prefix of a value-0 pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

/// One entry of a change selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPick {
    pub sign: Option<Sign>,
    pub color: ScoringColor,
}

impl ColorPick {
    #[must_use]
    pub const fn plain(color: ScoringColor) -> Self {
        Self { sign: None, color }
    }

    #[must_use]
    pub const fn signed(sign: Sign, color: ScoringColor) -> Self {
        Self {
            sign: Some(sign),
            color,
        }
    }
}

impl FromStr for ColorPick {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (sign, name) = match s.as_bytes().first() {
            Some(b'+') => (Some(Sign::Plus), &s[1..]),
            Some(b'-') => (Some(Sign::Minus), &s[1..]),
            _ => (None, s),
        };
        let color = name
            .parse::<ScoringColor>()
            .map_err(|e| GameError::selection(e.to_string()))?;
        Ok(Self { sign, color })
    }
}

impl fmt::Display for ColorPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Some(Sign::Plus) => write!(f, "+{}", self.color),
            Some(Sign::Minus) => write!(f, "-{}", self.color),
            None => write!(f, "{}", self.color),
        }
    }
}

/// The colours named when using a change card.
///
/// ```
/// use libros::rules::ChangeSelection;
///
/// let pick = ChangeSelection::parse(&["+green"]).unwrap();
/// assert_eq!(pick.len(), 1);
/// assert!(ChangeSelection::parse(&["+teal"]).is_err());
/// assert!(ChangeSelection::none().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeSelection(SmallVec<[ColorPick; 2]>);

impl ChangeSelection {
    /// No colours: using the card has no effect.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Unsigned picks, for cards of non-zero value.
    #[must_use]
    pub fn colors(colors: &[ScoringColor]) -> Self {
        colors.iter().copied().map(ColorPick::plain).collect()
    }

    /// A single signed pick, for the value-0 card.
    #[must_use]
    pub fn signed(sign: Sign, color: ScoringColor) -> Self {
        std::iter::once(ColorPick::signed(sign, color)).collect()
    }

    /// Parse entries such as `"red"`, `"+green"` or `"-blue"`.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        entries.iter().map(|e| e.as_ref().parse()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorPick> {
        self.0.iter()
    }
}

impl FromIterator<ColorPick> for ChangeSelection {
    fn from_iter<I: IntoIterator<Item = ColorPick>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ChangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, pick) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pick}")?;
        }
        f.write_str("]")
    }
}

/// Number of picks a change card of `value` requires.
#[must_use]
pub fn required_picks(value: i32) -> usize {
    value.unsigned_abs().max(1) as usize
}

/// Check `selection` against `card` and return the die moves it implies.
pub fn plan_change(card: &Card, selection: &ChangeSelection) -> Result<SmallVec<[(ScoringColor, i32); 2]>> {
    if !card.is_change() {
        return Err(GameError::selection(format!("{card} is not a change card")));
    }
    if selection.is_empty() {
        return Ok(SmallVec::new());
    }

    let value = card.value();
    let required = required_picks(value);
    if selection.len() != required {
        return Err(GameError::selection(format!(
            "{card} needs {required} colour(s), got {}",
            selection.len()
        )));
    }

    selection
        .iter()
        .map(|pick| match (value, pick.sign) {
            (0, Some(sign)) => Ok((pick.color, sign.delta())),
            (0, None) => Err(GameError::selection(format!(
                "{card} needs a signed colour such as +{0} or -{0}",
                pick.color
            ))),
            (_, Some(_)) => Err(GameError::selection(format!(
                "{card} takes plain colour names, got {pick}"
            ))),
            (v, None) => Ok((pick.color, v.signum())),
        })
        .collect()
}

/// Apply a change card to the dice. Fails without touching the dice.
pub fn apply_change(dice: &mut Dice, card: &Card, selection: &ChangeSelection) -> Result<()> {
    for (color, delta) in plan_change(card, selection)? {
        dice.adjust(color, delta);
    }
    Ok(())
}
