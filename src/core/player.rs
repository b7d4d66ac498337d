//! Seats at the table.
//!
//! A seat is numbered from 1 in join order. Anything kept per seat (hands,
//! hand sizes in a snapshot, win counts in the simulator) lives in a
//! `PlayerMap`, a dense vector addressed by `PlayerId`.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// 1-based seat number; the first player to join is seat 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

/// Seat numbers start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("seat numbers start at 1, got {0}")]
pub struct InvalidSeat(pub u8);

impl PlayerId {
    /// # Panics
    ///
    /// If `seat` is 0.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        assert!(seat > 0, "seat numbers start at 1");
        Self(seat)
    }

    /// Seat for a 0-based position at the table.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u8 + 1)
    }

    #[must_use]
    pub const fn seat(self) -> u8 {
        self.0
    }

    /// 0-based position at the table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Seats 1 through `players`.
    ///
    /// ```
    /// use libros::core::PlayerId;
    ///
    /// let seats: Vec<u8> = PlayerId::all(3).map(PlayerId::seat).collect();
    /// assert_eq!(seats, [1, 2, 3]);
    /// ```
    pub fn all(players: usize) -> impl Iterator<Item = PlayerId> {
        (0..players).map(PlayerId::from_index)
    }

    /// Left-hand neighbour at a table of `players`; the last seat wraps to 1.
    #[must_use]
    pub fn next(self, players: usize) -> Self {
        if self.index() + 1 >= players {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidSeat;

    fn try_from(seat: u8) -> Result<Self, InvalidSeat> {
        if seat == 0 {
            Err(InvalidSeat(seat))
        } else {
            Ok(Self(seat))
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat.
///
/// ```
/// use libros::core::{PlayerId, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::filled(3, 0);
/// wins[PlayerId::new(2)] += 1;
/// assert_eq!(wins.values().copied().collect::<Vec<_>>(), [0, 1, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build each seat's value from its id.
    pub fn from_fn(players: usize, mut value: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            seats: PlayerId::all(players).map(&mut value).collect(),
        }
    }

    pub fn filled(players: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            seats: vec![value; players],
        }
    }

    pub fn empty(players: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(players, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// `None` for a seat past the end of the table.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(&self.seats)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }
}

/// Seat 1 gets the first element.
impl<T> From<Vec<T>> for PlayerMap<T> {
    fn from(seats: Vec<T>) -> Self {
        Self { seats }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_and_index_differ_by_one() {
        let third = PlayerId::from_index(2);
        assert_eq!(third, PlayerId::new(3));
        assert_eq!(third.seat(), 3);
        assert_eq!(third.index(), 2);
        assert_eq!(third.to_string(), "Player 3");
    }

    #[test]
    fn test_next_wraps_to_seat_one() {
        let order: Vec<u8> = std::iter::successors(Some(PlayerId::new(1)), |p| Some(p.next(3)))
            .take(5)
            .map(PlayerId::seat)
            .collect();
        assert_eq!(order, [1, 2, 3, 1, 2]);
        assert_eq!(PlayerId::new(2).next(2), PlayerId::new(1));
    }

    #[test]
    fn test_from_vec_keeps_seat_order() {
        let map = PlayerMap::from(vec!["a", "b"]);
        let pairs: Vec<_> = map.iter().map(|(p, v)| (p.seat(), *v)).collect();
        assert_eq!(pairs, [(1, "a"), (2, "b")]);
        assert_eq!(map.player_count(), 2);
    }

    #[test]
    fn test_get_rejects_unknown_seats() {
        let map: PlayerMap<Vec<u8>> = PlayerMap::empty(2);
        assert!(map.get(PlayerId::new(2)).is_some_and(Vec::is_empty));
        assert!(map.get(PlayerId::new(3)).is_none());
    }

    #[test]
    fn test_seat_zero_is_rejected() {
        assert_eq!(PlayerId::try_from(0), Err(InvalidSeat(0)));
        assert_eq!(PlayerId::try_from(4), Ok(PlayerId::new(4)));
        assert!(serde_json::from_str::<PlayerId>("0").is_err());
        assert_eq!(serde_json::to_string(&PlayerId::new(2)).unwrap(), "2");
        assert!(std::panic::catch_unwind(|| PlayerId::new(0)).is_err());
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let map = PlayerMap::from_fn(3, |p| u32::from(p.seat()) * 10);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[10,20,30]");
        assert_eq!(serde_json::from_str::<PlayerMap<u32>>(&json).unwrap(), map);
    }
}
