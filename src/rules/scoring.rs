//! End-of-round scoring.
//!
//! Each scoring colour is awarded to the one player with the strictly highest
//! card total in it; that player banks the colour's current die count. A
//! colour nobody holds, or whose best total is shared, is awarded to nobody.
//! Tiebreak letters are reported by `score_for` but never split a colour.
//!
//! The winner is the seat with the greatest
//! `(dice total, gold, won brown, won blue, won green, won orange, won red)`
//! tuple among the seats that won at least one colour.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::change::Dice;
use crate::cards::{Card, Kind, Letter, ScoringColor};
use crate::core::player::{PlayerId, PlayerMap};

/// Order of the won-colour keys after the gold tiebreak.
pub const TIEBREAK_COLORS: [ScoringColor; 5] = [
    ScoringColor::Brown,
    ScoringColor::Blue,
    ScoringColor::Green,
    ScoringColor::Orange,
    ScoringColor::Red,
];

/// A hand's standing in one colour or kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorScore {
    /// Sum of card values.
    pub value: i32,
    /// Lowest tiebreak letter held; `None` for an empty colour or for gold.
    pub letter: Option<Letter>,
}

/// Score of `hand` in one colour or kind.
///
/// ```
/// use libros::cards::{Card, Kind, Letter, ScoringColor};
/// use libros::rules::score_for;
///
/// let c = Letter::from_char('C').unwrap();
/// let hand = [
///     Card::scoring(ScoringColor::Blue, 3, c),
///     Card::scoring(ScoringColor::Blue, 2, Letter::A),
///     Card::gold(2),
/// ];
/// let blue = score_for(&hand, Kind::Blue);
/// assert_eq!((blue.value, blue.letter), (5, Some(Letter::A)));
/// assert_eq!(score_for(&hand, Kind::Gold).value, 2);
/// assert_eq!(score_for(&hand, Kind::Red).letter, None);
/// ```
#[must_use]
pub fn score_for(hand: &[Card], kind: Kind) -> ColorScore {
    hand.iter()
        .filter(|card| card.color_or_kind() == kind)
        .fold(ColorScore::default(), |acc, card| ColorScore {
            value: acc.value + card.value(),
            letter: match (acc.letter, card.letter()) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        })
}

/// One seat's scoring breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerId,

    /// Dice banked from the colours this seat won.
    pub total: i32,

    /// Sum of gold card values held.
    pub gold: i32,

    /// Won flags in `ScoringColor::ALL` order.
    pub won: [bool; 5],
}

impl PlayerScore {
    #[must_use]
    pub fn won(&self, color: ScoringColor) -> bool {
        self.won[color.index()]
    }

    #[must_use]
    pub fn won_any(&self) -> bool {
        self.won.iter().any(|w| *w)
    }

    /// Lexicographic comparison on the winner tuple.
    #[must_use]
    pub fn compare(&self, other: &PlayerScore) -> Ordering {
        let key = |s: &PlayerScore| (s.total, s.gold, TIEBREAK_COLORS.map(|c| s.won(c)));
        key(self).cmp(&key(other))
    }
}

/// Scoring result for every seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Winner of each colour in `ScoringColor::ALL` order.
    pub color_winners: [Option<PlayerId>; 5],

    /// Per-seat breakdown in seat order.
    pub players: Vec<PlayerScore>,
}

impl ScoreBoard {
    /// Score every hand against the final dice.
    #[must_use]
    pub fn tally(hands: &PlayerMap<Vec<Card>>, dice: &Dice) -> Self {
        let mut players: Vec<PlayerScore> = hands
            .iter()
            .map(|(player, hand)| PlayerScore {
                player,
                total: 0,
                gold: score_for(hand, Kind::Gold).value,
                won: [false; 5],
            })
            .collect();

        let mut color_winners = [None; 5];
        for color in ScoringColor::ALL {
            let values: Vec<(PlayerId, i32)> = hands
                .iter()
                .map(|(player, hand)| (player, score_for(hand, Kind::from(color)).value))
                .collect();
            let best = values.iter().map(|(_, value)| *value).max().unwrap_or(0);
            if best <= 0 {
                continue;
            }

            let mut leaders = values.iter().filter(|(_, value)| *value == best);
            if let (Some(&(player, _)), None) = (leaders.next(), leaders.next()) {
                let entry = &mut players[player.index()];
                entry.total += dice.get(color);
                entry.won[color.index()] = true;
                color_winners[color.index()] = Some(player);
            }
        }

        Self { color_winners, players }
    }

    /// Breakdown for one seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&PlayerScore> {
        self.players.iter().find(|s| s.player == player)
    }

    #[must_use]
    pub fn color_winner(&self, color: ScoringColor) -> Option<PlayerId> {
        self.color_winners[color.index()]
    }

    /// The round winner. Exact ties go to the earliest seat.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let any_won = self.players.iter().any(PlayerScore::won_any);
        self.players
            .iter()
            .filter(|s| !any_won || s.won_any())
            .fold(None::<&PlayerScore>, |best, s| match best {
                Some(b) if s.compare(b) != Ordering::Greater => best,
                _ => Some(s),
            })
            .map(|s| s.player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScoringColor::*;

    fn card(color: ScoringColor, value: i32, letter: char) -> Card {
        Card::scoring(color, value, Letter::from_char(letter).unwrap())
    }

    fn hands(cards: Vec<Vec<Card>>) -> PlayerMap<Vec<Card>> {
        PlayerMap::from(cards)
    }

    #[test]
    fn test_empty_colour_scores_zero() {
        let score = score_for(&[Card::gold(3)], Kind::Green);
        assert_eq!(score, ColorScore { value: 0, letter: None });
    }

    #[test]
    fn test_change_cards_do_not_score() {
        let hand = [Card::change(2), card(Red, 1, 'B')];
        assert_eq!(score_for(&hand, Kind::Red).value, 1);
        assert_eq!(score_for(&hand, Kind::Gold).value, 0);
    }

    #[test]
    fn test_tied_colour_is_won_by_nobody() {
        let board = ScoreBoard::tally(
            &hands(vec![vec![card(Red, 2, 'D')], vec![card(Red, 2, 'B')]]),
            &Dice::default(),
        );

        assert_eq!(board.color_winner(Red), None);
        assert!(board.players.iter().all(|s| s.total == 0 && !s.won_any()));
        // nobody won anything, so every seat stays a candidate
        assert_eq!(board.winner(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_shared_lead_shuts_out_the_runner_up() {
        let board = ScoreBoard::tally(
            &hands(vec![
                vec![card(Blue, 3, 'C')],
                vec![card(Blue, 2, 'A')],
                vec![card(Blue, 3, 'B'), card(Green, 1, 'A')],
            ]),
            &Dice::default(),
        );

        assert_eq!(board.color_winner(Blue), None);
        assert_eq!(board.color_winner(Green), Some(PlayerId::new(3)));
        assert_eq!(board.get(PlayerId::new(2)).unwrap().total, 0);
        assert_eq!(board.get(PlayerId::new(3)).unwrap().total, 3);
        assert_eq!(board.winner(), Some(PlayerId::new(3)));
    }

    #[test]
    fn test_nobody_wins_an_unheld_colour() {
        let board = ScoreBoard::tally(&hands(vec![vec![], vec![card(Blue, 2, 'A')]]), &Dice::default());

        assert_eq!(board.color_winner(Red), None);
        assert_eq!(board.color_winner(Blue), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_banked_dice_use_current_counts() {
        let dice = Dice::from_counts([5, 0, 0, 0, -1]);
        let board = ScoreBoard::tally(
            &hands(vec![vec![card(Blue, 2, 'A'), card(Green, 1, 'A')], vec![card(Red, 1, 'C')]]),
            &dice,
        );

        assert_eq!(board.get(PlayerId::new(1)).unwrap().total, 4);
        assert_eq!(board.get(PlayerId::new(2)).unwrap().total, 0);
    }

    #[test]
    fn test_no_colours_won_falls_back_to_gold() {
        let board = ScoreBoard::tally(&hands(vec![vec![Card::gold(1)], vec![Card::gold(2)]]), &Dice::default());
        assert_eq!(board.winner(), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_exact_tie_goes_to_earliest_seat() {
        let board = ScoreBoard::tally(&hands(vec![vec![], vec![], vec![]]), &Dice::default());
        assert_eq!(board.winner(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_tiebreak_colour_priority() {
        let mut a = PlayerScore {
            player: PlayerId::new(1),
            total: 4,
            gold: 2,
            won: [false; 5],
        };
        let mut b = a.clone();
        b.player = PlayerId::new(2);

        a.won[Red.index()] = true;
        b.won[Green.index()] = true;
        assert_eq!(b.compare(&a), Ordering::Greater);

        a.won[Brown.index()] = true;
        assert_eq!(a.compare(&b), Ordering::Greater);

        b.gold = 3;
        assert_eq!(b.compare(&a), Ordering::Greater);
    }
}
