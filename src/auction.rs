//! Pile distribution at the end of a round.
//!
//! Once the deck and the public queue are exhausted the round sits in
//! `auction` with the pile still on the table. An `AuctionHandler` decides
//! where each pile card goes; `Game::run_auction` checks the answer, moves
//! the cards and closes the round.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;

/// Destination of one pile card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    /// Into this seat's hand.
    Player(PlayerId),
    /// Out of the round.
    Discard,
}

/// Decides the fate of the pile.
pub trait AuctionHandler {
    /// Return one recipient per card of `pile`, in pile order.
    ///
    /// `seats` lists every seat, starting with the one after the last
    /// active player.
    fn distribute(&mut self, pile: &[Card], seats: &[PlayerId]) -> Vec<Recipient>;

    fn name(&self) -> &str {
        "auction"
    }
}

/// Throws the whole pile away.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardAuction;

impl AuctionHandler for DiscardAuction {
    fn distribute(&mut self, pile: &[Card], _seats: &[PlayerId]) -> Vec<Recipient> {
        vec![Recipient::Discard; pile.len()]
    }

    fn name(&self) -> &str {
        "discard"
    }
}

/// Deals the pile round the table one card at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotationAuction;

impl AuctionHandler for RotationAuction {
    fn distribute(&mut self, pile: &[Card], seats: &[PlayerId]) -> Vec<Recipient> {
        if seats.is_empty() {
            return vec![Recipient::Discard; pile.len()];
        }
        seats
            .iter()
            .cycle()
            .take(pile.len())
            .map(|seat| Recipient::Player(*seat))
            .collect()
    }

    fn name(&self) -> &str {
        "rotation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_auction() {
        let pile = [Card::gold(1), Card::change(2)];
        let seats = [PlayerId::new(1), PlayerId::new(2)];

        assert_eq!(
            DiscardAuction.distribute(&pile, &seats),
            vec![Recipient::Discard, Recipient::Discard]
        );
    }

    #[test]
    fn test_rotation_auction_starts_with_first_seat() {
        let pile = [Card::gold(1); 5];
        let seats = [PlayerId::new(2), PlayerId::new(3), PlayerId::new(1)];

        let recipients = RotationAuction.distribute(&pile, &seats);
        assert_eq!(
            recipients,
            vec![
                Recipient::Player(PlayerId::new(2)),
                Recipient::Player(PlayerId::new(3)),
                Recipient::Player(PlayerId::new(1)),
                Recipient::Player(PlayerId::new(2)),
                Recipient::Player(PlayerId::new(3)),
            ]
        );
    }

    #[test]
    fn test_empty_pile() {
        assert!(RotationAuction.distribute(&[], &[PlayerId::new(1)]).is_empty());
    }
}
