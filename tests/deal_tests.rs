//! Deck construction and dealing.

use libros::cards::{build_full_set, deal, deal_with_rng, Card, Kind, ScoringColor};
use libros::core::{DealConfig, GameError, GameRng};

fn count(cards: &[Card], kind: Kind) -> usize {
    cards.iter().filter(|c| c.color_or_kind() == kind).count()
}

#[test]
fn test_default_deck_sizes() {
    for (players, expected) in [(2, 60), (3, 72), (4, 80)] {
        let deck = deal(players, None, None).unwrap();
        assert_eq!(deck.len(), expected, "{players} players");
    }
}

#[test]
fn test_bad_player_counts() {
    for players in [0, 1, 5, 8] {
        assert!(matches!(
            deal(players, None, None),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }
}

#[test]
fn test_no_removal_yields_full_composition() {
    let config = DealConfig::new(2).with_cards_to_remove(0).with_gold_to_remove(0);
    let mut dealt = deal_with_rng(&config, &mut GameRng::new(17)).unwrap().into_vec();
    let mut full = build_full_set(0).unwrap();

    assert_eq!(dealt.len(), 87);
    dealt.sort();
    full.sort();
    assert_eq!(dealt, full);
}

#[test]
fn test_base_composition_counts() {
    let cards = build_full_set(0).unwrap();

    assert_eq!(count(&cards, Kind::Blue), 9);
    assert_eq!(count(&cards, Kind::Brown), 9);
    assert_eq!(count(&cards, Kind::Red), 9);
    assert_eq!(count(&cards, Kind::Orange), 9);
    assert_eq!(count(&cards, Kind::Green), 9);
    assert_eq!(count(&cards, Kind::Change), 9);
    assert_eq!(count(&cards, Kind::Gold), 33);

    let gold_total: i32 = cards.iter().filter(|c| c.is_gold()).map(Card::value).sum();
    assert_eq!(gold_total, 11 * (1 + 2 + 3));
}

#[test]
fn test_gold_removal_default_per_table() {
    // 4 - players gold cards of each value go before the shuffle
    for (players, gold_per_value) in [(2, 9), (3, 10), (4, 11)] {
        let config = DealConfig::new(players).with_cards_to_remove(0);
        let deck = deal_with_rng(&config, &mut GameRng::new(3)).unwrap();
        let gold = deck.iter().filter(|c| c.is_gold()).count();
        assert_eq!(gold, 3 * gold_per_value, "{players} players");
    }
}

#[test]
fn test_letters_are_unique_per_colour() {
    let cards = build_full_set(0).unwrap();

    for color in ScoringColor::ALL {
        let mut letters: Vec<char> = cards
            .iter()
            .filter(|c| c.color() == Some(color))
            .filter_map(|c| c.letter())
            .map(|l| l.as_char())
            .collect();
        let expected: Vec<char> = ('A'..='I').collect();
        letters.sort_unstable();
        assert_eq!(letters, expected, "{color}");
    }
}

#[test]
fn test_red_letters_follow_values() {
    let cards = build_full_set(0).unwrap();
    let red: Vec<(char, i32)> = cards
        .iter()
        .filter(|c| c.color() == Some(ScoringColor::Red))
        .map(|c| (c.letter().unwrap().as_char(), c.value()))
        .collect();

    assert_eq!(red[0], ('A', 1));
    assert_eq!(red[6], ('G', 1));
    assert_eq!(red[7], ('H', 2));
    assert_eq!(red[8], ('I', 2));
}

#[test]
fn test_same_seed_same_deal() {
    let config = DealConfig::new(4);
    let a = deal_with_rng(&config, &mut GameRng::new(2024)).unwrap();
    let b = deal_with_rng(&config, &mut GameRng::new(2024)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_removal_overrides() {
    let deck = deal(3, Some(0), Some(0)).unwrap();
    assert_eq!(deck.len(), 87);

    let deck = deal(3, Some(87), Some(0)).unwrap();
    assert!(deck.is_empty());

    assert!(deal(3, Some(88), Some(0)).is_err());
    assert!(deal(3, None, Some(12)).is_err());
}
