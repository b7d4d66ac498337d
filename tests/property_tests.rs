//! Property tests over whole rounds with random seats.

use std::collections::BTreeMap;

use libros::cards::deal_with_rng;
use libros::core::{ActionKind, DealConfig, GameRng, Phase, PlayerId};
use libros::rules::{apply_change, ChangeSelection, Dice, ScoreBoard};
use libros::{Card, Game, RandomPolicy, RotationAuction};
use proptest::prelude::*;

fn table(players: usize, seed: u64) -> Game {
    let mut game = Game::new(seed);
    for seat in 0..players {
        game.join(Box::new(RandomPolicy::new(seed.wrapping_mul(31).wrapping_add(seat as u64))))
            .unwrap();
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Cards are conserved at every step of a round.
    #[test]
    fn prop_cards_conserved(players in 2usize..=4, seed in any::<u64>()) {
        let mut game = table(players, seed);
        game.start().unwrap();
        let dealt = game.dealt_count();

        while game.phase().is_drawing() {
            game.step().unwrap();
            prop_assert_eq!(game.snapshot().card_total(), dealt);
        }
        prop_assert_eq!(game.phase(), Phase::Auction);

        game.run_auction(&mut RotationAuction).unwrap();
        prop_assert_eq!(game.snapshot().card_total(), dealt);
        prop_assert_eq!(game.pile_count(), 0);
    }

    /// Per-cycle limits: one take, one pile, one show per opponent.
    #[test]
    fn prop_cycle_limits(players in 2usize..=4, seed in any::<u64>()) {
        let mut game = table(players, seed);
        game.start().unwrap();
        game.play_until_auction().unwrap();

        let mut per_cycle: BTreeMap<(u32, ActionKind), u32> = BTreeMap::new();
        for record in game.history().iter().filter(|r| r.phase == Phase::Turn) {
            *per_cycle.entry((record.cycle, record.action)).or_default() += 1;
        }

        for cycle in 1..=game.cycle() {
            let n = |a: ActionKind| per_cycle.get(&(cycle, a)).copied().unwrap_or(0);
            let takes = n(ActionKind::TakeCard) + n(ActionKind::DiscardCard) + n(ActionKind::UseCard);
            prop_assert!(takes <= 1, "cycle {} took {} cards", cycle, takes);
            prop_assert!(n(ActionKind::PileCard) <= 1);
            prop_assert!((n(ActionKind::ShowCard) as usize) < players);
        }
    }

    /// Cleanup picks are takes, or discard/use for change cards.
    #[test]
    fn prop_public_resolutions(players in 2usize..=4, seed in any::<u64>()) {
        let mut game = table(players, seed);
        game.start().unwrap();
        game.play_until_auction().unwrap();

        for record in game.history().iter().filter(|r| r.phase == Phase::Public) {
            if record.card.is_change() {
                prop_assert!(matches!(record.action, ActionKind::DiscardCard | ActionKind::UseCard));
            } else {
                prop_assert_eq!(record.action, ActionKind::TakeCard);
            }
        }
    }

    /// The winner is a seated player and tops the scoreboard.
    #[test]
    fn prop_winner_is_seated(players in 2usize..=4, seed in any::<u64>()) {
        let mut game = table(players, seed);
        game.start().unwrap();
        let winner = game.play_round(&mut RotationAuction).unwrap();

        prop_assert!(PlayerId::all(players).any(|p| p == winner));
        let board = game.scoreboard().unwrap();
        let best = board.get(winner).unwrap();
        for score in &board.players {
            prop_assert!(score.compare(best) != std::cmp::Ordering::Greater || !score.won_any());
        }
    }

    /// Dealing removes exactly the requested number of cards.
    #[test]
    fn prop_deal_size(players in 2usize..=4, remove in 0usize..=40, gold in 0u32..=11, seed in any::<u64>()) {
        let config = DealConfig::new(players).with_cards_to_remove(remove).with_gold_to_remove(gold);
        let deck = deal_with_rng(&config, &mut GameRng::new(seed)).unwrap();
        prop_assert_eq!(deck.len(), 87 - 3 * gold as usize - remove);
    }

    /// A change card moves the dice total by exactly its value.
    #[test]
    fn prop_change_shifts_total_by_value(value in -2i32..=2, picks in proptest::collection::vec(0usize..5, 2)) {
        let colors = ["blue", "brown", "red", "orange", "green"];
        let entries: Vec<String> = if value == 0 {
            vec![format!("+{}", colors[picks[0]])]
        } else {
            picks.iter().take(value.unsigned_abs() as usize).map(|i| colors[*i].to_string()).collect()
        };
        let selection = ChangeSelection::parse(entries.as_slice()).unwrap();

        let mut dice = Dice::default();
        apply_change(&mut dice, &Card::change(value), &selection).unwrap();
        let expected = if value == 0 { 16 } else { 15 + value };
        prop_assert_eq!(dice.total(), expected);
    }

    /// Scoring never credits more dice than are on the table.
    #[test]
    fn prop_banked_dice_bounded(players in 2usize..=4, seed in any::<u64>()) {
        let mut game = table(players, seed);
        game.start().unwrap();
        game.play_round(&mut RotationAuction).unwrap();

        let board: ScoreBoard = game.scoreboard().unwrap();
        let banked: i32 = board.players.iter().map(|s| s.total).sum();
        let credited: i32 = board
            .color_winners
            .iter()
            .zip(libros::ScoringColor::ALL)
            .filter(|(w, _)| w.is_some())
            .map(|(_, c)| game.dice().get(c))
            .sum();
        prop_assert_eq!(banked, credited);
    }
}
