//! The round state machine.
//!
//! `Game` owns every card location (deck, hands, pile, public queue,
//! discard), the dice, the phase and the rotation. All mutation goes
//! through two calls:
//!
//! - `turn()`: produce the next card for the active seat, either drawn from
//!   the deck (`turn` phase) or picked from the public queue (`public` phase)
//! - `resolve()`: apply the seat's chosen action to that card, then run the
//!   completion transition
//!
//! ## Rotation
//!
//! One rotation index is shared by drawing and cleanup. Entering `public`
//! moves it one seat on; every public pick that leaves cards behind moves it
//! one seat further; emptying the queue passes through `next_player`, which
//! moves it once more and hands that seat a fresh turn-cycle.
//!
//! ## Conservation
//!
//! Cards only ever move between locations, so
//! `deck + pile + public + discarded + hands` (plus a drawn card awaiting
//! resolution) always equals the dealt deck size. Every precondition is
//! checked before anything moves: a call that returns an error leaves the
//! game untouched.

use im::Vector;
use tracing::{debug, info, trace};

use crate::auction::{AuctionHandler, Recipient};
use crate::cards::{deal_with_rng, Card, Deck};
use crate::core::{
    turns_per_player, validate_player_count, ActionKind, ActionRecord, ActionSet, ActionTally, GameConfig,
    GameError, GameRng, GameSnapshot, Phase, PlayerId, PlayerMap, Result, MAX_PLAYERS,
};
use crate::policy::{Decision, DecisionPolicy};
use crate::rules::{self, plan_change, ChangeSelection, Dice, ScoreBoard};

/// The card `turn()` handed out, with its legal actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draw {
    pub player: PlayerId,
    pub card: Card,
    pub legal: ActionSet,
}

/// A round of play.
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    phase: Phase,

    policies: Vec<Box<dyn DecisionPolicy>>,
    hands: PlayerMap<Vec<Card>>,

    deck: Deck,
    dealt: usize,
    pile: Vec<Card>,
    public: Vec<Card>,
    discarded: Vec<Card>,
    dice: Dice,

    active: Option<PlayerId>,
    turns_remaining: u32,
    turns_per_player: u32,
    tally: ActionTally,
    cycle: u32,

    pending: Option<Draw>,
    history: Vector<ActionRecord>,
}

impl Game {
    /// A new table in `waiting`, dealing with default removals.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::new(seed))
    }

    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            rng: GameRng::new(config.seed),
            phase: Phase::Waiting,
            policies: Vec::new(),
            hands: PlayerMap::empty(0),
            deck: Deck::default(),
            dealt: 0,
            pile: Vec::new(),
            public: Vec::new(),
            discarded: Vec::new(),
            dice: Dice::default(),
            active: None,
            turns_remaining: 0,
            turns_per_player: 0,
            tally: ActionTally::new(),
            cycle: 0,
            pending: None,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Seat a player. Seats are numbered from 1 in join order.
    pub fn join(&mut self, policy: Box<dyn DecisionPolicy>) -> Result<PlayerId> {
        if self.phase != Phase::Waiting {
            return Err(GameError::state("join", self.phase, "the round has already started"));
        }
        if self.policies.len() >= MAX_PLAYERS {
            return Err(GameError::state(
                "join",
                self.phase,
                format!("the table is full ({MAX_PLAYERS} players)"),
            ));
        }

        self.policies.push(policy);
        let player = PlayerId::from_index(self.policies.len() - 1);
        debug!(%player, policy = self.policies[player.index()].name(), "player joined");
        Ok(player)
    }

    /// Deal the deck and hand the first turn-cycle to seat 1.
    pub fn start(&mut self) -> Result<()> {
        self.check_startable()?;
        let config = self.config.deal_config(self.policies.len());
        let deck = deal_with_rng(&config, &mut self.rng.for_context("deal"))?;
        self.begin(deck);
        Ok(())
    }

    /// Start with a prepared deck instead of dealing one. The last card of
    /// `deck` is drawn first.
    pub fn start_with_deck(&mut self, deck: Deck) -> Result<()> {
        self.check_startable()?;
        self.begin(deck);
        Ok(())
    }

    fn check_startable(&self) -> Result<()> {
        if self.phase != Phase::Waiting {
            return Err(GameError::state("start", self.phase, "the round has already started"));
        }
        validate_player_count(self.policies.len())
    }

    fn begin(&mut self, deck: Deck) {
        let players = self.policies.len();

        self.phase = Phase::Start;
        self.dealt = deck.len();
        self.deck = deck;
        self.hands = PlayerMap::empty(players);
        self.turns_per_player = turns_per_player(players);

        info!(
            players,
            deck = self.dealt,
            turns_per_player = self.turns_per_player,
            "round started"
        );
        self.enter_next_player();
    }

    // =========================================================================
    // Turn engine
    // =========================================================================

    /// Produce the next card for the active seat.
    ///
    /// In `turn` the top of the deck is drawn and the budget decremented. In
    /// `public` the active seat's policy picks one of the shown cards. The
    /// card stays pending until `resolve()` is called with it.
    pub fn turn(&mut self) -> Result<Draw> {
        if self.pending.is_some() {
            return Err(GameError::state("turn", self.phase, "a card is already awaiting resolution"));
        }
        let player = self.active_or_err("turn")?;

        let card = match self.phase {
            Phase::Turn => {
                if self.turns_remaining == 0 {
                    return Err(GameError::state("turn", self.phase, "no turns left this cycle"));
                }
                let card = self
                    .deck
                    .draw()
                    .ok_or_else(|| GameError::state("turn", self.phase, "the deck is empty"))?;
                self.turns_remaining -= 1;
                trace!(%player, %card, turns_remaining = self.turns_remaining, "drew card");
                card
            }
            Phase::Public => {
                if self.public.is_empty() {
                    return Err(GameError::state("turn", self.phase, "the public queue is empty"));
                }
                let candidates = self.public.clone();
                let index = self.policies[player.index()].choose_public_card(&candidates);
                let card = *candidates.get(index).ok_or_else(|| GameError::UnexpectedCard {
                    reason: format!("public pick {index} is out of range for {} cards", candidates.len()),
                })?;
                trace!(%player, %card, "picked public card");
                card
            }
            phase => return Err(GameError::state("turn", phase, "no card can be produced")),
        };

        let draw = Draw {
            player,
            card,
            legal: self.legal_actions(&card),
        };
        self.pending = Some(draw);
        Ok(draw)
    }

    /// Legal actions for `card` given the current phase and cycle tally.
    #[must_use]
    pub fn legal_actions(&self, card: &Card) -> ActionSet {
        rules::legal_actions(self.phase, card, &self.tally, self.policies.len())
    }

    /// Apply `action` to the pending card, then advance the state machine.
    ///
    /// `selection` must be empty unless `action` is `UseCard`.
    pub fn resolve(
        &mut self,
        player: PlayerId,
        card: Card,
        action: ActionKind,
        selection: &ChangeSelection,
    ) -> Result<()> {
        let phase = self.phase;
        let draw = self
            .pending
            .ok_or_else(|| GameError::state("resolve", phase, "no card is awaiting resolution"))?;

        if player != draw.player {
            return Err(GameError::state(
                "resolve",
                phase,
                format!("{player} is acting, but it is {}'s card", draw.player),
            ));
        }
        if card != draw.card {
            return Err(GameError::UnexpectedCard {
                reason: format!("resolving {card}, but the pending card is {}", draw.card),
            });
        }
        if !draw.legal.contains(action) {
            return Err(GameError::IllegalAction {
                action,
                legal: draw.legal,
            });
        }
        if action != ActionKind::UseCard && !selection.is_empty() {
            return Err(GameError::selection(format!(
                "colours {selection} given with {action}; only `use` takes colours"
            )));
        }
        let moves = if action == ActionKind::UseCard {
            plan_change(&card, selection)?
        } else {
            Default::default()
        };

        self.pending = None;
        if phase == Phase::Public {
            if let Some(pos) = self.public.iter().position(|c| *c == card) {
                self.public.remove(pos);
            }
        }

        match action {
            ActionKind::TakeCard => self.hands[player].push(card),
            ActionKind::PileCard => self.pile.push(card),
            ActionKind::ShowCard => self.public.push(card),
            ActionKind::DiscardCard => self.discarded.push(card),
            ActionKind::UseCard => {
                for (color, delta) in moves {
                    self.dice.adjust(color, delta);
                }
                self.discarded.push(card);
            }
        }
        self.tally.record(action);

        let record = ActionRecord {
            player,
            card,
            action,
            phase,
            cycle: self.cycle,
            sequence: self.history.len() as u32 + 1,
        };
        debug!(%player, %card, %action, %phase, "resolved");
        self.history.push_back(record);

        self.complete(phase);
        Ok(())
    }

    /// Completion transition after a resolution made in `resolved_in`.
    fn complete(&mut self, resolved_in: Phase) {
        let out_of_turns = self.turns_remaining == 0 || self.deck.is_empty();

        if resolved_in == Phase::Turn && out_of_turns && !self.public.is_empty() {
            self.enter_public();
        } else if self.deck.is_empty() && self.public.is_empty() {
            self.enter_auction();
        } else if resolved_in == Phase::Public {
            if self.public.is_empty() {
                self.enter_next_player();
            } else {
                self.advance();
                debug!(player = ?self.active, remaining = self.public.len(), "next public pick");
            }
        } else if self.turns_remaining == 0 {
            self.enter_next_player();
        }
    }

    fn advance(&mut self) {
        let players = self.policies.len();
        self.active = Some(match self.active {
            Some(current) => current.next(players),
            None => PlayerId::new(1),
        });
    }

    fn enter_public(&mut self) {
        self.phase = Phase::Public;
        self.advance();
        debug!(player = ?self.active, public = self.public.len(), "entering public cleanup");
    }

    fn enter_next_player(&mut self) {
        self.phase = Phase::NextPlayer;
        self.advance();
        self.tally.clear();
        self.turns_remaining = self.turns_per_player;
        self.cycle += 1;
        self.phase = Phase::Turn;
        debug!(player = ?self.active, cycle = self.cycle, deck = self.deck.len(), "new turn-cycle");

        if self.deck.is_empty() && self.public.is_empty() {
            self.enter_auction();
        }
    }

    fn enter_auction(&mut self) {
        self.phase = Phase::Auction;
        info!(pile = self.pile.len(), discarded = self.discarded.len(), "entering auction");
    }

    fn active_or_err(&self, operation: &'static str) -> Result<PlayerId> {
        self.active
            .ok_or_else(|| GameError::state(operation, self.phase, "the round has not started"))
    }

    // =========================================================================
    // Auction and scoring
    // =========================================================================

    /// Hand the pile to `handler`, move the cards it assigns and end the round.
    pub fn run_auction(&mut self, handler: &mut dyn AuctionHandler) -> Result<()> {
        if self.phase != Phase::Auction {
            return Err(GameError::state("run_auction", self.phase, "the round is not at auction"));
        }
        let players = self.policies.len();
        let first = self.active_or_err("run_auction")?.next(players);
        let seats: Vec<PlayerId> = std::iter::successors(Some(first), |p| Some(p.next(players)))
            .take(players)
            .collect();

        let recipients = handler.distribute(&self.pile, &seats);
        if recipients.len() != self.pile.len() {
            return Err(GameError::AuctionMismatch {
                expected: self.pile.len(),
                got: recipients.len(),
            });
        }
        if let Some(stranger) = recipients.iter().find_map(|r| match r {
            Recipient::Player(p) if self.hands.get(*p).is_none() => Some(*p),
            _ => None,
        }) {
            return Err(GameError::state(
                "run_auction",
                self.phase,
                format!("{stranger} is not seated at this table"),
            ));
        }

        for (card, recipient) in self.pile.drain(..).zip(recipients) {
            match recipient {
                Recipient::Player(p) => self.hands[p].push(card),
                Recipient::Discard => self.discarded.push(card),
            }
        }

        self.phase = Phase::End;
        info!(auction = handler.name(), "round ended");
        Ok(())
    }

    /// Per-seat scoring breakdown. Only available in `end`.
    pub fn scoreboard(&self) -> Result<ScoreBoard> {
        if self.phase != Phase::End {
            return Err(GameError::state("scoreboard", self.phase, "the round has not ended"));
        }
        Ok(ScoreBoard::tally(&self.hands, &self.dice))
    }

    /// The round winner. Only available in `end`.
    pub fn winner(&self) -> Result<PlayerId> {
        let board = self.scoreboard()?;
        let winner = board
            .winner()
            .ok_or_else(|| GameError::state("winner", self.phase, "no players are seated"))?;
        info!(%winner, "winner decided");
        Ok(winner)
    }

    // =========================================================================
    // Driver helpers
    // =========================================================================

    /// One `turn → choose_action → resolve` cycle for the active seat's policy.
    pub fn step(&mut self) -> Result<ActionRecord> {
        let draw = self.turn()?;
        let Decision { action, selection } = self.policies[draw.player.index()].choose_action(&draw.card, draw.legal);
        if let Err(err) = self.resolve(draw.player, draw.card, action, &selection) {
            self.undo_turn(draw);
            return Err(err);
        }
        self.history
            .last()
            .cloned()
            .ok_or_else(|| GameError::state("step", self.phase, "resolution left no record"))
    }

    /// Put back the card a failed `step` produced.
    fn undo_turn(&mut self, draw: Draw) {
        self.pending = None;
        if self.phase == Phase::Turn {
            self.deck.push_top(draw.card);
            self.turns_remaining += 1;
        }
    }

    /// Step until the round reaches `auction`.
    pub fn play_until_auction(&mut self) -> Result<()> {
        while self.phase.is_drawing() {
            self.step()?;
        }
        if self.phase == Phase::Auction {
            Ok(())
        } else {
            Err(GameError::state("play_until_auction", self.phase, "the round is not in play"))
        }
    }

    /// Play the rest of the round, run the auction and return the winner.
    pub fn play_round(&mut self, handler: &mut dyn AuctionHandler) -> Result<PlayerId> {
        self.play_until_auction()?;
        self.run_auction(handler)?;
        self.winner()
    }

    // =========================================================================
    // Observers
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    #[must_use]
    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    #[must_use]
    pub fn turns_per_player(&self) -> u32 {
        self.turns_per_player
    }

    /// Turn-cycles begun so far.
    #[must_use]
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Size of the deck at `start`.
    #[must_use]
    pub fn dealt_count(&self) -> usize {
        self.dealt
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn pile_count(&self) -> usize {
        self.pile.len()
    }

    #[must_use]
    pub fn public_count(&self) -> usize {
        self.public.len()
    }

    #[must_use]
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    #[must_use]
    pub fn pile(&self) -> &[Card] {
        &self.pile
    }

    #[must_use]
    pub fn public(&self) -> &[Card] {
        &self.public
    }

    #[must_use]
    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    /// A seat's hand; `None` before `start` or for an unknown seat.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// The card `turn()` produced that has not been resolved yet.
    #[must_use]
    pub fn pending(&self) -> Option<Draw> {
        self.pending
    }

    #[must_use]
    pub fn tally(&self) -> &ActionTally {
        &self.tally
    }

    /// Every resolution this round, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            active_player: self.active,
            turns_remaining: self.turns_remaining,
            turns_per_player: self.turns_per_player,
            cycle: self.cycle,
            deck_count: self.deck.len(),
            pile_count: self.pile.len(),
            discarded_count: self.discarded.len(),
            public: self.public.clone(),
            pending: self.pending.map(|d| d.card),
            dice: self.dice,
            hand_sizes: PlayerMap::from_fn(self.hands.player_count(), |p| self.hands[p].len()),
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("players", &self.policies.len())
            .field("active", &self.active)
            .field("turns_remaining", &self.turns_remaining)
            .field("deck", &self.deck.len())
            .field("pile", &self.pile.len())
            .field("public", &self.public.len())
            .field("discarded", &self.discarded.len())
            .field("dice", &self.dice)
            .finish_non_exhaustive()
    }
}
