use crate::strategy::{make_move, TurnCtx};
use crate::{
    format_cards, pair_mut, Card, EngineEvent, EventSender, GameError, GameState, HumanChannel,
    Player, RngState, SnapshotSink,
};
use std::sync::mpsc::Sender;

/// The turn engine. Owns the players, the seeded random source, the table
/// audit trail, and the snapshot plumbing. Turns are strictly sequential:
/// at most one strategy runs at a time, and only the acting player's hand
/// (plus the drawn-from neighbor's) is touched during a turn.
pub struct Game {
    players: Vec<Player>,
    rng: RngState,
    current: usize,
    step: u32,
    table_pairs: Vec<Card>,
    record_history: bool,
    history: Vec<GameState>,
    sink: Option<Box<dyn SnapshotSink>>,
    events: EventSender,
    human: Option<HumanChannel>,
    over_recorded: bool,
}

impl Game {
    pub fn new(players: Vec<Player>, rng: RngState) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(players.len()));
        }
        Ok(Self {
            players,
            rng,
            current: 0,
            step: 0,
            table_pairs: Vec::new(),
            record_history: true,
            history: Vec::new(),
            sink: None,
            events: EventSender::detached(),
            human: None,
            over_recorded: false,
        })
    }

    pub fn set_record_history(&mut self, on: bool) {
        self.record_history = on;
    }

    pub fn attach_sink(&mut self, sink: Box<dyn SnapshotSink>) {
        self.sink = Some(sink);
    }

    pub fn attach_events(&mut self, tx: Sender<EngineEvent>) {
        self.events = EventSender::attached(tx);
    }

    pub fn attach_human_channel(&mut self, channel: HumanChannel) {
        self.human = Some(channel);
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn table_pairs(&self) -> &[Card] {
        &self.table_pairs
    }

    pub fn history(&self) -> &[GameState] {
        &self.history
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Phase 1: every non-human player sheds the pairs they were dealt, one
    /// snapshot each. Human players keep their pairs until they choose to
    /// purge. Also fixes who acts first in phase 2.
    pub fn start(&mut self) -> Result<(), GameError> {
        if let Some(player) = self
            .players
            .iter()
            .find(|p| p.strategy().is_human() && self.human.is_none())
        {
            return Err(GameError::MissingHumanChannel(player.name().to_string()));
        }

        for idx in 0..self.players.len() {
            if self.players[idx].strategy().is_human() {
                continue;
            }
            let removed = self.players[idx].hand_mut().purge_pairs();
            self.table_pairs.extend(removed.iter().copied());
            let description = format!(
                "{} initial purge: {}",
                self.players[idx].name(),
                format_cards(&removed)
            );
            self.record(description);
        }

        // All-human tables start at a random active seat; once bots are
        // involved the first active seat in order acts first. `next_turn`
        // advances before acting, so `current` points one seat before the
        // first actor.
        let n = self.players.len();
        self.current = if self.players.iter().all(|p| p.strategy().is_human()) {
            let active: Vec<usize> = (0..n).filter(|&idx| self.players[idx].is_active()).collect();
            if active.is_empty() {
                n - 1
            } else {
                let first = active[self.rng.index(active.len())];
                (first + n - 1) % n
            }
        } else {
            n - 1
        };
        Ok(())
    }

    /// One phase-2 turn: advance to the next active player, find their next
    /// active neighbor, resolve the strategy, bank the purged cards, record
    /// one snapshot. Returns false once the game is over; the terminal
    /// snapshot is recorded exactly once.
    pub fn next_turn(&mut self) -> Result<bool, GameError> {
        if self.is_game_over() {
            self.finish();
            return Ok(false);
        }

        self.current = self.next_active(self.current);
        let neighbor = self.next_active(self.current);
        if neighbor == self.current {
            self.finish();
            return Ok(false);
        }

        let kind = self.players[self.current].strategy();
        let removed = {
            let (actor, from) = pair_mut(&mut self.players, self.current, neighbor);
            let mut ctx = TurnCtx {
                rng: &mut self.rng,
                human: self.human.as_ref(),
                events: &self.events,
            };
            make_move(kind, actor, from, &mut ctx)?
        };

        let description = format!(
            "{} turn purge: {}",
            self.players[self.current].name(),
            format_cards(&removed)
        );
        self.table_pairs.extend(removed.iter().copied());
        self.record(description);

        if self.is_game_over() {
            self.finish();
        }
        Ok(true)
    }

    /// Over when at most one player still holds cards, or when only two
    /// remain and one of them is down to the pouilleux alone.
    pub fn is_game_over(&self) -> bool {
        let mut active = self.players.iter().filter(|p| p.is_active());
        match (active.next(), active.next(), active.next()) {
            (None, _, _) | (Some(_), None, _) => true,
            (Some(a), Some(b), None) => a.holds_only_ill() || b.holds_only_ill(),
            _ => false,
        }
    }

    /// Empty until the game is over. Prefers whoever is caught with the
    /// pouilleux alone; otherwise the unique remaining holder.
    pub fn loser(&self) -> Option<&Player> {
        if !self.is_game_over() {
            return None;
        }
        self.players
            .iter()
            .find(|p| p.holds_only_ill())
            .or_else(|| self.players.iter().find(|p| p.is_active()))
    }

    fn finish(&mut self) {
        if self.over_recorded {
            return;
        }
        self.over_recorded = true;
        self.record("Game over".to_string());
        self.events.emit(EngineEvent::GameOver {
            loser: self.loser().map(|p| p.name().to_string()),
        });
    }

    /// Next index after `start` in fixed cyclic order whose hand is
    /// non-empty; `start` itself when no other seat qualifies.
    fn next_active(&self, start: usize) -> usize {
        let n = self.players.len();
        for d in 1..n {
            let idx = (start + d) % n;
            if self.players[idx].is_active() {
                return idx;
            }
        }
        start
    }

    fn record(&mut self, description: String) {
        let state = GameState::capture(self.step, description, &self.players);
        self.step += 1;
        if self.record_history {
            self.history.push(state.clone());
        }
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.record(&state) {
                self.events.emit(EngineEvent::SinkError(err.to_string()));
            }
        }
        self.events.emit(EngineEvent::Snapshot(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HumanAction, Rank, StrategyKind, Suit, ILL_CARD};
    use std::sync::mpsc;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn bot(name: &str, cards: Vec<Card>) -> Player {
        Player::new(name, cards, StrategyKind::DrawThenPurge)
    }

    #[test]
    fn rejects_single_player_tables() {
        assert!(matches!(
            Game::new(vec![bot("solo", vec![])], RngState::from_seed(1)),
            Err(GameError::NotEnoughPlayers(1))
        ));
    }

    #[test]
    fn start_purges_bots_but_not_humans() {
        let pair = vec![card(Rank::Five, Suit::Hearts), card(Rank::Five, Suit::Diamonds)];
        let mut game = Game::new(
            vec![
                bot("bot", pair.clone()),
                Player::new("you", pair.clone(), StrategyKind::Human),
            ],
            RngState::from_seed(1),
        )
        .unwrap();
        let (_handle, channel) = crate::human_channel();
        game.attach_human_channel(channel);
        game.start().unwrap();

        assert!(game.players()[0].hand().is_empty());
        assert_eq!(game.players()[1].hand().len(), 2);
        // One snapshot per processed (bot) participant.
        assert_eq!(game.history().len(), 1);
        assert!(game.history()[0].description.contains("bot initial purge"));
        assert_eq!(game.table_pairs().len(), 2);
    }

    #[test]
    fn start_without_channel_fails_fast_for_human_tables() {
        let mut game = Game::new(
            vec![
                Player::new("you", vec![card(Rank::Two, Suit::Hearts)], StrategyKind::Human),
                bot("bot", vec![card(Rank::Three, Suit::Hearts)]),
            ],
            RngState::from_seed(1),
        )
        .unwrap();
        assert!(matches!(
            game.start(),
            Err(GameError::MissingHumanChannel(name)) if name == "you"
        ));
    }

    #[test]
    fn all_human_tables_start_at_a_random_active_seat() {
        // Seat 1 is dealt out before the game even begins; whatever the
        // seed picks, the first actor must hold cards.
        for seed in 0..16 {
            let (handle, channel) = crate::human_channel();
            let mut game = Game::new(
                vec![
                    Player::new("a", vec![card(Rank::Two, Suit::Hearts)], StrategyKind::Human),
                    Player::new("b", vec![], StrategyKind::Human),
                    Player::new(
                        "c",
                        vec![card(Rank::Three, Suit::Hearts), card(Rank::Four, Suit::Clubs)],
                        StrategyKind::Human,
                    ),
                ],
                RngState::from_seed(seed),
            )
            .unwrap();
            game.attach_human_channel(channel);
            game.start().unwrap();

            handle.enqueue(HumanAction::EndTurn);
            assert!(game.next_turn().unwrap());
            // No initial-purge snapshots on an all-human table, so the
            // first history entry is the first turn.
            let first = &game.history()[0];
            assert!(
                !first.description.starts_with("b "),
                "inactive seat acted first (seed {seed}): {}",
                first.description
            );
        }
    }

    #[test]
    fn skips_empty_hands_for_actor_and_neighbor() {
        // Seat 1 is already out; seat 0 must act and draw from seat 2.
        let mut game = Game::new(
            vec![
                bot("alice", vec![card(Rank::Two, Suit::Hearts)]),
                bot("bob", vec![]),
                bot("carol", vec![card(Rank::Three, Suit::Hearts), card(Rank::Four, Suit::Clubs)]),
            ],
            RngState::from_seed(8),
        )
        .unwrap();
        game.start().unwrap();
        assert!(game.next_turn().unwrap());

        let turn = game.history().last().unwrap();
        assert!(turn.description.starts_with("alice turn purge"));
        // Alice drew exactly one card from Carol; Bob untouched.
        assert_eq!(game.players()[0].hand().len(), 2);
        assert_eq!(game.players()[1].hand().len(), 0);
        assert_eq!(game.players()[2].hand().len(), 1);
    }

    #[test]
    fn two_player_endgame_with_lone_ill_card_is_over() {
        let game = Game::new(
            vec![
                bot("stuck", vec![ILL_CARD]),
                bot("other", vec![card(Rank::Two, Suit::Hearts)]),
            ],
            RngState::from_seed(1),
        )
        .unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.loser().unwrap().name(), "stuck");
    }

    #[test]
    fn lone_holder_loses_when_everyone_else_is_out() {
        let game = Game::new(
            vec![
                bot("out", vec![]),
                bot("holder", vec![ILL_CARD, card(Rank::Two, Suit::Hearts)]),
            ],
            RngState::from_seed(1),
        )
        .unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.loser().unwrap().name(), "holder");
    }

    #[test]
    fn not_over_while_three_players_hold_cards() {
        let game = Game::new(
            vec![
                bot("a", vec![card(Rank::Two, Suit::Hearts)]),
                bot("b", vec![card(Rank::Three, Suit::Hearts)]),
                bot("c", vec![card(Rank::Four, Suit::Hearts)]),
            ],
            RngState::from_seed(1),
        )
        .unwrap();
        assert!(!game.is_game_over());
        assert!(game.loser().is_none());
    }

    #[test]
    fn terminal_snapshot_is_recorded_exactly_once() {
        let mut game = Game::new(
            vec![bot("stuck", vec![ILL_CARD]), bot("out", vec![])],
            RngState::from_seed(1),
        )
        .unwrap();
        game.start().unwrap();
        assert!(!game.next_turn().unwrap());
        assert!(!game.next_turn().unwrap());
        assert!(!game.next_turn().unwrap());
        let terminal: Vec<_> = game
            .history()
            .iter()
            .filter(|s| s.description == "Game over")
            .collect();
        assert_eq!(terminal.len(), 1);
    }

    #[test]
    fn snapshot_steps_increase_without_gaps() {
        let mut rng = RngState::from_seed(0xC0FFEE);
        let mut deck = crate::Deck::pouilleux();
        deck.shuffle(&mut rng);
        let hands = deck.deal(3).unwrap();
        let players: Vec<Player> = hands
            .into_iter()
            .enumerate()
            .map(|(i, cards)| bot(&format!("bot {i}"), cards))
            .collect();
        let mut game = Game::new(players, rng).unwrap();
        game.start().unwrap();
        let mut turns = 0u32;
        while game.next_turn().unwrap() {
            turns += 1;
            assert!(turns < 10_000, "game failed to terminate");
        }
        for (idx, state) in game.history().iter().enumerate() {
            assert_eq!(state.step, idx as u32);
        }
        assert!(game.loser().is_some());
    }

    #[test]
    fn faulty_sink_reports_but_never_aborts() {
        struct BrokenSink;
        impl SnapshotSink for BrokenSink {
            fn record(&mut self, _state: &GameState) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
            }
        }

        let (tx, rx) = mpsc::channel();
        let mut game = Game::new(
            vec![
                bot("a", vec![card(Rank::Two, Suit::Hearts), card(Rank::Two, Suit::Diamonds)]),
                bot("b", vec![card(Rank::Three, Suit::Hearts)]),
            ],
            RngState::from_seed(4),
        )
        .unwrap();
        game.attach_sink(Box::new(BrokenSink));
        game.attach_events(tx);
        game.start().unwrap();

        let mut saw_sink_error = false;
        let mut saw_snapshot = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                EngineEvent::SinkError(msg) => {
                    assert!(msg.contains("disk gone"));
                    saw_sink_error = true;
                }
                EngineEvent::Snapshot(_) => saw_snapshot = true,
                _ => {}
            }
        }
        assert!(saw_sink_error);
        assert!(saw_snapshot);
    }

    #[test]
    fn dealt_endgame_scenario_resolves_to_the_ill_holder() {
        // A = [7h, 7d] purges out entirely at start; B keeps the lone
        // pouilleux after shedding the black threes. One active player
        // remains, so the first next_turn call is already terminal.
        let mut game = Game::new(
            vec![
                bot("a", vec![card(Rank::Seven, Suit::Hearts), card(Rank::Seven, Suit::Diamonds)]),
                bot("b", vec![card(Rank::Three, Suit::Spades), card(Rank::Three, Suit::Clubs), ILL_CARD]),
            ],
            RngState::from_seed(2),
        )
        .unwrap();
        game.start().unwrap();
        assert!(game.players()[0].hand().is_empty());
        assert_eq!(game.players()[1].hand().cards(), &[ILL_CARD]);
        assert!(!game.next_turn().unwrap());
        assert_eq!(game.loser().unwrap().name(), "b");
    }
}
