use crate::LaunchOptions;
use anyhow::{Context, Result};
use rouilleux_core::{
    human_channel, Deck, EngineEvent, Game, HumanAction, HumanHandle, Player, PlayerSnapshot,
    RngState, StrategyKind,
};
use rouilleux_replay::{default_replay_dir, ReplayLogger, Scoreboard, ScoreEntry};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_BOTS: usize = 3;
const MAX_EVENT_LOG: usize = 200;
// Cosmetic pacing between bot turns so the log is followable. Presentation
// only; the engine knows nothing about it.
const TURN_PACING: Duration = Duration::from_millis(300);

const BOT_NAMES: [&str; 3] = ["Berthe", "Colette", "Marcel"];

pub struct App {
    pub human_name: String,
    pub seed: u64,
    pub players: Vec<PlayerSnapshot>,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub standings: Vec<ScoreEntry>,
    pub show_help: bool,
    pub should_quit: bool,
    pub game_over: bool,
    pub loser: Option<String>,
    handle: HumanHandle,
    events: Receiver<EngineEvent>,
    scoreboard: Option<Scoreboard>,
    worker: Option<JoinHandle<()>>,
}

impl App {
    pub fn bootstrap(options: LaunchOptions) -> Result<Self> {
        let bots = options.bots.unwrap_or(DEFAULT_BOTS).clamp(1, 3);
        let human_name = options.name.unwrap_or_else(|| "You".to_string());

        let mut rng = match options.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let seed = rng.seed();

        let mut deck = Deck::pouilleux();
        deck.shuffle(&mut rng);
        let mut hands = deck.deal(bots + 1).context("deal")?;

        let mut players = vec![Player::new(
            human_name.clone(),
            hands.remove(0),
            StrategyKind::Human,
        )];
        for (idx, cards) in hands.into_iter().enumerate() {
            players.push(Player::new(
                BOT_NAMES[idx % BOT_NAMES.len()],
                cards,
                StrategyKind::random_bot(&mut rng),
            ));
        }

        let (handle, channel) = human_channel();
        let (events_tx, events_rx) = mpsc::channel();

        let mut game = Game::new(players, rng).context("set up game")?;
        game.set_record_history(false);
        game.attach_human_channel(channel);
        game.attach_events(events_tx.clone());

        let mut status_line = format!("seed {seed}; your keys: p r s c Enter (? for help)");
        if !options.no_replay {
            match ReplayLogger::create_in(&default_replay_dir()) {
                Ok(logger) => game.attach_sink(Box::new(logger)),
                Err(err) => status_line = format!("replay disabled: {err:#}"),
            }
        }

        game.start().context("start game")?;
        let players: Vec<PlayerSnapshot> = game
            .players()
            .iter()
            .map(|p| PlayerSnapshot {
                name: p.name().to_string(),
                hand: p.hand().cards().to_vec(),
            })
            .collect();

        let worker = thread::spawn(move || drive_turns(game, events_tx, TURN_PACING));

        let scoreboard = match Scoreboard::open(Scoreboard::default_path()) {
            Ok(board) => Some(board),
            Err(err) => {
                status_line = format!("scoreboard unavailable: {err:#}");
                None
            }
        };
        let standings = scoreboard
            .as_ref()
            .map(|b| b.standings())
            .unwrap_or_default();

        Ok(Self {
            human_name,
            seed,
            players,
            event_log: VecDeque::new(),
            status_line,
            standings,
            show_help: false,
            should_quit: false,
            game_over: false,
            loser: None,
            handle,
            events: events_rx,
            scoreboard,
            worker: Some(worker),
        })
    }

    pub fn enqueue(&mut self, action: HumanAction) {
        if self.game_over {
            self.set_status("game is over; press q to leave the table");
            return;
        }
        self.handle.enqueue(action);
        self.set_status(match action {
            HumanAction::PurgePairs => "queued: purge pairs",
            HumanAction::SortByRank => "queued: sort by rank",
            HumanAction::SortBySuit => "queued: sort by suit",
            HumanAction::SortByColor => "queued: sort by color",
            HumanAction::EndTurn => "queued: end turn",
        });
    }

    /// Applies everything the worker produced since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn your_hand(&self) -> &[rouilleux_core::Card] {
        self.players
            .iter()
            .find(|p| p.name == self.human_name)
            .map(|p| p.hand.as_slice())
            .unwrap_or(&[])
    }

    fn apply_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Snapshot(state) => {
                self.push_log(format!("step {:>3}  {}", state.step, state.description));
                self.players = state.players;
            }
            EngineEvent::HandChanged { player, hand } => {
                if let Some(snapshot) = self.players.iter_mut().find(|p| p.name == player) {
                    snapshot.hand = hand;
                }
            }
            EngineEvent::SinkError(msg) => self.set_status(format!("replay log failed: {msg}")),
            EngineEvent::GameOver { loser } => self.finish_game(loser),
            EngineEvent::Fault(msg) => self.set_status(format!("engine fault: {msg}")),
        }
    }

    fn finish_game(&mut self, loser: Option<String>) {
        self.game_over = true;
        self.loser = loser.clone();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        match &loser {
            Some(name) => {
                self.push_log(format!("{name} is stuck with the pouilleux"));
                if let Some(board) = self.scoreboard.as_mut() {
                    if let Err(err) = board.record_loss(name) {
                        self.set_status(format!("could not save scoreboard: {err:#}"));
                    } else {
                        self.standings = board.standings();
                    }
                }
                let verdict = if *name == self.human_name {
                    "you lose! press q to leave the table"
                } else {
                    "you survived! press q to leave the table"
                };
                self.set_status(verdict);
            }
            None => self.set_status("game over; press q to leave the table"),
        }
    }

    fn set_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn push_log(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

/// Runs the game to its terminal state on the worker thread. Pacing stops
/// as soon as the outcome is known, so the UI thread's end-of-game join
/// never waits on a sleep.
fn drive_turns(mut game: Game, events: Sender<EngineEvent>, pacing: Duration) {
    loop {
        match game.next_turn() {
            Ok(true) => {
                if !game.is_game_over() {
                    thread::sleep(pacing);
                }
            }
            Ok(false) => break,
            Err(err) => {
                let _ = events.send(EngineEvent::Fault(err.to_string()));
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rouilleux_core::{Card, Rank, StrategyKind, Suit};
    use std::time::Instant;

    #[test]
    fn driver_stops_pacing_once_the_outcome_is_known() {
        // Single-turn game: a draws b's only card, completes the pair,
        // and nobody holds cards afterwards.
        let players = vec![
            Player::new(
                "a",
                vec![Card::new(Rank::Two, Suit::Hearts)],
                StrategyKind::DrawThenPurge,
            ),
            Player::new(
                "b",
                vec![Card::new(Rank::Two, Suit::Diamonds)],
                StrategyKind::DrawThenPurge,
            ),
        ];
        let (tx, rx) = mpsc::channel();
        let mut game = Game::new(players, RngState::from_seed(3)).unwrap();
        game.attach_events(tx.clone());
        game.start().unwrap();

        let started = Instant::now();
        drive_turns(game, tx, Duration::from_secs(2));
        assert!(
            started.elapsed() < Duration::from_secs(1),
            "driver kept pacing after the terminal turn"
        );

        let mut saw_game_over = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, EngineEvent::GameOver { .. }) {
                saw_game_over = true;
            }
        }
        assert!(saw_game_over);
    }
}
