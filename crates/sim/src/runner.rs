use crate::{BatchResult, GameRecord, SimConfig, SimError, StandingRecord};
use rouilleux_core::{Deck, Game, Player, RngState};
use std::collections::HashMap;
use std::time::Instant;

/// Plays complete bot-only games from a base seed. Each game deals a fresh
/// 51-card deck, runs the engine to its terminal state, and records who got
/// stuck with the pouilleux.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        if config.bots.len() < 2 {
            return Err(SimError::Config(format!(
                "need at least two bots, got {}",
                config.bots.len()
            )));
        }
        if let Some(spec) = config.bots.iter().find(|b| b.strategy.is_human()) {
            return Err(SimError::Config(format!(
                "bot {} uses the human strategy; headless batches have no input channel",
                spec.name
            )));
        }
        if config.games == 0 {
            return Err(SimError::Config("games must be at least 1".to_string()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn run(&self) -> Result<BatchResult, SimError> {
        let started = Instant::now();
        let mut games = Vec::with_capacity(self.config.games as usize);
        let mut losses: HashMap<String, u32> = HashMap::new();

        for idx in 0..self.config.games {
            let seed = self.config.seed.wrapping_add(u64::from(idx));
            let record = self.play_one(idx, seed)?;
            if let Some(loser) = &record.loser {
                *losses.entry(loser.clone()).or_insert(0) += 1;
            }
            games.push(record);
        }

        let mut standings: Vec<StandingRecord> = losses
            .into_iter()
            .map(|(name, losses)| StandingRecord { name, losses })
            .collect();
        standings.sort_by(|a, b| b.losses.cmp(&a.losses).then_with(|| a.name.cmp(&b.name)));

        Ok(BatchResult {
            seed: self.config.seed,
            games,
            standings,
            wall_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn play_one(&self, game_idx: u32, seed: u64) -> Result<GameRecord, SimError> {
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::pouilleux();
        deck.shuffle(&mut rng);
        let hands = deck.deal(self.config.bots.len())?;

        let players: Vec<Player> = self
            .config
            .bots
            .iter()
            .zip(hands)
            .map(|(spec, cards)| Player::new(spec.name.clone(), cards, spec.strategy))
            .collect();

        let mut game = Game::new(players, rng)?;
        game.set_record_history(false);
        game.start()?;

        let mut turns = 0u32;
        while game.next_turn()? {
            turns += 1;
            if turns >= self.config.max_turns {
                return Err(SimError::TurnCapExceeded {
                    game: game_idx,
                    turns,
                });
            }
        }

        let cards_left: usize = game.players().iter().map(|p| p.hand().len()).sum();
        Ok(GameRecord {
            game: game_idx,
            seed,
            turns,
            steps: game.step(),
            loser: game.loser().map(|p| p.name().to_string()),
            table_pairs: game.table_pairs().len(),
            cards_left,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BotSpec;
    use rouilleux_core::StrategyKind;

    #[test]
    fn rejects_human_bots_and_short_lineups() {
        let mut config = SimConfig::default();
        config.bots[0].strategy = StrategyKind::Human;
        assert!(matches!(
            Simulator::new(config),
            Err(SimError::Config(msg)) if msg.contains("human")
        ));

        let lonely = SimConfig {
            bots: vec![BotSpec::new("solo", StrategyKind::DrawThenPurge)],
            ..SimConfig::default()
        };
        assert!(matches!(Simulator::new(lonely), Err(SimError::Config(_))));
    }

    #[test]
    fn batch_is_reproducible_from_its_seed() {
        let config = SimConfig {
            games: 3,
            ..SimConfig::default()
        };
        let a = Simulator::new(config.clone()).unwrap().run().unwrap();
        let b = Simulator::new(config).unwrap().run().unwrap();
        for (x, y) in a.games.iter().zip(&b.games) {
            assert_eq!(x.loser, y.loser);
            assert_eq!(x.turns, y.turns);
            assert_eq!(x.table_pairs, y.table_pairs);
        }
    }
}
