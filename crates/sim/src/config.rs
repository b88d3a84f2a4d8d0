use rouilleux_core::StrategyKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSpec {
    pub name: String,
    pub strategy: StrategyKind,
}

impl BotSpec {
    pub fn new(name: impl Into<String>, strategy: StrategyKind) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Base seed; game i runs from seed + i.
    pub seed: u64,
    pub games: u32,
    pub bots: Vec<BotSpec>,
    /// Safety cap: a lineup that never purges could shuttle cards forever.
    pub max_turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            games: 1,
            bots: vec![
                BotSpec::new("North", StrategyKind::DrawThenPurge),
                BotSpec::new("East", StrategyKind::PurgeThenDraw),
                BotSpec::new("South", StrategyKind::MixedRandom),
                BotSpec::new("West", StrategyKind::ColorAware),
            ],
            max_turns: 10_000,
        }
    }
}
