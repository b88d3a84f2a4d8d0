use rouilleux_sim::{BotSpec, SimConfig, Simulator};
use rouilleux_core::StrategyKind;

fn lineup(strategies: &[StrategyKind]) -> Vec<BotSpec> {
    strategies
        .iter()
        .enumerate()
        .map(|(i, s)| BotSpec::new(format!("bot {i}"), *s))
        .collect()
}

macro_rules! batch_case {
    ($name:ident, $seed:expr, $games:expr, $strategies:expr) => {
        #[test]
        fn $name() {
            let config = SimConfig {
                seed: $seed,
                games: $games,
                bots: lineup(&$strategies),
                max_turns: 10_000,
            };
            let result = Simulator::new(config).unwrap().run().unwrap();
            assert_eq!(result.games.len(), $games as usize);
            for record in &result.games {
                // Cards only leave hands through table purges: whatever is
                // missing from the hands is banked on the table.
                assert_eq!(
                    record.table_pairs + record.cards_left,
                    51,
                    "card conservation broke in game {} (seed {})",
                    record.game,
                    record.seed
                );
                // The pouilleux can never be purged, so someone always
                // holds it at the end and loses.
                assert!(record.cards_left >= 1);
                assert!(
                    record.loser.is_some(),
                    "game {} ended with no loser",
                    record.game
                );
                // Purged cards leave in pairs.
                assert_eq!(record.table_pairs % 2, 0);
            }
            let total_losses: u32 = result.standings.iter().map(|s| s.losses).sum();
            assert_eq!(total_losses, $games);
        }
    };
}

batch_case!(
    two_draw_then_purge_bots,
    11,
    5,
    [StrategyKind::DrawThenPurge, StrategyKind::DrawThenPurge]
);
batch_case!(
    purge_then_draw_pair,
    12,
    5,
    [StrategyKind::PurgeThenDraw, StrategyKind::DrawThenPurge]
);
batch_case!(
    three_mixed_bots,
    13,
    5,
    [
        StrategyKind::MixedRandom,
        StrategyKind::DrawThenPurge,
        StrategyKind::PurgeThenDraw
    ]
);
batch_case!(
    bluffers_at_a_full_table,
    14,
    5,
    [
        StrategyKind::ColorAware,
        StrategyKind::PurgeRedThenDraw,
        StrategyKind::DrawThenPurge,
        StrategyKind::MixedRandom
    ]
);
batch_case!(
    opportunistic_random_draw_still_finishes,
    15,
    5,
    [
        StrategyKind::RandomDraw { opportunistic: true },
        StrategyKind::DrawThenPurge,
        StrategyKind::PurgeThenDraw
    ]
);
batch_case!(
    four_color_aware_bots,
    16,
    3,
    [
        StrategyKind::ColorAware,
        StrategyKind::ColorAware,
        StrategyKind::ColorAware,
        StrategyKind::ColorAware
    ]
);
