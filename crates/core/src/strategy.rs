use crate::{
    Card, Color, EngineEvent, EventSender, GameError, HumanAction, HumanChannel, Player, RngState,
};
use serde::{Deserialize, Serialize};

/// How a player resolves one turn. Closed set, fixed at player creation;
/// every variant dispatches through [`make_move`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StrategyKind {
    /// Draw one card from the neighbor, then purge.
    DrawThenPurge,
    /// Purge first, then draw. A pair formed by the draw survives until the
    /// next turn.
    PurgeThenDraw,
    /// Draw only. With `opportunistic` set, also purge after the draw and
    /// report the purged cards; otherwise never purge.
    RandomDraw { opportunistic: bool },
    /// Pick one of the three base strategies uniformly, each turn anew.
    MixedRandom,
    /// Bluff: purge, keep only the majority color out, return the rest to
    /// the hand, draw, then purge everything that formed.
    ColorAware,
    /// Bluff: keep only red purges out, draw, then keep only black purges
    /// from the second sweep.
    PurgeRedThenDraw,
    /// Blocks on the human input channel until END_TURN arrives.
    Human,
}

impl StrategyKind {
    /// The pool the bot factory draws from.
    pub const BOT_POOL: [StrategyKind; 2] = [StrategyKind::DrawThenPurge, StrategyKind::MixedRandom];

    const MIXED_POOL: [StrategyKind; 3] = [
        StrategyKind::RandomDraw { opportunistic: true },
        StrategyKind::PurgeThenDraw,
        StrategyKind::DrawThenPurge,
    ];

    pub fn random_bot(rng: &mut RngState) -> StrategyKind {
        Self::BOT_POOL[rng.index(Self::BOT_POOL.len())]
    }

    pub fn is_human(self) -> bool {
        matches!(self, StrategyKind::Human)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            StrategyKind::DrawThenPurge => "draw-then-purge",
            StrategyKind::PurgeThenDraw => "purge-then-draw",
            StrategyKind::RandomDraw { opportunistic: false } => "random-draw",
            StrategyKind::RandomDraw { opportunistic: true } => "random-draw-purge",
            StrategyKind::MixedRandom => "mixed",
            StrategyKind::ColorAware => "color-aware",
            StrategyKind::PurgeRedThenDraw => "purge-red",
            StrategyKind::Human => "human",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<StrategyKind> {
        match keyword {
            "draw-then-purge" => Some(StrategyKind::DrawThenPurge),
            "purge-then-draw" => Some(StrategyKind::PurgeThenDraw),
            "random-draw" => Some(StrategyKind::RandomDraw { opportunistic: false }),
            "random-draw-purge" => Some(StrategyKind::RandomDraw { opportunistic: true }),
            "mixed" => Some(StrategyKind::MixedRandom),
            "color-aware" => Some(StrategyKind::ColorAware),
            "purge-red" => Some(StrategyKind::PurgeRedThenDraw),
            "human" => Some(StrategyKind::Human),
            _ => None,
        }
    }
}

/// Everything a strategy may touch besides the two hands involved.
pub(crate) struct TurnCtx<'a> {
    pub rng: &'a mut RngState,
    pub human: Option<&'a HumanChannel>,
    pub events: &'a EventSender,
}

/// Resolves one turn for `actor`, drawing from `neighbor` as the strategy
/// dictates, and returns the cards actually purged (not merely drawn).
pub(crate) fn make_move(
    kind: StrategyKind,
    actor: &mut Player,
    neighbor: &mut Player,
    ctx: &mut TurnCtx<'_>,
) -> Result<Vec<Card>, GameError> {
    match kind {
        StrategyKind::DrawThenPurge => {
            actor.hand_mut().draw_from(neighbor.hand_mut(), ctx.rng)?;
            Ok(actor.hand_mut().purge_pairs())
        }
        StrategyKind::PurgeThenDraw => {
            let removed = actor.hand_mut().purge_pairs();
            actor.hand_mut().draw_from(neighbor.hand_mut(), ctx.rng)?;
            Ok(removed)
        }
        StrategyKind::RandomDraw { opportunistic } => {
            actor.hand_mut().draw_from(neighbor.hand_mut(), ctx.rng)?;
            if opportunistic && actor.hand().has_pairs() {
                Ok(actor.hand_mut().purge_pairs())
            } else {
                Ok(Vec::new())
            }
        }
        StrategyKind::MixedRandom => {
            let choice = StrategyKind::MIXED_POOL[ctx.rng.index(StrategyKind::MIXED_POOL.len())];
            make_move(choice, actor, neighbor, ctx)
        }
        StrategyKind::ColorAware => color_aware_move(actor, neighbor, ctx),
        StrategyKind::PurgeRedThenDraw => purge_red_move(actor, neighbor, ctx),
        StrategyKind::Human => human_move(actor, neighbor, ctx),
    }
}

fn split_by_color(cards: Vec<Card>, keep: Color) -> (Vec<Card>, Vec<Card>) {
    cards.into_iter().partition(|c| c.color() == keep)
}

/// Purge everything, but only let the majority color of the remaining hand
/// stay purged; the other color goes back as a bluff. The post-draw sweep
/// then removes pairs of either color for good.
fn color_aware_move(
    actor: &mut Player,
    neighbor: &mut Player,
    ctx: &mut TurnCtx<'_>,
) -> Result<Vec<Card>, GameError> {
    let mut removed = Vec::new();

    let first = actor.hand_mut().purge_pairs();
    let reds_in_hand = actor
        .hand()
        .cards()
        .iter()
        .filter(|c| c.color() == Color::Red)
        .count();
    let blacks_in_hand = actor.hand().len() - reds_in_hand;
    let keep = if reds_in_hand > blacks_in_hand {
        Color::Red
    } else {
        Color::Black
    };
    let (kept, returned) = split_by_color(first, keep);
    removed.extend(kept);
    actor.hand_mut().receive(returned);

    actor.hand_mut().draw_from(neighbor.hand_mut(), ctx.rng)?;

    removed.extend(actor.hand_mut().purge_pairs());
    Ok(removed)
}

/// Red pairs leave on the first sweep, black pairs only on the post-draw
/// sweep; everything else returns to the hand and waits.
fn purge_red_move(
    actor: &mut Player,
    neighbor: &mut Player,
    ctx: &mut TurnCtx<'_>,
) -> Result<Vec<Card>, GameError> {
    let mut removed = Vec::new();

    let first = actor.hand_mut().purge_pairs();
    let (reds, blacks) = split_by_color(first, Color::Red);
    removed.extend(reds);
    actor.hand_mut().receive(blacks);

    actor.hand_mut().draw_from(neighbor.hand_mut(), ctx.rng)?;

    let second = actor.hand_mut().purge_pairs();
    let (reds, blacks) = split_by_color(second, Color::Red);
    removed.extend(blacks);
    actor.hand_mut().receive(reds);

    Ok(removed)
}

/// Consumes queued actions one at a time. Purges and sorts take effect
/// immediately and announce the changed hand; END_TURN performs the draw
/// (if the actor still holds cards) and finishes the turn. A closed queue
/// means cancellation: return what was purged so far.
fn human_move(
    actor: &mut Player,
    neighbor: &mut Player,
    ctx: &mut TurnCtx<'_>,
) -> Result<Vec<Card>, GameError> {
    let channel = ctx
        .human
        .ok_or_else(|| GameError::MissingHumanChannel(actor.name().to_string()))?;

    let mut removed = Vec::new();
    loop {
        let Some(action) = channel.wait() else {
            return Ok(removed);
        };
        match action {
            HumanAction::PurgePairs => removed.extend(actor.hand_mut().purge_pairs()),
            HumanAction::SortByRank => actor.hand_mut().sort_by_rank(),
            HumanAction::SortBySuit => actor.hand_mut().sort_by_suit(),
            HumanAction::SortByColor => actor.hand_mut().sort_by_color(),
            HumanAction::EndTurn => {
                if !actor.hand().is_empty() {
                    actor.hand_mut().draw_from(neighbor.hand_mut(), ctx.rng)?;
                }
                return Ok(removed);
            }
        }
        ctx.events.emit(EngineEvent::HandChanged {
            player: actor.name().to_string(),
            hand: actor.hand().cards().to_vec(),
        });
    }
}
