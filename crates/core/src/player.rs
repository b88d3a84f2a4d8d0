use crate::{Card, Hand, StrategyKind, ILL_CARD};

/// One participant: a name, the hand they exclusively own, and the strategy
/// fixed at creation. Hand contents change only through the defined
/// operations (draw, receive, purge, sort), and only during this player's
/// own turn.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    hand: Hand,
    strategy: StrategyKind,
}

impl Player {
    pub fn new(name: impl Into<String>, cards: Vec<Card>, strategy: StrategyKind) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(cards),
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Active means still holding at least one card.
    pub fn is_active(&self) -> bool {
        !self.hand.is_empty()
    }

    /// The losing shape: nothing left but the pouilleux.
    pub fn holds_only_ill(&self) -> bool {
        self.hand.cards() == [ILL_CARD]
    }
}

/// Mutable access to two distinct players of the same seating at once, for
/// the draw-from-neighbor step.
pub fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = players.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = players.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
