use crate::{Card, Color, GameError, Rank, RngState};
use serde::{Deserialize, Serialize};

/// One player's cards. Order carries no game meaning; it only matters for
/// display and the explicit sort commands, so removals keep the remaining
/// cards in place and draws append at the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True iff some rank group holds two cards of equal color.
    pub fn has_pairs(&self) -> bool {
        for rank in Rank::ALL {
            let mut red = 0usize;
            let mut black = 0usize;
            for card in self.cards.iter().filter(|c| c.rank == rank) {
                match card.color() {
                    Color::Red => red += 1,
                    Color::Black => black += 1,
                }
            }
            if red >= 2 || black >= 2 {
                return true;
            }
        }
        false
    }

    /// Removes at most one red pair and one black pair per rank and returns
    /// the removed cards in discovery order, first-completed-pair-first.
    /// A rank with four same-color cards still yields a single purge for that
    /// color; the leftovers wait for a future call.
    pub fn purge_pairs(&mut self) -> Vec<Card> {
        // Matched cards are tracked by position, not value, so a hand
        // holding several equal cards sheds exactly one pair's worth.
        let mut taken: Vec<usize> = Vec::new();
        for rank in Rank::ALL {
            let group: Vec<usize> = (0..self.cards.len())
                .filter(|&idx| self.cards[idx].rank == rank)
                .collect();
            if group.len() < 2 {
                continue;
            }
            let mut red_done = false;
            let mut black_done = false;
            'group: for (pos, &i) in group.iter().enumerate() {
                if taken.contains(&i) {
                    continue;
                }
                for &j in &group[pos + 1..] {
                    if !self.cards[i].same_color(&self.cards[j]) {
                        continue;
                    }
                    let done = match self.cards[i].color() {
                        Color::Red => &mut red_done,
                        Color::Black => &mut black_done,
                    };
                    if *done {
                        continue;
                    }
                    *done = true;
                    taken.push(i);
                    taken.push(j);
                    if red_done && black_done {
                        break 'group;
                    }
                    break;
                }
            }
        }
        let removed: Vec<Card> = taken.iter().map(|&idx| self.cards[idx]).collect();
        taken.sort_unstable_by(|a, b| b.cmp(a));
        for idx in taken {
            self.cards.remove(idx);
        }
        removed
    }

    /// Takes one uniformly random card out of `other` and appends it here.
    /// The engine only ever passes active neighbors, so the empty-source
    /// error signals an internal logic fault rather than a game situation.
    pub fn draw_from(&mut self, other: &mut Hand, rng: &mut RngState) -> Result<Card, GameError> {
        if other.cards.is_empty() {
            return Err(GameError::EmptyDraw);
        }
        let idx = rng.index(other.cards.len());
        let card = other.cards.remove(idx);
        self.cards.push(card);
        Ok(card)
    }

    /// Puts cards back. Bluff strategies use this to undo the part of a
    /// purge they want to keep holding.
    pub fn receive(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }

    pub fn sort_by_rank(&mut self) {
        self.cards.sort_by_key(|c| (c.rank, c.suit));
    }

    pub fn sort_by_suit(&mut self) {
        self.cards.sort_by_key(|c| (c.suit, c.rank));
    }

    /// Reds first, then blacks, by rank within each color.
    pub fn sort_by_color(&mut self) {
        self.cards.sort_by_key(|c| (c.color(), c.rank));
    }
}
