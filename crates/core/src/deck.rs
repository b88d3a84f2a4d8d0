use crate::{Card, GameError, Rank, RngState, Suit, OMITTED_CARD};

/// The 51-card Pouilleux deck: every rank and suit except the Jack of Clubs.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn pouilleux() -> Self {
        let mut cards = Vec::with_capacity(51);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let card = Card::new(rank, suit);
                if card == OMITTED_CARD {
                    continue;
                }
                cards.push(card);
            }
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    /// Deals round-robin into `players` hands. Hand sizes differ by at most
    /// one; with fewer than two players the configuration is rejected.
    pub fn deal(self, players: usize) -> Result<Vec<Vec<Card>>, GameError> {
        if players < 2 {
            return Err(GameError::NotEnoughPlayers(players));
        }
        let mut hands = vec![Vec::new(); players];
        for (idx, card) in self.cards.into_iter().enumerate() {
            hands[idx % players].push(card);
        }
        Ok(hands)
    }
}
