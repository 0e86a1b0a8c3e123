use crate::{Card, Hand, Rank, RngState, Seat, Suit, SEATS};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("seat {seat} would hold more than {capacity} cards")]
    HandOverflow { seat: Seat, capacity: usize },
    #[error("start seat {0} is out of range")]
    SeatOutOfRange(Seat),
}

#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// 52 suited cards plus one Joker.
    pub fn standard53() -> Self {
        let mut cards = Vec::with_capacity(53);
        for suit in Suit::ALL {
            for rank in Rank::SUITED {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.push(Card::JOKER);
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    /// Card `i` goes to seat `(start + i) % SEATS`.
    pub fn deal_round_robin(&self, start: Seat) -> Result<[Hand; SEATS], DealError> {
        if start >= SEATS {
            return Err(DealError::SeatOutOfRange(start));
        }
        let mut hands: [Hand; SEATS] = Default::default();
        for (idx, card) in self.cards.iter().enumerate() {
            let seat = (start + idx) % SEATS;
            if hands[seat].len() >= Hand::CAPACITY {
                return Err(DealError::HandOverflow {
                    seat,
                    capacity: Hand::CAPACITY,
                });
            }
            hands[seat].insert(*card);
        }
        Ok(hands)
    }
}
