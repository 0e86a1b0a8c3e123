use crate::{Card, CardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One seat's cards, always sorted by (rank, suit) with the Joker last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub const CAPACITY: usize = 14;

    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.sort();
        cards.dedup();
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

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// True when every card is held and none is listed twice.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut wanted = cards.to_vec();
        wanted.sort();
        wanted.dedup();
        wanted.len() == cards.len() && wanted.iter().all(|card| self.contains(*card))
    }

    /// Removes all of `cards` or nothing.
    pub fn remove_cards(&mut self, cards: &[Card]) -> bool {
        if !self.contains_all(cards) {
            return false;
        }
        self.cards.retain(|card| !cards.contains(card));
        true
    }

    pub(crate) fn insert(&mut self, card: Card) {
        if let Err(pos) = self.cards.binary_search(&card) {
            self.cards.insert(pos, card);
        }
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand::new(iter)
    }
}

impl FromStr for Hand {
    type Err = CardError;

    /// Whitespace separated card labels, e.g. `"3H 3S 7D JK"`.
    fn from_str(labels: &str) -> Result<Self, Self::Err> {
        labels
            .split_whitespace()
            .map(str::parse::<Card>)
            .collect::<Result<Vec<_>, _>>()
            .map(Hand::new)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "[{}]", labels.join(" "))
    }
}
