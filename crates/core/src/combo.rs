use crate::{Card, ModeState, Rank, SuitMask};
use serde::{Deserialize, Serialize};

/// Most cards a single play may contain.
pub const MAX_PLAY_CARDS: usize = 4;
/// Shortest same-suit run accepted as a straight.
pub const MIN_STRAIGHT_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboKind {
    Single,
    Set,
    Straight,
    Invalid,
}

impl ComboKind {
    pub fn id(self) -> &'static str {
        match self {
            ComboKind::Single => "single",
            ComboKind::Set => "set",
            ComboKind::Straight => "straight",
            ComboKind::Invalid => "invalid",
        }
    }
}

/// A classified group of cards.
///
/// `rank` is the governing rank: the shared rank of a single or set, or the
/// naturally highest card of a straight. For an invalid group it is the
/// highest rank present and carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub kind: ComboKind,
    pub cards: Vec<Card>,
    pub suit_mask: SuitMask,
    pub rank: Rank,
}

impl Combination {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.kind != ComboKind::Invalid
    }

    /// Comparison value under `mode`. A straight compares by whichever of its
    /// cards is strongest in the current ordering.
    pub fn effective_rank(&self, mode: &ModeState) -> u8 {
        match self.kind {
            ComboKind::Single | ComboKind::Set => mode.effective(self.rank),
            ComboKind::Straight => self
                .cards
                .iter()
                .map(|card| mode.effective(card.rank()))
                .max()
                .unwrap_or(0),
            ComboKind::Invalid => 0,
        }
    }
}

pub fn classify(cards: &[Card]) -> Combination {
    let mut sorted = cards.to_vec();
    sorted.sort();
    let suit_mask: SuitMask = sorted.iter().filter_map(|card| card.suit()).collect();
    let rank = sorted.last().map(|card| card.rank()).unwrap_or(Rank::Three);
    let kind = detect_kind(&sorted);
    Combination {
        kind,
        cards: sorted,
        suit_mask,
        rank,
    }
}

fn detect_kind(sorted: &[Card]) -> ComboKind {
    let len = sorted.len();
    if len == 1 {
        return ComboKind::Single;
    }
    if len == 0 || len > MAX_PLAY_CARDS {
        return ComboKind::Invalid;
    }
    // Jokers only ever go down alone.
    if sorted.iter().any(|card| card.is_joker()) {
        return ComboKind::Invalid;
    }
    if is_set(sorted) {
        return ComboKind::Set;
    }
    if len >= MIN_STRAIGHT_LEN && is_straight(sorted) {
        return ComboKind::Straight;
    }
    ComboKind::Invalid
}

fn is_set(sorted: &[Card]) -> bool {
    let rank = sorted[0].rank();
    sorted.iter().all(|card| card.rank() == rank)
}

fn is_straight(sorted: &[Card]) -> bool {
    let suit = sorted[0].suit();
    if sorted
        .iter()
        .any(|card| card.suit() != suit || !card.rank().in_straight_range())
    {
        return false;
    }
    sorted
        .windows(2)
        .all(|pair| pair[1].rank().value() == pair[0].rank().value() + 1)
}
