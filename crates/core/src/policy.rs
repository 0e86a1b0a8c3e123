//! Move selection for a seat.
//!
//! The only heuristic is "play the weakest sufficient answer": when leading,
//! dump the weakest multi-card set first; when following, beat the table
//! with the smallest counter that still wins.

use crate::{
    Card, ComboKind, Hand, ModeState, Suit, SuitMask, TablePlay, MAX_PLAY_CARDS,
    MIN_STRAIGHT_LEN,
};
use std::collections::BTreeMap;

pub trait Policy {
    /// Cards to play, or `None` to pass.
    fn choose(&self, hand: &Hand, table: Option<&TablePlay>, mode: &ModeState) -> Option<Vec<Card>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeakestSufficient;

impl Policy for WeakestSufficient {
    fn choose(&self, hand: &Hand, table: Option<&TablePlay>, mode: &ModeState) -> Option<Vec<Card>> {
        match table {
            None => lead(hand, mode),
            Some(table) => follow(hand, table, mode),
        }
    }
}

fn lead(hand: &Hand, mode: &ModeState) -> Option<Vec<Card>> {
    for size in (2..=MAX_PLAY_CARDS).rev() {
        if let Some(set) = weakest_group(hand, size, None, mode) {
            return Some(set);
        }
    }
    if let Some(single) = weakest_group(hand, 1, None, mode) {
        return Some(single);
    }
    (MIN_STRAIGHT_LEN..=MAX_PLAY_CARDS)
        .rev()
        .find_map(|len| weakest_straight(hand, len, None, mode))
}

fn follow(hand: &Hand, table: &TablePlay, mode: &ModeState) -> Option<Vec<Card>> {
    match table.kind {
        ComboKind::Straight => {
            weakest_straight(hand, table.count(), Some(table.effective_top_rank), mode)
        }
        ComboKind::Single | ComboKind::Set => {
            weakest_group(hand, table.count(), Some(table.effective_top_rank), mode)
        }
        ComboKind::Invalid => None,
    }
}

/// Weakest rank holding `size` cards that beats `floor`, honouring suit-lock.
fn weakest_group(hand: &Hand, size: usize, floor: Option<u8>, mode: &ModeState) -> Option<Vec<Card>> {
    let mut by_strength: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for card in hand.cards() {
        if card.is_joker() && size > 1 {
            continue;
        }
        by_strength
            .entry(mode.effective(card.rank()))
            .or_default()
            .push(*card);
    }

    by_strength
        .into_iter()
        .filter(|(strength, _)| floor.map_or(true, |floor| *strength > floor))
        .find_map(|(_, cards)| pick_from_rank(&cards, size, mode.suit_lock))
}

fn pick_from_rank(cards: &[Card], size: usize, lock: Option<SuitMask>) -> Option<Vec<Card>> {
    match lock {
        Some(mask) => {
            if mask.len() != size {
                return None;
            }
            let picked: Vec<Card> = cards
                .iter()
                .copied()
                .filter(|card| card.suit().is_some_and(|suit| mask.contains(suit)))
                .collect();
            (picked.len() == size).then_some(picked)
        }
        None => (cards.len() >= size).then(|| cards[..size].to_vec()),
    }
}

/// Weakest same-suit run of `len` whose top beats `floor`.
///
/// Ties in top strength go to the earlier suit.
fn weakest_straight(
    hand: &Hand,
    len: usize,
    floor: Option<u8>,
    mode: &ModeState,
) -> Option<Vec<Card>> {
    Suit::ALL
        .into_iter()
        .flat_map(|suit| suit_runs(hand, suit, len))
        .map(|run| {
            let top = run
                .iter()
                .map(|card| mode.effective(card.rank()))
                .max()
                .unwrap_or(0);
            (top, run)
        })
        .filter(|(top, _)| floor.map_or(true, |floor| *top > floor))
        .min_by_key(|(top, _)| *top)
        .map(|(_, run)| run)
}

fn suit_runs(hand: &Hand, suit: Suit, len: usize) -> Vec<Vec<Card>> {
    let cards: Vec<Card> = hand
        .cards()
        .iter()
        .copied()
        .filter(|card| card.suit() == Some(suit) && card.rank().in_straight_range())
        .collect();
    cards
        .windows(len)
        .filter(|window| {
            window
                .windows(2)
                .all(|pair| pair[1].rank().value() == pair[0].rank().value() + 1)
        })
        .map(<[Card]>::to_vec)
        .collect()
}
