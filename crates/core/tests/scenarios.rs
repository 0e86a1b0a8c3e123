use daifugo_core::{
    classify, init_round, is_legal, Card, ClearReason, Deck, EffectKind, Event, Hand, ModeState,
    Phase, Policy, RngState, RoundConfig, RoundState, SuitMask, TablePlay, SEATS,
};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays a fixed list of proposals, one per seat action.
struct Scripted {
    moves: RefCell<VecDeque<Option<Vec<Card>>>>,
}

impl Scripted {
    fn new(moves: &[&str]) -> Self {
        let moves = moves
            .iter()
            .map(|labels| match *labels {
                "pass" => None,
                labels => Some(cards(labels)),
            })
            .collect();
        Self {
            moves: RefCell::new(moves),
        }
    }
}

impl Policy for Scripted {
    fn choose(&self, _: &Hand, _: Option<&TablePlay>, _: &ModeState) -> Option<Vec<Card>> {
        self.moves.borrow_mut().pop_front().flatten()
    }
}

fn cards(labels: &str) -> Vec<Card> {
    labels
        .split_whitespace()
        .map(|label| label.parse().unwrap())
        .collect()
}

fn scripted_round(
    labels: [&str; SEATS],
    moves: &[&str],
) -> (RoundState<Scripted>, [Hand; SEATS]) {
    let hands: [Hand; SEATS] = labels.map(|labels| labels.parse().unwrap());
    let config = RoundConfig {
        deal_delay_ticks: 0,
        turn_delay_ticks: 0,
        effect_wait_ticks: 2,
        max_effect_wait_ticks: 4,
        opening_seat: 0,
        pass_out_threshold: 3,
    };
    let mut round = RoundState::with_policy(&hands, 0, config, Scripted::new(moves));
    while round.phase == Phase::Dealing {
        round.tick_deal();
    }
    round.events.drain().for_each(drop);
    (round, hands)
}

#[test]
fn dealing_a_full_deck_reveals_all_53_cards() {
    let mut deck = Deck::standard53();
    deck.shuffle(&mut RngState::from_seed(0xC0FFEE));
    let hands = deck.deal_round_robin(0).unwrap();
    let mut round = init_round(&hands, 0);
    let mut grew = [0usize; SEATS];
    while round.phase == Phase::Dealing {
        if let Some(seat) = round.tick_deal().seat_that_grew {
            grew[seat] += 1;
        }
    }
    assert_eq!(grew.iter().sum::<usize>(), 53);
    assert_eq!(hands.iter().map(Hand::len).sum::<usize>(), 53);
    for seat in 0..SEATS {
        assert_eq!(grew[seat], hands[seat].len());
    }
}

#[test]
fn four_of_a_kind_reverses_the_order() {
    let (mut round, mut hands) = scripted_round(
        ["7H 7D 7S 7C 3H", "9H 9D 9S 9C", "5H 5D 5S 5C", "4H 6D"],
        &["7H 7D 7S 7C"],
    );
    let tick = round.tick_turn(&mut hands);
    assert!(tick.accepted);
    assert_eq!(tick.effect, Some(EffectKind::Revolution));
    assert!(round.mode.revolution);

    let nines = classify(&cards("9H 9D 9S 9C"));
    let fives = classify(&cards("5H 5D 5S 5C"));
    assert!(!is_legal(&nines, round.table.as_ref(), &round.mode));
    assert!(is_legal(&fives, round.table.as_ref(), &round.mode));
}

#[test]
fn eight_cut_clears_after_its_wait_and_resets_table_modes() {
    let (mut round, mut hands) = scripted_round(
        ["JH 3C", "8H 4C", "5D 6D", "5S 6S"],
        &["JH", "8H"],
    );
    let jack = round.tick_turn(&mut hands);
    assert_eq!(jack.effect, Some(EffectKind::JackBack));
    assert!(round.mode.jack_back);

    // Turns stay frozen for the display wait.
    assert!(!round.tick_turn(&mut hands).accepted);
    assert!(!round.tick_turn(&mut hands).accepted);

    let eight = round.tick_turn(&mut hands);
    assert!(eight.accepted);
    assert_eq!(eight.played_seat, Some(1));
    assert_eq!(eight.effect, Some(EffectKind::EightCut));
    assert!(round.mode.jack_back);
    assert_eq!(round.mode.suit_lock, None);

    let first = round.tick_turn(&mut hands);
    assert!(!first.cleared);
    assert!(round.table.is_some());
    let second = round.tick_turn(&mut hands);
    assert!(second.cleared);
    assert!(second.table.is_none());
    assert_eq!(round.turn.current_seat, 1);
    assert!(!round.mode.jack_back);
    assert_eq!(round.mode.suit_lock, None);
    assert!(round.events.drain().any(|event| event
        == Event::TableCleared {
            reason: ClearReason::EightCut,
            lead: 1,
        }));
}

#[test]
fn suit_lock_rejects_an_off_suit_follow() {
    let (mut round, mut hands) = scripted_round(
        ["5H 3C", "7H 4C", "9D 9C", "6S 4S"],
        &["5H", "7H", "9D"],
    );
    assert!(round.tick_turn(&mut hands).accepted);
    let lock = round.tick_turn(&mut hands);
    assert_eq!(lock.effect, Some(EffectKind::SuitLock));
    assert_eq!(round.mode.suit_lock, Some(SuitMask::from_bits(0b0001)));

    round.tick_turn(&mut hands);
    round.tick_turn(&mut hands);
    let rejected = round.tick_turn(&mut hands);
    assert!(!rejected.accepted);
    assert!(rejected.passed);
    assert_eq!(hands[2].len(), 2);
    assert_eq!(round.turn.consecutive_passes, 1);
    let events: Vec<Event> = round.events.drain().collect();
    assert!(events.contains(&Event::PlayRejected {
        seat: 2,
        cards: cards("9D"),
    }));
}

#[test]
fn three_passes_return_the_lead_without_a_wait() {
    let (mut round, mut hands) = scripted_round(
        ["KS 3C", "4H 4C", "5D 6D", "5S 6S"],
        &["KS", "pass", "pass", "pass"],
    );
    assert!(round.tick_turn(&mut hands).accepted);
    assert!(!round.tick_turn(&mut hands).cleared);
    assert!(!round.tick_turn(&mut hands).cleared);
    let last = round.tick_turn(&mut hands);
    assert!(last.passed && last.cleared);
    assert!(round.table.is_none());
    assert!(!round.effect_pending());
    assert_eq!(round.turn.current_seat, 0);
    assert_eq!(round.turn.consecutive_passes, 0);
}

#[test]
fn malformed_lead_counts_as_a_free_pass() {
    let (mut round, mut hands) = scripted_round(
        ["3H 4D", "4H 4C", "5D 6D", "5S 6S"],
        &["3H 4D"],
    );
    let tick = round.tick_turn(&mut hands);
    assert!(tick.passed);
    assert!(!tick.accepted);
    assert_eq!(round.turn.consecutive_passes, 0);
    assert_eq!(round.turn.current_seat, 1);
    assert_eq!(hands[0].len(), 2);
}

#[test]
fn identical_deals_replay_identically() {
    let run = |seed: u64| {
        let mut deck = Deck::standard53();
        deck.shuffle(&mut RngState::from_seed(seed));
        let mut hands = deck.deal_round_robin(1).unwrap();
        let mut round = init_round(&hands, 1);
        while round.phase != Phase::Finished {
            round.tick(&mut hands);
        }
        let events: Vec<Event> = round.events.drain().collect();
        (round.finish_order.clone(), round.played.clone(), events)
    };
    assert_eq!(run(42), run(42));
}
