//! Property tests for the rank model, legality and move selection.

use daifugo_core::{
    classify, effective_rank, init_round, is_legal, Card, Combination, Deck, Hand, ModeState,
    Phase, Policy, Rank, RngState, Suit, TablePlay, WeakestSufficient, MAX_PLAY_CARDS, SEATS,
};
use proptest::prelude::*;

fn rank_strategy() -> impl Strategy<Value = Rank> {
    prop_oneof![
        proptest::sample::select(Rank::SUITED.to_vec()),
        Just(Rank::Joker),
    ]
}

fn mode_strategy() -> impl Strategy<Value = (bool, bool)> {
    (any::<bool>(), any::<bool>())
}

/// A valid table play: a single, a set, or a straight.
fn table_cards_strategy() -> impl Strategy<Value = Vec<Card>> {
    let single = (0usize..53).prop_map(|idx| vec![Deck::standard53().cards[idx]]);
    let set = (0usize..13, 2usize..=4).prop_map(|(rank, count)| {
        Suit::ALL[..count]
            .iter()
            .map(|suit| Card::new(Rank::SUITED[rank], *suit))
            .collect::<Vec<Card>>()
    });
    let straight = (0usize..4, 0usize..=8, 3usize..=4).prop_map(|(suit, start, len)| {
        let start = start.min(11 - len);
        Rank::SUITED[start..start + len]
            .iter()
            .map(|rank| Card::new(*rank, Suit::ALL[suit]))
            .collect::<Vec<Card>>()
    });
    prop_oneof![single, set, straight]
}

/// Every subset of `hand` with exactly `size` cards.
fn subsets(hand: &[Card], size: usize) -> Vec<Vec<Card>> {
    if size == 0 {
        return vec![Vec::new()];
    }
    if hand.len() < size {
        return Vec::new();
    }
    let (first, rest) = (hand[0], &hand[1..]);
    let mut out: Vec<Vec<Card>> = subsets(rest, size - 1)
        .into_iter()
        .map(|mut tail| {
            tail.insert(0, first);
            tail
        })
        .collect();
    out.extend(subsets(rest, size));
    out
}

fn legal_responses(hand: &Hand, table: &TablePlay, mode: &ModeState) -> Vec<Combination> {
    subsets(hand.cards(), table.count())
        .into_iter()
        .map(|cards| classify(&cards))
        .filter(|play| is_legal(play, Some(table), mode))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_inversion_sources_are_interchangeable(rank in rank_strategy()) {
        prop_assert_eq!(effective_rank(rank, true, false), effective_rank(rank, false, true));
        prop_assert_eq!(effective_rank(rank, true, true), effective_rank(rank, false, false));
    }

    #[test]
    fn prop_inversion_reverses_strict_order(a in rank_strategy(), b in rank_strategy()) {
        let normal = effective_rank(a, false, false).cmp(&effective_rank(b, false, false));
        let inverted = effective_rank(a, true, false).cmp(&effective_rank(b, true, false));
        prop_assert_eq!(normal, inverted.reverse());
    }

    #[test]
    fn prop_legality_survives_a_weaker_table(
        play_rank in 0usize..13,
        strong in 0usize..13,
        weak in 0usize..13,
        count in 1usize..=MAX_PLAY_CARDS,
        (revolution, jack_back) in mode_strategy(),
        locked in any::<bool>(),
    ) {
        let group = |rank: usize| -> Combination {
            let cards: Vec<Card> = Suit::ALL[..count]
                .iter()
                .map(|suit| Card::new(Rank::SUITED[rank], *suit))
                .collect();
            classify(&cards)
        };
        let mut mode = ModeState { revolution, jack_back, suit_lock: None };
        let play = group(play_rank);
        if locked {
            mode.suit_lock = Some(play.suit_mask);
        }
        let strong_table = TablePlay::new(&group(strong), &mode);
        let weak_table = TablePlay::new(&group(weak), &mode);
        prop_assume!(weak_table.effective_top_rank < strong_table.effective_top_rank);
        if is_legal(&play, Some(&strong_table), &mode) {
            prop_assert!(is_legal(&play, Some(&weak_table), &mode));
        }
    }

    #[test]
    fn prop_policy_plays_the_weakest_sufficient_answer(
        table_cards in table_cards_strategy(),
        seed in any::<u64>(),
        hand_size in 1usize..=14,
        (revolution, jack_back) in mode_strategy(),
        locked in any::<bool>(),
    ) {
        let played = classify(&table_cards);
        prop_assert!(played.is_valid());
        let mut mode = ModeState { revolution, jack_back, suit_lock: None };
        if locked && played.kind != daifugo_core::ComboKind::Straight && !played.suit_mask.is_empty() {
            mode.suit_lock = Some(played.suit_mask);
        }
        let table = TablePlay::new(&played, &mode);

        let mut deck = Deck::standard53();
        deck.cards.retain(|card| !table_cards.contains(card));
        deck.shuffle(&mut RngState::from_seed(seed));
        let hand = Hand::new(deck.cards.iter().copied().take(hand_size));

        let responses = legal_responses(&hand, &table, &mode);
        match WeakestSufficient.choose(&hand, Some(&table), &mode) {
            None => prop_assert!(responses.is_empty()),
            Some(choice) => {
                prop_assert!(hand.contains_all(&choice));
                let chosen = classify(&choice);
                prop_assert!(is_legal(&chosen, Some(&table), &mode));
                let chosen_rank = chosen.effective_rank(&mode);
                for response in &responses {
                    prop_assert!(chosen_rank <= response.effective_rank(&mode));
                }
            }
        }
    }

    #[test]
    fn prop_policy_always_leads_a_legal_play(
        seed in any::<u64>(),
        hand_size in 1usize..=14,
        (revolution, jack_back) in mode_strategy(),
    ) {
        let mut deck = Deck::standard53();
        deck.shuffle(&mut RngState::from_seed(seed));
        let hand = Hand::new(deck.cards.iter().copied().take(hand_size));
        let mode = ModeState { revolution, jack_back, suit_lock: None };
        let choice = WeakestSufficient.choose(&hand, None, &mode);
        prop_assert!(choice.is_some());
        let lead = classify(&choice.unwrap_or_default());
        prop_assert!(is_legal(&lead, None, &mode));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_cards_are_conserved_every_tick(seed in any::<u64>(), deal_start in 0usize..SEATS) {
        let mut deck = Deck::standard53();
        deck.shuffle(&mut RngState::from_seed(seed));
        let mut hands = deck.deal_round_robin(deal_start).unwrap();
        let total: usize = hands.iter().map(Hand::len).sum();
        prop_assert_eq!(total, 53);

        let mut round = init_round(&hands, deal_start);
        let mut ticks = 0u32;
        while round.phase != Phase::Finished {
            round.tick(&mut hands);
            let held: usize = hands.iter().map(Hand::len).sum();
            prop_assert_eq!(held + round.played.len(), 53);
            ticks += 1;
            prop_assert!(ticks < 200_000, "round did not finish");
        }
        let mut finishers = round.finish_order.clone();
        finishers.sort_unstable();
        prop_assert_eq!(finishers, vec![0, 1, 2, 3]);
    }
}
