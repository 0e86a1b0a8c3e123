use crate::{effective_rank, Card, ComboKind, Combination, Rank, SuitMask};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModeState {
    pub revolution: bool,
    pub jack_back: bool,
    /// Suit composition every non-straight play must match while set.
    pub suit_lock: Option<SuitMask>,
}

impl ModeState {
    pub fn inverted(&self) -> bool {
        self.revolution ^ self.jack_back
    }

    pub fn effective(&self, rank: Rank) -> u8 {
        effective_rank(rank, self.revolution, self.jack_back)
    }

    pub fn suit_lock_active(&self) -> bool {
        self.suit_lock.is_some()
    }

    /// Drops the modifiers that live only as long as one table.
    pub fn reset_table_modes(&mut self) {
        self.jack_back = false;
        self.suit_lock = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePlay {
    pub kind: ComboKind,
    pub cards: Vec<Card>,
    pub effective_top_rank: u8,
    pub suit_mask: SuitMask,
}

impl TablePlay {
    pub fn new(play: &Combination, mode: &ModeState) -> Self {
        Self {
            kind: play.kind,
            cards: play.cards.clone(),
            effective_top_rank: play.effective_rank(mode),
            suit_mask: play.suit_mask,
        }
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

pub fn is_legal(play: &Combination, table: Option<&TablePlay>, mode: &ModeState) -> bool {
    if !play.is_valid() {
        return false;
    }
    let Some(table) = table else {
        return true;
    };
    if play.kind != table.kind || play.len() != table.count() {
        return false;
    }
    if let Some(locked) = mode.suit_lock {
        if play.kind != ComboKind::Straight && play.suit_mask != locked {
            return false;
        }
    }
    play.effective_rank(mode) > table.effective_top_rank
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Revolution,
    EightCut,
    JackBack,
    Straight,
    SuitLock,
}

impl EffectKind {
    /// Headline order: only the first qualifying effect is displayed.
    pub const PRECEDENCE: [EffectKind; 5] = [
        EffectKind::Revolution,
        EffectKind::EightCut,
        EffectKind::JackBack,
        EffectKind::Straight,
        EffectKind::SuitLock,
    ];

    pub fn id(self) -> &'static str {
        match self {
            EffectKind::Revolution => "revolution",
            EffectKind::EightCut => "eight_cut",
            EffectKind::JackBack => "jack_back",
            EffectKind::Straight => "straight",
            EffectKind::SuitLock => "suit_lock",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSet {
    pub revolution: bool,
    pub eight_cut: bool,
    pub jack_back: bool,
    pub straight: bool,
    pub suit_lock: bool,
}

impl EffectSet {
    pub fn contains(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Revolution => self.revolution,
            EffectKind::EightCut => self.eight_cut,
            EffectKind::JackBack => self.jack_back,
            EffectKind::Straight => self.straight,
            EffectKind::SuitLock => self.suit_lock,
        }
    }

    pub fn with(mut self, kind: EffectKind) -> Self {
        match kind {
            EffectKind::Revolution => self.revolution = true,
            EffectKind::EightCut => self.eight_cut = true,
            EffectKind::JackBack => self.jack_back = true,
            EffectKind::Straight => self.straight = true,
            EffectKind::SuitLock => self.suit_lock = true,
        }
        self
    }

    pub fn without(mut self, kind: EffectKind) -> Self {
        match kind {
            EffectKind::Revolution => self.revolution = false,
            EffectKind::EightCut => self.eight_cut = false,
            EffectKind::JackBack => self.jack_back = false,
            EffectKind::Straight => self.straight = false,
            EffectKind::SuitLock => self.suit_lock = false,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.headline().is_none()
    }

    pub fn headline(&self) -> Option<EffectKind> {
        EffectKind::PRECEDENCE
            .into_iter()
            .find(|kind| self.contains(*kind))
    }
}

struct EffectInput<'a> {
    play: &'a Combination,
    previous_suit_mask: Option<SuitMask>,
    mode: &'a ModeState,
}

type EffectRule = fn(&EffectInput<'_>) -> bool;

const EFFECT_RULES: [(EffectKind, EffectRule); 5] = [
    (EffectKind::Revolution, triggers_revolution),
    (EffectKind::EightCut, triggers_eight_cut),
    (EffectKind::JackBack, triggers_jack_back),
    (EffectKind::Straight, establishes_straight),
    (EffectKind::SuitLock, establishes_suit_lock),
];

fn triggers_revolution(input: &EffectInput<'_>) -> bool {
    input.play.kind == ComboKind::Set && input.play.len() == 4
}

fn triggers_eight_cut(input: &EffectInput<'_>) -> bool {
    input.play.is_valid() && input.play.rank == Rank::EIGHT_CUT
}

fn triggers_jack_back(input: &EffectInput<'_>) -> bool {
    matches!(input.play.kind, ComboKind::Single | ComboKind::Set)
        && input.play.rank == Rank::JACK_BACK
}

fn establishes_straight(input: &EffectInput<'_>) -> bool {
    input.play.kind == ComboKind::Straight
}

fn establishes_suit_lock(input: &EffectInput<'_>) -> bool {
    if !matches!(input.play.kind, ComboKind::Single | ComboKind::Set) {
        return false;
    }
    if input.mode.suit_lock_active() || input.play.suit_mask.is_empty() {
        return false;
    }
    input.previous_suit_mask == Some(input.play.suit_mask)
}

/// Effects `play` would trigger, judged before any mode is mutated.
///
/// `previous_suit_mask` is the suit set of the table play being beaten.
pub fn detect_effects(
    play: &Combination,
    previous_suit_mask: Option<SuitMask>,
    mode: &ModeState,
) -> EffectSet {
    let input = EffectInput {
        play,
        previous_suit_mask,
        mode,
    };
    EFFECT_RULES
        .iter()
        .filter(|(_, rule)| rule(&input))
        .fold(EffectSet::default(), |set, (kind, _)| set.with(*kind))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub applied: EffectSet,
    pub headline: Option<EffectKind>,
    pub deferred_clear: bool,
}

/// Applies an accepted play to the table and modes.
///
/// Order: revolution toggle, forced clear, jack-back toggle, table update,
/// then suit-lock against the new table. Every qualifying change applies;
/// precedence only picks the headline.
pub fn resolve_play(
    play: &Combination,
    table: &mut Option<TablePlay>,
    mode: &mut ModeState,
) -> Resolution {
    let previous = table.as_ref().map(|table| table.suit_mask);
    let mut applied = detect_effects(play, previous, mode);

    if applied.revolution {
        mode.revolution = !mode.revolution;
    }
    let deferred_clear = applied.eight_cut;
    if applied.jack_back {
        mode.jack_back = !mode.jack_back;
    }

    *table = Some(TablePlay::new(play, mode));

    if deferred_clear {
        // The table is about to be wiped, so a lock would never bind anything.
        applied = applied.without(EffectKind::SuitLock);
    } else if applied.suit_lock {
        mode.suit_lock = Some(play.suit_mask);
    }

    Resolution {
        applied,
        headline: applied.headline(),
        deferred_clear,
    }
}
