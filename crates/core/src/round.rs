use crate::{
    Card, ConfigError, EffectKind, EventBus, Hand, ModeState, Policy, RoundConfig, TablePlay,
    WeakestSufficient,
};
use serde::{Deserialize, Serialize};

mod deal;
mod turn;

pub type Seat = usize;

pub const SEATS: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Dealing,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnState {
    pub current_seat: Seat,
    pub last_played: Option<Seat>,
    pub consecutive_passes: u8,
    pub turn_delay: u32,
    /// Display countdown for the last headline effect; turns freeze while non-zero.
    pub effect_timer: u32,
    pub deferred_clear: bool,
}

/// Presentation pacing for the deal. Gates the first turn, nothing else.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealState {
    pub visible: [usize; SEATS],
    pub target: [usize; SEATS],
    pub cursor: Seat,
    pub delay: u32,
}

impl DealState {
    pub fn finished(&self) -> bool {
        self.visible
            .iter()
            .zip(self.target.iter())
            .all(|(visible, target)| visible >= target)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DealTick {
    pub advanced: bool,
    pub seat_that_grew: Option<Seat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnTick {
    pub accepted: bool,
    pub passed: bool,
    /// The table was wiped this tick (pass-out or elapsed forced clear).
    pub cleared: bool,
    pub effect: Option<EffectKind>,
    pub played_seat: Option<Seat>,
    pub played_cards: Vec<Card>,
    pub table: Option<TablePlay>,
}

#[derive(Debug)]
pub struct RoundState<P = WeakestSufficient> {
    pub config: RoundConfig,
    pub phase: Phase,
    pub table: Option<TablePlay>,
    pub mode: ModeState,
    pub turn: TurnState,
    pub deal: DealState,
    pub played: Vec<Card>,
    pub finish_order: Vec<Seat>,
    pub events: EventBus,
    policy: P,
}

pub fn init_round(hands: &[Hand; SEATS], deal_start: Seat) -> RoundState {
    RoundState::with_policy(hands, deal_start, RoundConfig::default(), WeakestSufficient)
}

impl RoundState {
    pub fn new(
        hands: &[Hand; SEATS],
        deal_start: Seat,
        config: RoundConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_policy(hands, deal_start, config, WeakestSufficient))
    }
}

impl<P: Policy> RoundState<P> {
    /// Expects a config that already passed [`RoundConfig::validate`].
    pub fn with_policy(
        hands: &[Hand; SEATS],
        deal_start: Seat,
        config: RoundConfig,
        policy: P,
    ) -> Self {
        let mut target = [0; SEATS];
        for (seat, hand) in hands.iter().enumerate() {
            target[seat] = hand.len();
        }
        let deal = DealState {
            visible: [0; SEATS],
            target,
            cursor: deal_start % SEATS,
            delay: config.deal_delay_ticks,
        };
        let turn = TurnState {
            current_seat: config.opening_seat % SEATS,
            turn_delay: config.turn_delay_ticks,
            ..TurnState::default()
        };
        Self {
            config,
            phase: Phase::Dealing,
            table: None,
            mode: ModeState::default(),
            turn,
            deal,
            played: Vec::new(),
            finish_order: Vec::new(),
            events: EventBus::default(),
            policy,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// True while an effect display is holding turns.
    pub fn effect_pending(&self) -> bool {
        self.turn.effect_timer > 0
    }

    pub fn tick(&mut self, hands: &mut [Hand; SEATS]) -> (DealTick, TurnTick) {
        let dealt = self.tick_deal();
        let turned = self.tick_turn(hands);
        (dealt, turned)
    }
}

fn in_play(hands: &[Hand; SEATS], seat: Seat) -> bool {
    !hands[seat].is_empty()
}

fn seats_in_play(hands: &[Hand; SEATS]) -> usize {
    hands.iter().filter(|hand| !hand.is_empty()).count()
}

/// First seat after `from` that still holds cards; `from` when nobody does.
fn next_in_play(hands: &[Hand; SEATS], from: Seat) -> Seat {
    (1..=SEATS)
        .map(|offset| (from + offset) % SEATS)
        .find(|seat| in_play(hands, *seat))
        .unwrap_or(from)
}
