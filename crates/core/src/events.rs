use crate::{Card, ComboKind, EffectKind, Seat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClearReason {
    PassOut,
    EightCut,
}

/// Presentation cues raised by the round. The caller drains and renders
/// them; nothing flows back into the round except further ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    CardDealt { seat: Seat, visible: usize },
    DealFinished { first_seat: Seat },
    Played {
        seat: Seat,
        kind: ComboKind,
        cards: Vec<Card>,
    },
    PlayRejected { seat: Seat, cards: Vec<Card> },
    Passed { seat: Seat, consecutive: u8 },
    EffectShown {
        seat: Seat,
        effect: EffectKind,
        wait_ticks: u32,
    },
    TableCleared { reason: ClearReason, lead: Seat },
    SeatFinished { seat: Seat, place: usize },
    RoundFinished { finish_order: Vec<Seat> },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
