use super::{DealTick, Phase, RoundState, SEATS};
use crate::{Event, Policy};
use tracing::debug;

impl<P: Policy> RoundState<P> {
    /// Reveals at most one card per tick, round-robin from the deal cursor.
    pub fn tick_deal(&mut self) -> DealTick {
        if self.phase != Phase::Dealing {
            return DealTick::default();
        }

        let mut grew = None;
        if self.deal.delay > 0 {
            self.deal.delay -= 1;
        } else {
            for offset in 0..SEATS {
                let seat = (self.deal.cursor + offset) % SEATS;
                if self.deal.visible[seat] < self.deal.target[seat] {
                    self.deal.visible[seat] += 1;
                    self.deal.cursor = (seat + 1) % SEATS;
                    grew = Some(seat);
                    break;
                }
            }
            self.deal.delay = self.config.deal_delay_ticks;
        }

        if let Some(seat) = grew {
            self.events.push(Event::CardDealt {
                seat,
                visible: self.deal.visible[seat],
            });
        }

        if self.deal.finished() {
            self.finish_deal();
        }

        DealTick {
            advanced: grew.is_some(),
            seat_that_grew: grew,
        }
    }

    fn finish_deal(&mut self) {
        let opening = self.config.opening_seat % SEATS;
        let first_seat = if self.deal.target[opening] > 0 {
            opening
        } else {
            (1..=SEATS)
                .map(|offset| (opening + offset) % SEATS)
                .find(|seat| self.deal.target[*seat] > 0)
                .unwrap_or(opening)
        };
        self.phase = Phase::Playing;
        self.turn.current_seat = first_seat;
        self.turn.turn_delay = self.config.turn_delay_ticks;
        self.events.push(Event::DealFinished { first_seat });
        debug!(first_seat, "deal finished");
    }
}
