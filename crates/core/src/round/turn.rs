use super::{in_play, next_in_play, seats_in_play, Phase, RoundState, Seat, TurnTick, SEATS};
use crate::{
    classify, is_legal, resolve_play, Card, ClearReason, Combination, Event, Hand, Policy,
};
use tracing::{debug, info, warn};

impl<P: Policy> RoundState<P> {
    /// Advances the turn machine by one tick.
    ///
    /// Effect display wins over pacing, pacing wins over acting. Nothing here
    /// fails: a rejected proposal is treated as a pass.
    pub fn tick_turn(&mut self, hands: &mut [Hand; SEATS]) -> TurnTick {
        if self.phase != Phase::Playing {
            return TurnTick::default();
        }
        if seats_in_play(hands) <= 1 {
            self.finish_round(hands);
            return self.snapshot();
        }

        if self.turn.effect_timer > 0 {
            self.turn.effect_timer -= 1;
            if self.turn.effect_timer == 0 && self.turn.deferred_clear {
                self.turn.deferred_clear = false;
                self.clear_table(ClearReason::EightCut, hands);
                return TurnTick {
                    cleared: true,
                    ..self.snapshot()
                };
            }
            return self.snapshot();
        }

        if self.turn.turn_delay > 0 {
            self.turn.turn_delay -= 1;
            return self.snapshot();
        }

        let seat = self.turn.current_seat;
        if !in_play(hands, seat) {
            self.turn.current_seat = next_in_play(hands, seat);
            return self.snapshot();
        }

        let proposal = self
            .policy
            .choose(&hands[seat], self.table.as_ref(), &self.mode);
        let play = proposal.and_then(|cards| self.validate(seat, &hands[seat], cards));
        match play {
            Some(play) => self.accept(seat, play, hands),
            None => self.pass(seat, hands),
        }
    }

    fn validate(&mut self, seat: Seat, hand: &Hand, cards: Vec<Card>) -> Option<Combination> {
        let play = classify(&cards);
        if hand.contains_all(&cards) && is_legal(&play, self.table.as_ref(), &self.mode) {
            return Some(play);
        }
        warn!(seat, kind = play.kind.id(), ?cards, "rejected proposed play");
        self.events.push(Event::PlayRejected { seat, cards });
        None
    }

    fn accept(&mut self, seat: Seat, play: Combination, hands: &mut [Hand; SEATS]) -> TurnTick {
        hands[seat].remove_cards(&play.cards);
        self.played.extend(play.cards.iter().copied());

        let resolution = resolve_play(&play, &mut self.table, &mut self.mode);
        self.turn.consecutive_passes = 0;
        self.turn.last_played = Some(seat);
        self.turn.deferred_clear |= resolution.deferred_clear;
        debug!(seat, kind = play.kind.id(), cards = ?play.cards, "play accepted");
        self.events.push(Event::Played {
            seat,
            kind: play.kind,
            cards: play.cards.clone(),
        });

        if let Some(effect) = resolution.headline {
            let wait_ticks = self.arm_effect_wait(self.config.effect_wait_ticks);
            info!(seat, effect = effect.id(), wait_ticks, "effect triggered");
            self.events.push(Event::EffectShown {
                seat,
                effect,
                wait_ticks,
            });
        }

        if hands[seat].is_empty() {
            self.finish_order.push(seat);
            let place = self.finish_order.len();
            info!(seat, place, "seat finished");
            self.events.push(Event::SeatFinished { seat, place });
        }

        if seats_in_play(hands) <= 1 {
            self.finish_round(hands);
        } else {
            self.turn.current_seat = next_in_play(hands, seat);
            self.turn.turn_delay = self.config.turn_delay_ticks;
        }

        TurnTick {
            accepted: true,
            effect: resolution.headline,
            played_seat: Some(seat),
            played_cards: play.cards,
            ..self.snapshot()
        }
    }

    fn pass(&mut self, seat: Seat, hands: &[Hand; SEATS]) -> TurnTick {
        self.turn.turn_delay = self.config.turn_delay_ticks;
        if self.table.is_none() {
            // Nothing to answer, so the pass does not count toward a pass-out.
            self.turn.current_seat = next_in_play(hands, seat);
            self.events.push(Event::Passed {
                seat,
                consecutive: 0,
            });
            return TurnTick {
                passed: true,
                ..self.snapshot()
            };
        }

        self.turn.consecutive_passes = self.turn.consecutive_passes.saturating_add(1);
        let consecutive = self.turn.consecutive_passes;
        debug!(seat, consecutive, "pass");
        self.events.push(Event::Passed { seat, consecutive });

        if consecutive >= self.pass_out_threshold(hands) {
            self.clear_table(ClearReason::PassOut, hands);
            return TurnTick {
                passed: true,
                cleared: true,
                ..self.snapshot()
            };
        }

        self.turn.current_seat = next_in_play(hands, seat);
        TurnTick {
            passed: true,
            ..self.snapshot()
        }
    }

    /// Passes needed to clear: every other seat still holding cards, capped
    /// by the configured threshold.
    fn pass_out_threshold(&self, hands: &[Hand; SEATS]) -> u8 {
        let mut others = seats_in_play(hands);
        if let Some(last) = self.turn.last_played {
            if in_play(hands, last) {
                others -= 1;
            }
        }
        let others = u8::try_from(others).unwrap_or(u8::MAX).max(1);
        others.min(self.config.pass_out_threshold)
    }

    /// Overlapping waits keep whichever runs longer.
    fn arm_effect_wait(&mut self, requested: u32) -> u32 {
        let requested = self.config.clamp_wait(requested);
        self.turn.effect_timer = self.turn.effect_timer.max(requested);
        self.turn.effect_timer
    }

    fn clear_table(&mut self, reason: ClearReason, hands: &[Hand; SEATS]) {
        let lead = match self.turn.last_played {
            Some(seat) if in_play(hands, seat) => seat,
            Some(seat) => next_in_play(hands, seat),
            None => self.turn.current_seat,
        };
        self.table = None;
        self.mode.reset_table_modes();
        self.turn.consecutive_passes = 0;
        self.turn.current_seat = lead;
        self.turn.turn_delay = self.config.turn_delay_ticks;
        info!(?reason, lead, "table cleared");
        self.events.push(Event::TableCleared { reason, lead });
    }

    fn finish_round(&mut self, hands: &[Hand; SEATS]) {
        for seat in 0..SEATS {
            if in_play(hands, seat) && !self.finish_order.contains(&seat) {
                self.finish_order.push(seat);
            }
        }
        self.phase = Phase::Finished;
        self.turn.effect_timer = 0;
        self.turn.deferred_clear = false;
        info!(finish_order = ?self.finish_order, "round finished");
        self.events.push(Event::RoundFinished {
            finish_order: self.finish_order.clone(),
        });
    }

    fn snapshot(&self) -> TurnTick {
        TurnTick {
            table: self.table.clone(),
            ..TurnTick::default()
        }
    }
}
