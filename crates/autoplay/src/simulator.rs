use crate::{AutoplayError, StepRecord};
use daifugo_core::{
    Deck, Event, Hand, Policy, RngState, RoundConfig, RoundState, Seat, WeakestSufficient, SEATS,
};
use tracing::debug;

/// A round plus the hands it plays against, advanced one tick at a time.
#[derive(Debug)]
pub struct Simulator<P = WeakestSufficient> {
    pub round: RoundState<P>,
    pub hands: [Hand; SEATS],
    pub tick: u64,
    dealt: usize,
}

impl Simulator {
    /// Shuffles a fresh 53-card deck with `seed` and deals it from `deal_start`.
    pub fn deal(seed: u64, deal_start: Seat, config: RoundConfig) -> Result<Self, AutoplayError> {
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::standard53();
        deck.shuffle(&mut rng);
        let hands = deck.deal_round_robin(deal_start)?;
        debug!(seed, deal_start, "dealt round");
        Self::from_hands(hands, deal_start, config, WeakestSufficient)
    }
}

impl<P: Policy> Simulator<P> {
    pub fn from_hands(
        hands: [Hand; SEATS],
        deal_start: Seat,
        config: RoundConfig,
        policy: P,
    ) -> Result<Self, AutoplayError> {
        config.validate()?;
        let round = RoundState::with_policy(&hands, deal_start, config, policy);
        let dealt = hands.iter().map(Hand::len).sum();
        Ok(Self {
            round,
            hands,
            tick: 0,
            dealt,
        })
    }

    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn held(&self) -> usize {
        self.hands.iter().map(Hand::len).sum()
    }

    /// Advances one tick and returns the events it raised.
    pub fn step(&mut self) -> Result<Vec<StepRecord>, AutoplayError> {
        self.round.tick(&mut self.hands);
        self.tick += 1;
        self.check_conservation()?;
        let tick = self.tick;
        Ok(self
            .round
            .events
            .drain()
            .map(|event| StepRecord { tick, event })
            .collect())
    }

    /// Held plus played must always equal what was dealt.
    pub fn check_conservation(&self) -> Result<(), AutoplayError> {
        let held = self.held();
        let played = self.round.played.len();
        if held + played != self.dealt {
            return Err(AutoplayError::Conservation {
                tick: self.tick,
                held,
                played,
                dealt: self.dealt,
            });
        }
        Ok(())
    }

    /// Steps until the round finishes or `max_ticks` have elapsed.
    pub fn run_to_end(&mut self, max_ticks: u64) -> Result<Vec<StepRecord>, AutoplayError> {
        let mut steps = Vec::new();
        while !self.round.is_finished() && self.tick < max_ticks {
            steps.extend(self.step()?);
        }
        Ok(steps)
    }

    pub fn is_finished(&self) -> bool {
        self.round.is_finished()
    }
}

/// Counts events of one shape in a trace.
pub fn count_events(steps: &[StepRecord], matches: impl Fn(&Event) -> bool) -> u32 {
    steps.iter().filter(|step| matches(&step.event)).count() as u32
}
