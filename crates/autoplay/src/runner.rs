use crate::{
    AutoplayConfig, AutoplayError, AutoplayResult, RoundCounts, RoundResult, RoundStatus,
    SeriesSummary, Simulator,
};
use tracing::{info, warn};

/// Plays `config.rounds` seeded rounds with the default policy.
///
/// Round `i` is shuffled with `seed + i`, so any single round can be replayed
/// by re-running with that seed and `rounds = 1`.
pub fn run_autoplay(
    config: &AutoplayConfig,
    keep_steps: bool,
) -> Result<AutoplayResult, AutoplayError> {
    config.round.validate()?;
    let mut rounds = Vec::with_capacity(config.rounds as usize);
    let mut summary = SeriesSummary::default();
    for index in 0..config.rounds {
        let round = run_round(config, index, keep_steps)?;
        summary.record(&round);
        rounds.push(round);
    }
    info!(
        rounds = summary.rounds,
        finished = summary.finished,
        ticks = summary.total_ticks,
        "autoplay complete"
    );
    Ok(AutoplayResult { rounds, summary })
}

pub fn run_round(
    config: &AutoplayConfig,
    index: u32,
    keep_steps: bool,
) -> Result<RoundResult, AutoplayError> {
    let seed = config.round_seed(index);
    let mut sim = Simulator::deal(seed, config.deal_start, config.round.clone())?;
    let steps = sim.run_to_end(config.max_ticks)?;
    let status = if sim.is_finished() {
        RoundStatus::Finished
    } else {
        warn!(index, seed, ticks = sim.tick, "round hit tick limit");
        RoundStatus::MaxTicks
    };
    info!(index, seed, ticks = sim.tick, finish_order = ?sim.round.finish_order, "round done");
    Ok(RoundResult {
        index,
        seed,
        status,
        ticks: sim.tick,
        finish_order: sim.round.finish_order.clone(),
        counts: RoundCounts::from_steps(&steps),
        steps: if keep_steps { steps } else { Vec::new() },
    })
}
