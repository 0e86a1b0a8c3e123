use crate::AutoplayError;
use daifugo_core::{ClearReason, Event, Seat, SEATS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Finished,
    MaxTicks,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepRecord {
    pub tick: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundCounts {
    pub plays: u32,
    pub passes: u32,
    pub rejections: u32,
    pub effects: u32,
    pub pass_out_clears: u32,
    pub eight_cut_clears: u32,
}

impl RoundCounts {
    pub fn from_steps(steps: &[StepRecord]) -> Self {
        let mut counts = Self::default();
        for step in steps {
            match &step.event {
                Event::Played { .. } => counts.plays += 1,
                Event::Passed { .. } => counts.passes += 1,
                Event::PlayRejected { .. } => counts.rejections += 1,
                Event::EffectShown { .. } => counts.effects += 1,
                Event::TableCleared {
                    reason: ClearReason::PassOut,
                    ..
                } => counts.pass_out_clears += 1,
                Event::TableCleared {
                    reason: ClearReason::EightCut,
                    ..
                } => counts.eight_cut_clears += 1,
                _ => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    pub index: u32,
    pub seed: u64,
    pub status: RoundStatus,
    pub ticks: u64,
    pub finish_order: Vec<Seat>,
    pub counts: RoundCounts,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesSummary {
    pub rounds: u32,
    pub finished: u32,
    pub total_ticks: u64,
    /// `placements[seat][place]` counts how often `seat` finished in `place` (0-based).
    pub placements: [[u32; SEATS]; SEATS],
}

impl SeriesSummary {
    pub fn record(&mut self, round: &RoundResult) {
        self.rounds += 1;
        self.total_ticks += round.ticks;
        if round.status == RoundStatus::Finished {
            self.finished += 1;
        }
        for (place, seat) in round.finish_order.iter().enumerate() {
            if *seat < SEATS && place < SEATS {
                self.placements[*seat][place] += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoplayResult {
    pub rounds: Vec<RoundResult>,
    pub summary: SeriesSummary,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!(
                "summary: rounds={} finished={} ticks={}",
                self.summary.rounds, self.summary.finished, self.summary.total_ticks
            ),
            "placements (seat: 1st 2nd 3rd 4th):".to_string(),
        ];
        for (seat, row) in self.summary.placements.iter().enumerate() {
            lines.push(format!(
                "  seat {seat}: {:>4} {:>4} {:>4} {:>4}",
                row[0], row[1], row[2], row[3]
            ));
        }
        lines.push(String::new());
        for round in &self.rounds {
            lines.push(format!(
                "round {:>3} | seed {} | {} after {} ticks",
                round.index,
                round.seed,
                round_status_label(round.status),
                round.ticks
            ));
            lines.push(format!("    finish order: {:?}", round.finish_order));
            lines.push(format!(
                "    plays={} passes={} rejected={} effects={} pass-outs={} eight-cuts={}",
                round.counts.plays,
                round.counts.passes,
                round.counts.rejections,
                round.counts.effects,
                round.counts.pass_out_clears,
                round.counts.eight_cut_clears
            ));
            for step in &round.steps {
                if let Some(line) = describe_event(&step.event) {
                    lines.push(format!("    t{:>6} {line}", step.tick));
                }
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

/// Deal progress is too chatty for the report and is skipped.
fn describe_event(event: &Event) -> Option<String> {
    let line = match event {
        Event::CardDealt { .. } => return None,
        Event::DealFinished { first_seat } => format!("deal done, seat {first_seat} opens"),
        Event::Played { seat, kind, cards } => {
            let cards: Vec<String> = cards.iter().map(ToString::to_string).collect();
            format!("seat {seat} plays {} [{}]", kind.id(), cards.join(" "))
        }
        Event::PlayRejected { seat, cards } => {
            format!("seat {seat} proposal rejected ({} cards)", cards.len())
        }
        Event::Passed { seat, consecutive } => format!("seat {seat} passes ({consecutive})"),
        Event::EffectShown {
            effect, wait_ticks, ..
        } => format!("effect {} for {wait_ticks} ticks", effect.id()),
        Event::TableCleared { reason, lead } => {
            let reason = match reason {
                ClearReason::PassOut => "pass-out",
                ClearReason::EightCut => "eight-cut",
            };
            format!("table cleared by {reason}, seat {lead} leads")
        }
        Event::SeatFinished { seat, place } => format!("seat {seat} out in place {place}"),
        Event::RoundFinished { finish_order } => format!("round over {finish_order:?}"),
    };
    Some(line)
}

fn round_status_label(status: RoundStatus) -> &'static str {
    match status {
        RoundStatus::Finished => "finished",
        RoundStatus::MaxTicks => "hit tick limit",
    }
}

pub fn write_json(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
