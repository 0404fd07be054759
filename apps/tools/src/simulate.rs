//! Plays one round headlessly on virtual time with a bot that remembers
//! every card it has flipped.

use std::{collections::HashMap, time::Duration};

use anyhow::{anyhow, bail, Result};
use game_core::{
    apply_effects, DisplaySurface, GameConfig, RoundController, RoundInput, RoundReport,
    ScoreSink, TimerQueue,
};
use serde::Serialize;
use shared::domain::{CardKind, LabelField, Phase, Score, TileFace};

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub seed: u64,
    /// Virtual time the bot spends before each click.
    pub think: Duration,
    /// Remember the faces shown during the preview.
    pub peek: bool,
    pub best: Option<Score>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub seed: u64,
    pub clicks: u32,
    pub report: RoundReport,
    /// Scores the round asked to persist as the new best.
    pub persisted: Vec<Score>,
    pub messages: Vec<String>,
}

#[derive(Default)]
struct Transcript {
    messages: Vec<String>,
    report: Option<RoundReport>,
}

impl DisplaySurface for Transcript {
    fn render_tile(&mut self, _index: usize, _face: TileFace) {}

    fn render_label(&mut self, field: LabelField, text: &str) {
        tracing::trace!(?field, text, "label");
    }

    fn show_message(&mut self, title: &str, body: &str) {
        self.messages.push(format!("{title}\n{body}"));
    }

    fn set_restart_enabled(&mut self, _enabled: bool) {}

    fn round_finished(&mut self, report: &RoundReport) {
        self.report = Some(*report);
    }
}

#[derive(Default)]
struct Persisted(Vec<Score>);

impl ScoreSink for Persisted {
    fn persist(&mut self, score: Score) {
        self.0.push(score);
    }
}

struct Bench {
    controller: RoundController,
    timers: TimerQueue,
    transcript: Transcript,
    persisted: Persisted,
}

impl Bench {
    fn apply(&mut self, effects: Vec<game_core::Effect>) {
        apply_effects(
            effects,
            &mut self.transcript,
            &mut self.timers,
            &mut self.persisted,
        );
    }

    fn advance(&mut self, delta: Duration) {
        for timer in self.timers.advance_by(delta) {
            let effects = self.controller.handle(RoundInput::TimerFired { timer });
            self.apply(effects);
        }
    }

    /// Runs the clock forward until the board accepts clicks again.
    fn settle(&mut self) -> Result<()> {
        while matches!(self.controller.phase(), Phase::Preview | Phase::Resolving) {
            let deadline = self.timers.next_deadline().ok_or_else(|| {
                anyhow!("round stalled in {} with no timer armed", self.controller.phase().label())
            })?;
            let wait = deadline.saturating_sub(self.timers.now());
            self.advance(wait);
        }
        Ok(())
    }

    fn click(&mut self, index: usize, think: Duration) -> Result<CardKind> {
        self.advance(think);
        let effects = self.controller.handle(RoundInput::TileClicked { index });
        self.apply(effects);
        match self.controller.face(index) {
            Some(TileFace::Front(kind)) => Ok(kind),
            other => bail!("tile {index} did not turn face up: {other:?}"),
        }
    }
}

#[derive(Debug, Default)]
struct Memory {
    seen: HashMap<usize, CardKind>,
}

impl Memory {
    fn observe(&mut self, index: usize, kind: CardKind) {
        self.seen.insert(index, kind);
    }

    fn hidden(faces: &[TileFace]) -> impl Iterator<Item = usize> + '_ {
        faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.is_back())
            .map(|(index, _)| index)
    }

    /// A tile from a fully known pair if there is one, otherwise the first
    /// tile never seen.
    fn first_pick(&self, faces: &[TileFace]) -> Option<usize> {
        let mut by_kind: HashMap<CardKind, usize> = HashMap::new();
        for index in Self::hidden(faces) {
            if let Some(&kind) = self.seen.get(&index) {
                if let Some(&other) = by_kind.get(&kind) {
                    return Some(other);
                }
                by_kind.insert(kind, index);
            }
        }
        Self::hidden(faces)
            .find(|index| !self.seen.contains_key(index))
            .or_else(|| Self::hidden(faces).next())
    }

    fn second_pick(&self, faces: &[TileFace], first: usize, kind: CardKind) -> Option<usize> {
        let remaining: Vec<usize> = Self::hidden(faces).filter(|&index| index != first).collect();
        remaining
            .iter()
            .copied()
            .find(|index| self.seen.get(index) == Some(&kind))
            .or_else(|| {
                remaining
                    .iter()
                    .copied()
                    .find(|index| !self.seen.contains_key(index))
            })
            .or_else(|| remaining.first().copied())
    }
}

pub fn simulate(config: GameConfig, options: &SimulationOptions) -> Result<Simulation> {
    let tile_count = config.tile_count();
    let mut bench = Bench {
        controller: RoundController::seeded(config, options.seed)?,
        timers: TimerQueue::new(),
        transcript: Transcript::default(),
        persisted: Persisted::default(),
    };
    let effects = bench.controller.restore_best(options.best);
    bench.apply(effects);
    let effects = bench.controller.start();
    bench.apply(effects);

    let mut memory = Memory::default();
    if options.peek {
        for (index, face) in bench.controller.faces().iter().enumerate() {
            if let TileFace::Front(kind) = face {
                memory.observe(index, *kind);
            }
        }
    }
    bench.settle()?;

    let click_limit = (tile_count * 4) as u32;
    let mut clicks = 0_u32;
    while bench.controller.phase() != Phase::Won {
        if clicks >= click_limit {
            bail!("bot gave up after {clicks} clicks");
        }
        let first = memory
            .first_pick(bench.controller.faces())
            .ok_or_else(|| anyhow!("no face-down tile left to pick"))?;
        let kind = bench.click(first, options.think)?;
        memory.observe(first, kind);

        let second = memory
            .second_pick(bench.controller.faces(), first, kind)
            .ok_or_else(|| anyhow!("no partner tile left for {kind}"))?;
        let second_kind = bench.click(second, options.think)?;
        memory.observe(second, second_kind);
        clicks += 2;

        bench.settle()?;
    }

    let report = bench
        .transcript
        .report
        .ok_or_else(|| anyhow!("round won without a report"))?;
    tracing::info!(
        seed = options.seed,
        clicks,
        errors = report.score.errors,
        seconds = report.score.seconds,
        "simulation finished"
    );
    Ok(Simulation {
        seed: options.seed,
        clicks,
        report,
        persisted: bench.persisted.0,
        messages: bench.transcript.messages,
    })
}

#[cfg(test)]
#[path = "tests/simulate_tests.rs"]
mod tests;
