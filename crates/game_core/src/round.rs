use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{
    domain::{LabelField, Phase, Score, TileFace},
    error::GameError,
    protocol::{Effect, RoundInput, RoundReport, TimerId, TimerKind},
};

use crate::{
    config::GameConfig,
    deck::Deck,
    scoring::{self, best_label, errors_label, time_label},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub phase: Phase,
    pub first: Option<usize>,
    pub second: Option<usize>,
    pub errors: u32,
    pub matched_pairs: usize,
    pub elapsed_seconds: u32,
}

impl RoundState {
    fn fresh() -> Self {
        Self {
            phase: Phase::Preview,
            first: None,
            second: None,
            errors: 0,
            matched_pairs: 0,
            elapsed_seconds: 0,
        }
    }

    pub fn score(&self) -> Score {
        Score::new(self.errors, self.elapsed_seconds)
    }
}

pub struct RoundController<R = StdRng> {
    config: GameConfig,
    deck: Deck,
    faces: Vec<TileFace>,
    state: RoundState,
    best: Option<Score>,
    round: u64,
    armed: Vec<TimerKind>,
    rng: R,
}

impl RoundController<StdRng> {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundController<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let deck = Deck::new(&config.kinds);
        let faces = vec![TileFace::Back; deck.len()];
        Ok(Self {
            config,
            deck,
            faces,
            state: RoundState::fresh(),
            best: None,
            round: 0,
            armed: Vec::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn faces(&self) -> &[TileFace] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<TileFace> {
        self.faces.get(index).copied()
    }

    pub fn best(&self) -> Option<Score> {
        self.best
    }

    /// Generation of the current round, bumped on every (re)start.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains(&kind)
    }

    /// Starts the first round. Calling it again behaves like a restart.
    pub fn start(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::RenderLabel {
            field: LabelField::Best,
            text: best_label(self.best),
        }];
        self.begin_round(&mut effects);
        effects
    }

    /// Installs the best score read from the persistent store.
    pub fn restore_best(&mut self, best: Option<Score>) -> Vec<Effect> {
        self.best = best;
        vec![Effect::RenderLabel {
            field: LabelField::Best,
            text: best_label(best),
        }]
    }

    pub fn handle(&mut self, input: RoundInput) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            RoundInput::TileClicked { index } => self.on_tile_clicked(index, &mut effects),
            RoundInput::RestartRequested => self.begin_round(&mut effects),
            RoundInput::TimerFired { timer } => self.on_timer_fired(timer, &mut effects),
        }
        effects
    }

    fn begin_round(&mut self, effects: &mut Vec<Effect>) {
        for kind in std::mem::take(&mut self.armed) {
            effects.push(Effect::CancelTimer {
                timer: self.timer_id(kind),
            });
        }

        self.round += 1;
        self.state = RoundState::fresh();
        self.deck.shuffle(&mut self.rng);
        tracing::debug!(round = self.round, "round started, preview showing");

        effects.push(Effect::RenderLabel {
            field: LabelField::Errors,
            text: errors_label(0),
        });
        effects.push(Effect::RenderLabel {
            field: LabelField::Time,
            text: time_label(0),
        });

        for index in 0..self.faces.len() {
            self.reveal(index, effects);
        }

        if self.config.lock_restart_during_preview {
            effects.push(Effect::SetRestartEnabled { enabled: false });
        }
        self.arm_once(TimerKind::Preview, self.config.preview, effects);
    }

    fn on_timer_fired(&mut self, timer: TimerId, effects: &mut Vec<Effect>) {
        if timer.round != self.round || !self.armed.contains(&timer.kind) {
            tracing::debug!(
                round = self.round,
                timer_round = timer.round,
                timer = timer.kind.label(),
                "ignoring stale timer fire"
            );
            return;
        }

        match timer.kind {
            TimerKind::Preview => {
                self.disarm(TimerKind::Preview);
                self.end_preview(effects);
            }
            TimerKind::Mismatch => {
                self.disarm(TimerKind::Mismatch);
                self.flip_mismatched_back(effects);
            }
            TimerKind::Elapsed => {
                self.state.elapsed_seconds += 1;
                effects.push(Effect::RenderLabel {
                    field: LabelField::Time,
                    text: time_label(self.state.elapsed_seconds),
                });
            }
        }
    }

    fn end_preview(&mut self, effects: &mut Vec<Effect>) {
        for index in 0..self.faces.len() {
            self.hide(index, effects);
        }
        self.state.phase = Phase::Playing;
        self.state.first = None;
        self.state.second = None;
        self.state.elapsed_seconds = 0;
        effects.push(Effect::RenderLabel {
            field: LabelField::Time,
            text: time_label(0),
        });

        self.armed.push(TimerKind::Elapsed);
        effects.push(Effect::ScheduleRepeating {
            timer: self.timer_id(TimerKind::Elapsed),
            interval: self.config.tick,
        });
        effects.push(Effect::SetRestartEnabled { enabled: true });
        tracing::debug!(round = self.round, "preview over, accepting input");
    }

    fn on_tile_clicked(&mut self, index: usize, effects: &mut Vec<Effect>) {
        debug_assert!(
            index < self.faces.len(),
            "tile index {index} outside a board of {} tiles",
            self.faces.len()
        );
        if index >= self.faces.len() {
            tracing::warn!(index, tiles = self.faces.len(), "ignoring click outside the board");
            return;
        }

        if !self.state.phase.accepts_tile_input() || !self.faces[index].is_back() {
            return;
        }

        let Some(first) = self.state.first else {
            self.state.first = Some(index);
            self.reveal(index, effects);
            return;
        };

        if self.state.second.is_some() || first == index {
            return;
        }

        self.state.second = Some(index);
        self.reveal(index, effects);

        if self.deck.kind_at(first) == self.deck.kind_at(index) {
            self.on_match(effects);
        } else {
            self.state.errors += 1;
            self.state.phase = Phase::Resolving;
            tracing::debug!(
                round = self.round,
                first,
                second = index,
                errors = self.state.errors,
                "mismatch"
            );
            effects.push(Effect::RenderLabel {
                field: LabelField::Errors,
                text: errors_label(self.state.errors),
            });
            self.arm_once(TimerKind::Mismatch, self.config.mismatch, effects);
        }
    }

    fn on_match(&mut self, effects: &mut Vec<Effect>) {
        self.state.matched_pairs += 1;
        self.state.first = None;
        self.state.second = None;
        tracing::debug!(
            round = self.round,
            matched = self.state.matched_pairs,
            "pair matched"
        );

        if self.state.matched_pairs == self.config.pair_count() {
            self.finish_round(effects);
        }
    }

    fn flip_mismatched_back(&mut self, effects: &mut Vec<Effect>) {
        for index in [self.state.first.take(), self.state.second.take()]
            .into_iter()
            .flatten()
        {
            self.hide(index, effects);
        }
        self.state.phase = Phase::Playing;
    }

    fn finish_round(&mut self, effects: &mut Vec<Effect>) {
        self.state.phase = Phase::Won;
        if let Some(position) = self.armed.iter().position(|kind| *kind == TimerKind::Elapsed) {
            self.armed.remove(position);
            effects.push(Effect::CancelTimer {
                timer: self.timer_id(TimerKind::Elapsed),
            });
        }

        let score = self.state.score();
        let new_best = scoring::is_new_best(self.best, score);
        if new_best {
            self.best = Some(score);
            effects.push(Effect::PersistBest { score });
            effects.push(Effect::RenderLabel {
                field: LabelField::Best,
                text: best_label(self.best),
            });
        }

        let report = RoundReport {
            round: self.round,
            score,
            tier: scoring::classify(score.errors),
            new_best,
            best: self.best,
        };
        tracing::info!(
            round = self.round,
            errors = score.errors,
            seconds = score.seconds,
            new_best,
            "round won"
        );

        effects.push(Effect::ShowMessage {
            title: scoring::RESULT_TITLE.to_string(),
            body: scoring::result_message(&report),
        });
        if new_best {
            effects.push(Effect::ShowMessage {
                title: scoring::HIGH_SCORE_TITLE.to_string(),
                body: scoring::high_score_message(score),
            });
        }
        effects.push(Effect::SetRestartEnabled { enabled: true });
        effects.push(Effect::RoundFinished { report });
    }

    fn reveal(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if let Some(kind) = self.deck.kind_at(index) {
            self.set_face(index, TileFace::Front(kind), effects);
        }
    }

    fn hide(&mut self, index: usize, effects: &mut Vec<Effect>) {
        self.set_face(index, TileFace::Back, effects);
    }

    fn set_face(&mut self, index: usize, face: TileFace, effects: &mut Vec<Effect>) {
        self.faces[index] = face;
        effects.push(Effect::RenderTile { index, face });
    }

    fn arm_once(&mut self, kind: TimerKind, delay: std::time::Duration, effects: &mut Vec<Effect>) {
        if !self.armed.contains(&kind) {
            self.armed.push(kind);
        }
        effects.push(Effect::ScheduleOnce {
            timer: self.timer_id(kind),
            delay,
        });
    }

    fn disarm(&mut self, kind: TimerKind) {
        self.armed.retain(|armed| *armed != kind);
    }

    fn timer_id(&self, kind: TimerKind) -> TimerId {
        TimerId {
            kind,
            round: self.round,
        }
    }
}

#[cfg(test)]
#[path = "tests/round_tests.rs"]
mod tests;
