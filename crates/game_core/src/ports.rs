//! Collaborator seams and the dispatcher that routes controller effects to them.

use std::time::Duration;

use shared::{
    domain::{LabelField, Score, TileFace},
    protocol::{Effect, RoundReport, TimerId},
};

pub trait DisplaySurface {
    fn render_tile(&mut self, index: usize, face: TileFace);
    fn render_label(&mut self, field: LabelField, text: &str);
    fn show_message(&mut self, title: &str, body: &str);
    fn set_restart_enabled(&mut self, enabled: bool);

    /// Called once per completed round, after the result message.
    fn round_finished(&mut self, _report: &RoundReport) {}
}

/// Delivers timer fires back as `RoundInput::TimerFired`. Arming an id that
/// is already armed replaces it.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, timer: TimerId);
    fn every(&mut self, interval: Duration, timer: TimerId);
    fn cancel(&mut self, timer: TimerId);
}

pub trait ScoreSink {
    fn persist(&mut self, score: Score);
}

pub fn apply_effects<D, S, P>(effects: Vec<Effect>, display: &mut D, scheduler: &mut S, scores: &mut P)
where
    D: DisplaySurface + ?Sized,
    S: Scheduler + ?Sized,
    P: ScoreSink + ?Sized,
{
    for effect in effects {
        match effect {
            Effect::RenderTile { index, face } => display.render_tile(index, face),
            Effect::RenderLabel { field, text } => display.render_label(field, &text),
            Effect::ShowMessage { title, body } => display.show_message(&title, &body),
            Effect::SetRestartEnabled { enabled } => display.set_restart_enabled(enabled),
            Effect::ScheduleOnce { timer, delay } => scheduler.after(delay, timer),
            Effect::ScheduleRepeating { timer, interval } => scheduler.every(interval, timer),
            Effect::CancelTimer { timer } => scheduler.cancel(timer),
            Effect::PersistBest { score } => scores.persist(score),
            Effect::RoundFinished { report } => display.round_finished(&report),
        }
    }
}
