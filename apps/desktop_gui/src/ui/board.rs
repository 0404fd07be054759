//! What the window currently shows, kept apart from egui so the controller
//! effects can be applied and inspected without a frame.

use std::collections::VecDeque;

use game_core::{scoring, DisplaySurface, RoundReport};
use shared::domain::{LabelField, TileFace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug)]
pub struct BoardView {
    tiles: Vec<TileFace>,
    errors_label: String,
    time_label: String,
    best_label: String,
    restart_enabled: bool,
    notices: VecDeque<Notice>,
    next_notice_id: u64,
    last_report: Option<RoundReport>,
}

impl BoardView {
    pub fn new(tile_count: usize) -> Self {
        Self {
            tiles: vec![TileFace::Back; tile_count],
            errors_label: scoring::errors_label(0),
            time_label: scoring::time_label(0),
            best_label: scoring::best_label(None),
            restart_enabled: true,
            notices: VecDeque::new(),
            next_notice_id: 0,
            last_report: None,
        }
    }

    pub fn tiles(&self) -> &[TileFace] {
        &self.tiles
    }

    pub fn label(&self, field: LabelField) -> &str {
        match field {
            LabelField::Errors => &self.errors_label,
            LabelField::Time => &self.time_label,
            LabelField::Best => &self.best_label,
        }
    }

    pub fn restart_enabled(&self) -> bool {
        self.restart_enabled
    }

    /// Messages are shown one at a time, oldest first.
    pub fn front_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn last_report(&self) -> Option<&RoundReport> {
        self.last_report.as_ref()
    }
}

impl DisplaySurface for BoardView {
    fn render_tile(&mut self, index: usize, face: TileFace) {
        match self.tiles.get_mut(index) {
            Some(slot) => *slot = face,
            None => tracing::warn!(index, "render for a tile outside the board"),
        }
    }

    fn render_label(&mut self, field: LabelField, text: &str) {
        let slot = match field {
            LabelField::Errors => &mut self.errors_label,
            LabelField::Time => &mut self.time_label,
            LabelField::Best => &mut self.best_label,
        };
        slot.clear();
        slot.push_str(text);
    }

    fn show_message(&mut self, title: &str, body: &str) {
        self.next_notice_id += 1;
        self.notices.push_back(Notice {
            id: self.next_notice_id,
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn set_restart_enabled(&mut self, enabled: bool) {
        self.restart_enabled = enabled;
    }

    fn round_finished(&mut self, report: &RoundReport) {
        self.last_report = Some(*report);
    }
}

#[cfg(test)]
mod tests {
    use game_core::{apply_effects, GameConfig, RoundController, ScoreSink, TimerQueue};
    use shared::domain::Score;

    use super::*;

    #[derive(Default)]
    struct NoStore(Vec<Score>);

    impl ScoreSink for NoStore {
        fn persist(&mut self, score: Score) {
            self.0.push(score);
        }
    }

    #[test]
    fn starting_a_round_reveals_every_tile_and_locks_restart() {
        let mut controller = RoundController::seeded(GameConfig::default(), 11).expect("config");
        let mut view = BoardView::new(controller.config().tile_count());
        let mut timers = TimerQueue::new();
        let mut store = NoStore::default();

        apply_effects(controller.start(), &mut view, &mut timers, &mut store);

        assert_eq!(view.tiles().len(), 20);
        assert!(view.tiles().iter().all(|face| !face.is_back()));
        assert_eq!(view.tiles(), controller.faces());
        assert!(!view.restart_enabled());
        assert_eq!(view.label(LabelField::Errors), "Errors: 0");
        assert_eq!(view.label(LabelField::Time), "Time: 00:00");
        assert_eq!(view.label(LabelField::Best), "Best: —");
    }

    #[test]
    fn notices_queue_in_arrival_order() {
        let mut view = BoardView::new(4);
        view.show_message("Match Result", "Game Over!");
        view.show_message("High Score", "New High Score!");

        let first = view.dismiss_notice().expect("first notice");
        assert_eq!(first.title, "Match Result");
        assert_eq!(
            view.front_notice().map(|notice| notice.title.as_str()),
            Some("High Score")
        );
        assert!(view.front_notice().map(|notice| notice.id) > Some(first.id));
        view.dismiss_notice();
        assert_eq!(view.front_notice(), None);
    }

    #[test]
    fn out_of_range_render_is_ignored() {
        let mut view = BoardView::new(2);
        view.render_tile(7, TileFace::Back);
        assert_eq!(view.tiles(), &[TileFace::Back, TileFace::Back]);
    }
}
