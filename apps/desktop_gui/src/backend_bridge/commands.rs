//! Backend commands queued from UI to backend worker.

use shared::domain::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    LoadBest,
    SaveBest { score: Score },
    ClearBest,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadBest => "load_best",
            BackendCommand::SaveBest { .. } => "save_best",
            BackendCommand::ClearBest => "clear_best",
        }
    }
}
