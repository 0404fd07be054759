use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{LabelField, PerformanceTier, Score, TileFace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Preview,
    Mismatch,
    Elapsed,
}

impl TimerKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Mismatch => "mismatch",
            Self::Elapsed => "elapsed",
        }
    }
}

/// A timer armed by one particular round. The round number lets the
/// controller drop fires that belong to a round already restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId {
    pub kind: TimerKind,
    pub round: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RoundInput {
    TileClicked { index: usize },
    RestartRequested,
    TimerFired { timer: TimerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u64,
    pub score: Score,
    pub tier: PerformanceTier,
    pub new_best: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<Score>,
}

/// Side effects requested by the round controller, applied in order by the
/// front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Effect {
    RenderTile { index: usize, face: TileFace },
    RenderLabel { field: LabelField, text: String },
    ShowMessage { title: String, body: String },
    SetRestartEnabled { enabled: bool },
    ScheduleOnce { timer: TimerId, delay: Duration },
    ScheduleRepeating { timer: TimerId, interval: Duration },
    CancelTimer { timer: TimerId },
    PersistBest { score: Score },
    RoundFinished { report: RoundReport },
}
