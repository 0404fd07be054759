//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use game_core::{is_new_best, ScoreSink};
use shared::domain::Score;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiError;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            *status = "Score store is busy; the best score was not saved".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(command = cmd_name, "backend worker gone");
            *status =
                "Score store unavailable; best scores will not persist this session".to_string();
        }
    }
}

/// What the app knows about the best score held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredBestState {
    /// Load still in flight. A round finished meanwhile is kept here until
    /// the stored value can be compared against it.
    Loading { deferred: Option<Score> },
    Loaded,
    /// The stored value is unknown, so nothing may overwrite it.
    Unavailable,
}

/// Routes `PersistBest` effects to the backend worker once the stored best
/// is known.
pub struct BackendScoreSink<'a> {
    pub cmd_tx: &'a Sender<BackendCommand>,
    pub status: &'a mut String,
    pub best_state: &'a mut StoredBestState,
}

impl ScoreSink for BackendScoreSink<'_> {
    fn persist(&mut self, score: Score) {
        match &mut *self.best_state {
            StoredBestState::Loaded => {
                dispatch_backend_command(self.cmd_tx, BackendCommand::SaveBest { score }, self.status)
            }
            StoredBestState::Loading { deferred } => {
                tracing::debug!(?score, "best score not loaded yet, deferring save");
                *deferred = Some(deferred.map_or(score, |held| held.min(score)));
            }
            StoredBestState::Unavailable => {
                tracing::warn!(?score, "stored best unknown, not saving");
                *self.status = "Best score could not be read; this result was not saved".to_string();
            }
        }
    }
}

/// Drops any deferred result when a worker failure leaves the stored best
/// unknown or unwritable.
pub fn note_backend_error(best_state: &mut StoredBestState, err: &UiError) {
    if err.disables_persistence() {
        tracing::warn!(error = %err.banner_text(), "best score persistence disabled");
        *best_state = StoredBestState::Unavailable;
    }
}

/// Settles the state once the stored best arrives. Returns the best the
/// round controller should hold; a deferred result that beats the stored
/// one is saved and returned instead.
pub fn settle_loaded_best(
    best_state: &mut StoredBestState,
    stored: Option<Score>,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> Option<Score> {
    let deferred = match *best_state {
        StoredBestState::Loading { deferred } => deferred,
        StoredBestState::Loaded => None,
        StoredBestState::Unavailable => return stored,
    };
    *best_state = StoredBestState::Loaded;
    match deferred {
        Some(score) if is_new_best(stored, score) => {
            dispatch_backend_command(cmd_tx, BackendCommand::SaveBest { score }, status);
            Some(score)
        }
        _ => stored,
    }
}
