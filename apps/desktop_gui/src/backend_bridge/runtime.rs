//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use storage::{BestScoreRepository, ScoreStore};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the worker thread that owns the score database. The worker exits
/// once every command sender is dropped.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, database_url: String) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let store = match ScoreStore::new(&database_url).await {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!(database_url = %database_url, "failed to open score store: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("could not open the score database: {err:#}"),
                    )));
                    return;
                }
            };
            if let Err(err) = store.health_check().await {
                tracing::error!(database_url = %database_url, "score store failed health check: {err:#}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("the score database is not responding: {err:#}"),
                )));
                return;
            }
            tracing::info!(database_url = %database_url, "score store ready");
            serve(&store, &cmd_rx, &ui_tx).await;
            tracing::debug!("backend worker stopping");
        });
    });
}

pub async fn serve<R>(repo: &R, cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>)
where
    R: BestScoreRepository + ?Sized,
{
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend: handling command");
        let event = match cmd {
            BackendCommand::LoadBest => match repo.load_best().await {
                Ok(best) => UiEvent::BestLoaded(best),
                Err(err) => {
                    tracing::error!("backend: load_best failed: {err:#}");
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::LoadScore,
                        format!("{err:#}"),
                    ))
                }
            },
            BackendCommand::SaveBest { score } => match repo.save_best(score).await {
                Ok(()) => UiEvent::BestSaved(score),
                Err(err) => {
                    tracing::error!("backend: save_best failed: {err:#}");
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::SaveScore,
                        format!("{err:#}"),
                    ))
                }
            },
            BackendCommand::ClearBest => match repo.clear_best().await {
                Ok(()) => UiEvent::BestCleared,
                Err(err) => {
                    tracing::error!("backend: clear_best failed: {err:#}");
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::ClearScore,
                        format!("{err:#}"),
                    ))
                }
            },
        };
        let _ = ui_tx.try_send(event);
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::Score;

    use super::*;

    #[tokio::test]
    async fn serves_queued_commands_in_order() {
        let store = ScoreStore::new("sqlite::memory:").await.expect("db");
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);

        cmd_tx.send(BackendCommand::LoadBest).expect("send");
        cmd_tx
            .send(BackendCommand::SaveBest {
                score: Score::new(3, 64),
            })
            .expect("send");
        cmd_tx.send(BackendCommand::LoadBest).expect("send");
        cmd_tx.send(BackendCommand::ClearBest).expect("send");
        cmd_tx.send(BackendCommand::LoadBest).expect("send");
        drop(cmd_tx);

        serve(&store, &cmd_rx, &ui_tx).await;

        let events: Vec<UiEvent> = ui_rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                UiEvent::BestLoaded(None),
                UiEvent::BestSaved(Score::new(3, 64)),
                UiEvent::BestLoaded(Some(Score::new(3, 64))),
                UiEvent::BestCleared,
                UiEvent::BestLoaded(None),
            ]
        );
    }
}
