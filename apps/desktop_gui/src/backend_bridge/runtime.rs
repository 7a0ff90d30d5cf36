//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{run_submission, ClientConfig, OrderServiceClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread. Each command runs as its own task so a
/// slow history fetch never holds up a login or a newer submission.
pub fn launch(config: ClientConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match OrderServiceClient::from_config(&config) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                tracing::error!(server_url = %config.server_url, "failed to build order client: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!("Connected to {}", config.server_url)));

        while let Ok(command) = cmd_rx.recv() {
            let client = client.clone();
            let ui_tx = ui_tx.clone();
            tracing::debug!(command = command.name(), "backend picked up command");
            runtime.spawn(async move {
                match command {
                    BackendCommand::Login { credentials } => {
                        let outcome = client.login(&credentials).await;
                        forward(&ui_tx, UiEvent::Login(outcome));
                    }
                    BackendCommand::SubmitOrder { ticket } => {
                        run_submission(&client, &ticket, |event| {
                            forward(&ui_tx, UiEvent::Workflow(event));
                        })
                        .await;
                    }
                }
            });
        }

        tracing::info!("ui command channel closed; backend worker exiting");
    });
}

/// Terminal events wait for room in the queue; progress events are dropped
/// when the UI is behind. Must run on a multi-thread runtime.
fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if event.is_terminal() {
        let delivered = tokio::task::block_in_place(|| ui_tx.send(event));
        if delivered.is_err() {
            tracing::warn!("ui event channel closed; dropping settled result");
        }
    } else if let Err(err) = ui_tx.try_send(event) {
        tracing::warn!("dropping backend event: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{ClientError, RequestToken, WorkflowEvent};
    use crossbeam_channel::bounded;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn terminal_event_waits_for_a_full_queue_to_drain() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Info("backlog".into()))
            .expect("fill queue");

        let sender = tokio::spawn(async move {
            forward(
                &ui_tx,
                UiEvent::Workflow(WorkflowEvent::HistoryLoaded {
                    token: RequestToken(1),
                    entries: Vec::new(),
                }),
            );
        });
        let received = tokio::task::spawn_blocking(move || {
            let first = ui_rx.recv().expect("backlog");
            let second = ui_rx.recv().expect("settled event");
            (first, second)
        })
        .await
        .expect("drain");
        sender.await.expect("sender");

        assert!(matches!(received.0, UiEvent::Info(_)));
        assert!(matches!(
            received.1,
            UiEvent::Workflow(WorkflowEvent::HistoryLoaded { .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn progress_event_is_dropped_when_queue_is_full() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Info("backlog".into()))
            .expect("fill queue");

        forward(
            &ui_tx,
            UiEvent::Workflow(WorkflowEvent::OrderAccepted {
                token: RequestToken(1),
                message: "Amount: 1, Result: 1".into(),
            }),
        );

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Info(_))));
        assert!(ui_rx.try_recv().is_err());
    }

    #[test]
    fn settling_events_are_terminal() {
        assert!(UiEvent::Login(Err(ClientError::Authentication)).is_terminal());
        assert!(!UiEvent::Info("x".into()).is_terminal());
    }
}
