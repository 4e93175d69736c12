//! Runtime bridge: backend worker thread hosting the wall client.

use std::{sync::Arc, thread};

use client_core::{ClientEvent, HttpWallGateway, WallClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = WallClient::new(Arc::new(HttpWallGateway::new(server_url)));
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut events = client.subscribe_events();
            let ui_tx_poll = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let evt = match event {
                        ClientEvent::CounterFetched(count) => UiEvent::CounterFetched(count),
                        ClientEvent::WallFetched(whispers) => UiEvent::WallFetched(whispers),
                    };
                    let _ = ui_tx_poll.try_send(evt);
                }
            });
            let _poll_task = client.start_polling();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitReply { whisper_id, text } => {
                        tracing::info!(
                            whisper_id = %whisper_id,
                            text_len = text.len(),
                            "backend: submit_reply"
                        );
                        // Each submit runs on its own task so cards never
                        // wait on each other.
                        let client = Arc::clone(&client);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match client.submit_reply(&whisper_id, &text).await {
                                Ok(ack) => {
                                    let _ = ui_tx.try_send(UiEvent::ReplyPosted {
                                        whisper_id,
                                        text,
                                        updated_counter: ack.updated_counter,
                                    });
                                }
                                Err(err) => {
                                    tracing::error!("backend: submit_reply failed: {err}");
                                    let _ = ui_tx.try_send(UiEvent::ReplyFailed {
                                        whisper_id,
                                        message: err.to_string(),
                                    });
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}
