use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::WhisperId,
    error::{ApiError, TransportError},
    protocol::{ReplyAck, ReplyRequest, WhisperPayload},
};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::warn;

pub mod counter;
pub mod wall;

pub use counter::CounterView;
pub use wall::WallView;

/// Delay between poll cycles. The first cycle fires immediately on start.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Author label attached to every reply posted from this client.
pub const REPLY_AUTHOR_LABEL: &str = "Faculty (Web)";

#[async_trait]
pub trait WallGateway: Send + Sync {
    async fn hope_count(&self) -> Result<u64, TransportError>;
    async fn whispers(&self) -> Result<Vec<WhisperPayload>, TransportError>;
    async fn post_reply(
        &self,
        whisper_id: &WhisperId,
        author_label: &str,
        text: &str,
    ) -> Result<ReplyAck, TransportError>;
}

pub struct MissingWallGateway;

#[async_trait]
impl WallGateway for MissingWallGateway {
    async fn hope_count(&self) -> Result<u64, TransportError> {
        Err(TransportError::Network(
            "wall backend is unavailable".to_string(),
        ))
    }

    async fn whispers(&self) -> Result<Vec<WhisperPayload>, TransportError> {
        Err(TransportError::Network(
            "wall backend is unavailable".to_string(),
        ))
    }

    async fn post_reply(
        &self,
        whisper_id: &WhisperId,
        _author_label: &str,
        _text: &str,
    ) -> Result<ReplyAck, TransportError> {
        Err(TransportError::Network(format!(
            "wall backend is unavailable for whisper {whisper_id}"
        )))
    }
}

pub struct HttpWallGateway {
    http: Client,
    base_url: String,
}

impl HttpWallGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

async fn refusal_error(response: reqwest::Response) -> TransportError {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(body) => body.into(),
        Err(_) => TransportError::Network(format!("wall backend returned {status}")),
    }
}

#[async_trait]
impl WallGateway for HttpWallGateway {
    async fn hope_count(&self) -> Result<u64, TransportError> {
        let response = self
            .http
            .get(format!("{}/hope_count", self.base_url))
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        if !response.status().is_success() {
            return Err(refusal_error(response).await);
        }
        response
            .json::<u64>()
            .await
            .map_err(|err| TransportError::InvalidPayload(err.to_string()))
    }

    async fn whispers(&self) -> Result<Vec<WhisperPayload>, TransportError> {
        let response = self
            .http
            .get(format!("{}/whispers", self.base_url))
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        if !response.status().is_success() {
            return Err(refusal_error(response).await);
        }
        response
            .json::<Vec<WhisperPayload>>()
            .await
            .map_err(|err| TransportError::InvalidPayload(err.to_string()))
    }

    async fn post_reply(
        &self,
        whisper_id: &WhisperId,
        author_label: &str,
        text: &str,
    ) -> Result<ReplyAck, TransportError> {
        let response = self
            .http
            .post(format!("{}/replies", self.base_url))
            .json(&ReplyRequest {
                whisper_id: whisper_id.clone(),
                author_label: author_label.to_string(),
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        if !response.status().is_success() {
            return Err(refusal_error(response).await);
        }
        response
            .json::<ReplyAck>()
            .await
            .map_err(|err| TransportError::InvalidPayload(err.to_string()))
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    CounterFetched(u64),
    WallFetched(Vec<WhisperPayload>),
}

pub struct WallClient {
    gateway: Arc<dyn WallGateway>,
    events: broadcast::Sender<ClientEvent>,
}

impl WallClient {
    pub fn new(gateway: Arc<dyn WallGateway>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self { gateway, events })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Issues the counter fetch and the whisper fetch on their own tasks.
    /// One side failing never delays or cancels the other; fetch failures
    /// are logged and swallowed, the next cycle is the retry. Cycles may
    /// overlap and responses apply in arrival order.
    pub fn poll_cycle(self: &Arc<Self>) {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            match client.gateway.hope_count().await {
                Ok(count) => {
                    let _ = client.events.send(ClientEvent::CounterFetched(count));
                }
                Err(err) => warn!("poll: hope count fetch failed: {err}"),
            }
        });

        let client = Arc::clone(self);
        tokio::spawn(async move {
            match client.gateway.whispers().await {
                Ok(whispers) => {
                    let _ = client.events.send(ClientEvent::WallFetched(whispers));
                }
                Err(err) => warn!("poll: whisper fetch failed: {err}"),
            }
        });
    }

    /// Runs one cycle immediately, then one every `POLL_INTERVAL`, for the
    /// lifetime of the returned task.
    pub fn start_polling(self: &Arc<Self>) -> JoinHandle<()> {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            loop {
                ticker.tick().await;
                client.poll_cycle();
            }
        })
    }

    pub async fn submit_reply(
        &self,
        whisper_id: &WhisperId,
        text: &str,
    ) -> Result<ReplyAck, TransportError> {
        self.gateway
            .post_reply(whisper_id, REPLY_AUTHOR_LABEL, text)
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
