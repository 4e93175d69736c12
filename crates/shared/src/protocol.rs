use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::WhisperId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub author: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperPayload {
    pub id: WhisperId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<u8>,
    pub tag: String,
    pub content: String,
    #[serde(default)]
    pub comments: Vec<CommentPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub whisper_id: WhisperId,
    pub author_label: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyAck {
    pub updated_counter: u64,
}
