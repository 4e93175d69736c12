//! Backend commands queued from UI to the backend worker.

use shared::domain::WhisperId;

pub enum BackendCommand {
    SubmitReply { whisper_id: WhisperId, text: String },
}
