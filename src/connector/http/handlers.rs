use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{TalkMessage, ValidationError};

use super::{ApiError, AppState};

pub const TALK_ROUTE: &str = "/api/talk";

#[derive(Debug, Serialize)]
pub struct TalkResponse {
    pub reply: String,
}

/// `POST /api/talk`.
///
/// The body is read as raw bytes so an unparseable or non-object payload is
/// reported as a missing message rather than an extractor rejection. A body
/// over the server's size limit is answered as a too-long message.
pub async fn talk(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TalkResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        debug!(status = %rejection.status(), "Talk body rejected: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ValidationError::BodyTooLarge
        } else {
            ValidationError::MissingMessage
        }
    })?;

    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let message = TalkMessage::parse(payload.get("message").and_then(Value::as_str))?
        .with_turn(payload.get("turn").and_then(Value::as_u64));

    debug!(
        turn = ?message.turn(),
        units = message.unit_count(),
        "Talk request accepted"
    );

    let reply = state.complete_message().execute(&message).await?;

    Ok(Json(TalkResponse {
        reply: reply.into_inner(),
    }))
}

pub async fn healthz() -> &'static str {
    "ok"
}
