use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use crate::config;
use crate::contact::validation::ContactSubmission;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("We couldn't reach the server. Check your connection and try again. ({0})")]
    Network(String),
    #[error("Sending failed: {0}")]
    Rejected(String),
    #[error("Sending failed (HTTP {0}). Please try again later.")]
    Status(u16),
    #[error("Something went wrong sending your message ({0}). Please try again.")]
    ResponseShape(String),
}

/// What the relay reported for a delivered submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaySuccess {
    pub message: String,
    pub message_id: Option<String>,
}

// Loose on purpose: accepts both the tagged replies and bare {message, info}.
#[derive(Debug, Deserialize)]
struct RelayReply {
    status: Option<String>,
    message: Option<String>,
    info: Option<serde_json::Value>,
    error: Option<String>,
}

pub async fn submit(submission: &ContactSubmission) -> Result<RelaySuccess, SubmissionError> {
    let url = config::api_url("/api/send-email");
    let response = Request::post(&url)
        .json(submission)
        .map_err(|e| SubmissionError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmissionError::Network(e.to_string()))?;

    let status = response.status();
    let content_type = response.headers().get("content-type");
    let body = response
        .text()
        .await
        .map_err(|e| SubmissionError::Network(e.to_string()))?;

    interpret_response(status, content_type.as_deref(), &body)
}

/// Decides whether a relay response can be trusted as a delivery.
pub fn interpret_response(
    status: u16,
    content_type: Option<&str>,
    body: &str,
) -> Result<RelaySuccess, SubmissionError> {
    let is_json = content_type.map_or(false, is_json_content_type);

    if !(200..300).contains(&status) {
        let detail = is_json
            .then(|| serde_json::from_str::<RelayReply>(body).ok())
            .flatten()
            .and_then(failure_detail);
        return Err(match detail {
            Some(detail) => SubmissionError::Rejected(detail),
            None => SubmissionError::Status(status),
        });
    }

    if !is_json {
        return Err(SubmissionError::ResponseShape(format!(
            "expected JSON, got {}",
            content_type.unwrap_or("no content type")
        )));
    }
    if body.trim().is_empty() {
        return Err(SubmissionError::ResponseShape("empty response".to_string()));
    }

    let reply: RelayReply = serde_json::from_str(body)
        .map_err(|e| SubmissionError::ResponseShape(format!("unreadable response: {}", e)))?;

    let delivered = reply.status.as_deref().map_or(true, |s| s == "sent")
        && reply.info.as_ref().map_or(false, |info| !info.is_null());
    if !delivered {
        return Err(match failure_detail(reply) {
            Some(detail) => SubmissionError::Rejected(detail),
            None => SubmissionError::ResponseShape("no delivery confirmation".to_string()),
        });
    }

    let message_id = reply
        .info
        .as_ref()
        .and_then(|info| info.get("messageId"))
        .and_then(|id| id.as_str())
        .map(str::to_string);

    Ok(RelaySuccess {
        message: reply.message.unwrap_or_default(),
        message_id,
    })
}

fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

fn failure_detail(reply: RelayReply) -> Option<String> {
    match (reply.message, reply.error) {
        (Some(message), Some(error)) => Some(format!("{}: {}", message, error)),
        (None, Some(error)) => Some(error),
        (Some(message), None) if reply.status.as_deref() == Some("failed") => Some(message),
        _ => None,
    }
}
