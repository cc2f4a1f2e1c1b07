use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::AppState;
use crate::api::smtp::RelayError;
use crate::handlers::contact_dtos::{ContactRequest, DeliveryInfo, RelayResponse};
use crate::utils::contact_mail;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

type RelayResult = Result<Json<RelayResponse>, (StatusCode, Json<RelayResponse>)>;

pub async fn send_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> RelayResult {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected contact payload: {}", rejection.body_text());
            return Err((
                StatusCode::BAD_REQUEST,
                Json(RelayResponse::invalid(rejection.body_text())),
            ));
        }
    };

    if let Err(reason) = check_submission(&submission) {
        tracing::warn!("Rejected contact submission: {}", reason);
        return Err((StatusCode::BAD_REQUEST, Json(RelayResponse::invalid(reason))));
    }

    match relay(&state, &submission).await {
        Ok(info) => {
            tracing::info!("Relayed contact submission as {}", info.message_id);
            Ok(Json(RelayResponse::sent(info)))
        }
        Err(e) => {
            tracing::error!("Failed to relay contact submission: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayResponse::failed(e.to_string())),
            ))
        }
    }
}

/// The same required-field rules the contact form applies before posting.
fn check_submission(submission: &ContactRequest) -> Result<(), &'static str> {
    if submission.name.trim().is_empty() {
        return Err("name is required");
    }
    if submission.phone.trim().is_empty() {
        return Err("phone is required");
    }
    if !EMAIL_PATTERN.is_match(&submission.email) {
        return Err("email is not a valid address");
    }
    Ok(())
}

async fn relay(state: &AppState, submission: &ContactRequest) -> Result<DeliveryInfo, RelayError> {
    let config = (state.mail_config)()?;
    let transport = state.transports.open(&config)?;

    // Nothing is composed or sent unless the server accepts the session.
    transport.verify().await?;

    let mail = contact_mail::compose(submission, &config, Utc::now());
    let message_id = mail.message_id.clone();
    let receipt = transport.send(mail).await?;

    Ok(DeliveryInfo {
        message_id,
        accepted: vec![config.to.email.to_string()],
        response: receipt.response,
    })
}
