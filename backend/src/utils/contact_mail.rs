use chrono::{DateTime, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::{Address, Message};
use maud::html;
use uuid::Uuid;

use crate::api::smtp::RelayError;
use crate::config::mail_config::MailConfig;
use crate::handlers::contact_dtos::ContactRequest;

pub const SUBJECT: &str = "New contact form submission";
const NO_MESSAGE: &str = "(no message)";

/// A contact notification ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub reply_to: Option<Mailbox>,
    pub subject: String,
    pub message_id: String,
    pub text: String,
    pub html: String,
}

pub fn compose(submission: &ContactRequest, config: &MailConfig, submitted_at: DateTime<Utc>) -> OutboundMail {
    let message = submission
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(NO_MESSAGE);
    let timestamp = submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let text = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nMessage: {}\n\nSubmitted at {}\n",
        submission.name, submission.email, submission.phone, message, timestamp
    );

    // maud escapes every interpolated value
    let html = html! {
        h2 { (SUBJECT) }
        p { strong { "Name: " } (submission.name) }
        p { strong { "Email: " } (submission.email) }
        p { strong { "Phone: " } (submission.phone) }
        p { strong { "Message:" } }
        p style="white-space: pre-wrap;" { (message) }
        hr;
        p style="color: #888; font-size: 12px;" { "Submitted at " (timestamp) }
    }
    .into_string();

    OutboundMail {
        from: config.from.clone(),
        to: config.to.clone(),
        reply_to: reply_to(submission),
        subject: SUBJECT.to_string(),
        message_id: message_id(&config.from),
        text,
        html,
    }
}

fn reply_to(submission: &ContactRequest) -> Option<Mailbox> {
    let address = submission.email.trim().parse::<Address>().ok()?;
    let name = submission.name.trim();
    let name = (!name.is_empty()).then(|| name.to_string());
    Some(Mailbox::new(name, address))
}

fn message_id(from: &Mailbox) -> String {
    format!("<{}@{}>", Uuid::new_v4(), from.email.domain())
}

impl OutboundMail {
    pub fn into_message(self) -> Result<Message, RelayError> {
        let mut builder = Message::builder()
            .from(self.from)
            .to(self.to)
            .subject(self.subject)
            .message_id(Some(self.message_id));
        if let Some(reply_to) = self.reply_to {
            builder = builder.reply_to(reply_to);
        }
        builder
            .multipart(MultiPart::alternative_plain_html(self.text, self.html))
            .map_err(|e| RelayError::Message(e.to_string()))
    }
}
