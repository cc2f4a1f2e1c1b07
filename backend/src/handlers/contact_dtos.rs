use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub message_id: String,
    pub accepted: Vec<String>,
    pub response: String,
}

/// Body of every `/api/send-email` reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelayResponse {
    Sent { message: String, info: DeliveryInfo },
    Failed { message: String, error: String },
}

pub const SENT_MESSAGE: &str = "Email sent successfully";
pub const FAILED_MESSAGE: &str = "Failed to send email";
pub const INVALID_MESSAGE: &str = "Invalid contact submission";

impl RelayResponse {
    pub fn sent(info: DeliveryInfo) -> Self {
        RelayResponse::Sent {
            message: SENT_MESSAGE.to_string(),
            info,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        RelayResponse::Failed {
            message: FAILED_MESSAGE.to_string(),
            error: error.into(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        RelayResponse::Failed {
            message: INVALID_MESSAGE.to_string(),
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_is_optional() {
        let req: ContactRequest = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100"
        }))
        .unwrap();
        assert_eq!(req.message, None);
    }

    #[test]
    fn sent_carries_message_and_info() {
        let body = serde_json::to_value(RelayResponse::sent(DeliveryInfo {
            message_id: "<abc@example.com>".to_string(),
            accepted: vec!["hello@example.com".to_string()],
            response: "250 OK".to_string(),
        }))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "status": "sent",
                "message": SENT_MESSAGE,
                "info": {
                    "messageId": "<abc@example.com>",
                    "accepted": ["hello@example.com"],
                    "response": "250 OK"
                }
            })
        );
    }

    #[test]
    fn failed_carries_message_and_error() {
        let body = serde_json::to_value(RelayResponse::failed("SMTP down")).unwrap();
        assert_eq!(
            body,
            json!({ "status": "failed", "message": FAILED_MESSAGE, "error": "SMTP down" })
        );
    }
}
