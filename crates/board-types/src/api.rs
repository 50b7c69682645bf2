use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Message, MessagePatch};

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub body: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMessageRequest {
    /// Absent means "leave unchanged"; an explicit `null` is rejected.
    #[serde(default, deserialize_with = "present")]
    pub body: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl From<UpdateMessageRequest> for MessagePatch {
    fn from(req: UpdateMessageRequest) -> Self {
        MessagePatch { body: req.body }
    }
}

/// Wire shape of a message. Timestamps serialize as RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(msg: Message) -> Self {
        MessageResponse {
            id: msg.id,
            body: msg.body,
            username: msg.username,
            created_at: msg.created_at,
            updated_at: msg.updated_at,
        }
    }
}

// -- Errors --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_rejects_unknown_fields() {
        let res = serde_json::from_str::<UpdateMessageRequest>(r#"{"body":"x","username":"eve"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn update_request_body_is_optional() {
        let req: UpdateMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(MessagePatch::from(req).is_empty());
    }

    #[test]
    fn update_request_rejects_null_body() {
        assert!(serde_json::from_str::<UpdateMessageRequest>(r#"{"body":null}"#).is_err());

        let req: UpdateMessageRequest = serde_json::from_str(r#"{"body":"New Text"}"#).unwrap();
        assert_eq!(req.body.as_deref(), Some("New Text"));
    }

    #[test]
    fn create_request_requires_both_fields() {
        assert!(serde_json::from_str::<CreateMessageRequest>(r#"{"body":"hi"}"#).is_err());
        assert!(serde_json::from_str::<CreateMessageRequest>(r#"{"username":"Liza"}"#).is_err());
    }

    #[test]
    fn response_serializes_fixed_shape() {
        let ts = "2024-05-01T12:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let resp = MessageResponse::from(Message {
            id: 7,
            body: "Hello 👋".into(),
            username: "Liza".into(),
            created_at: ts,
            updated_at: ts,
        });

        let value = serde_json::to_value(&resp).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["id"], 7);
        assert_eq!(obj["body"], "Hello 👋");
        assert_eq!(obj["username"], "Liza");
        assert_eq!(obj["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(obj["updated_at"], "2024-05-01T12:30:00Z");
    }
}
