//! Inbound and outbound wire types of the relay endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /chat`.
///
/// Every field is optional on the wire; a missing field reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub assistant_id: Option<String>,
    pub message: Option<String>,
    pub access_code: Option<String>,
}

impl ChatRequest {
    pub fn new(
        assistant_id: impl Into<String>,
        message: impl Into<String>,
        access_code: impl Into<String>,
    ) -> Self {
        Self {
            assistant_id: Some(assistant_id.into()),
            message: Some(message.into()),
            access_code: Some(access_code.into()),
        }
    }

    /// Parse a raw request body field by field.
    ///
    /// A body that is not a JSON object reads as every field empty. Inside an
    /// object, a field that is not a string reads as empty without affecting
    /// the others. A repeated key keeps its last value.
    pub fn from_slice(body: &[u8]) -> Self {
        let fields: Map<String, Value> = serde_json::from_slice(body).unwrap_or_default();
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            assistant_id: text("assistantId"),
            message: text("message"),
            access_code: text("accessCode"),
        }
    }

    pub fn assistant_id(&self) -> &str {
        trimmed(&self.assistant_id)
    }

    pub fn message(&self) -> &str {
        trimmed(&self.message)
    }

    pub fn access_code(&self) -> &str {
        trimmed(&self.access_code)
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default().trim()
}

/// Successful reply of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub assistant_name: String,
    pub reply: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fields_trimmed() {
        let request = ChatRequest::from_slice(
            br#"{"assistantId":" faith_builder ","message":"  Hello\n","accessCode":"\tHalifax-elim "}"#,
        );
        assert_eq!(request.assistant_id(), "faith_builder");
        assert_eq!(request.message(), "Hello");
        assert_eq!(request.access_code(), "Halifax-elim");
    }

    #[test]
    fn test_missing_fields_read_empty() {
        let request = ChatRequest::from_slice(br#"{"message":"hi"}"#);
        assert_eq!(request.assistant_id(), "");
        assert_eq!(request.access_code(), "");
        assert_eq!(request.message(), "hi");
    }

    #[test]
    fn test_unparseable_body_reads_empty() {
        for body in [&b"not json"[..], b"", b"[1,2]", b"\"hi\"", br#"{"accessCode": 42}"#] {
            let request = ChatRequest::from_slice(body);
            assert_eq!(request, ChatRequest::default());
        }
    }

    #[test]
    fn test_non_string_field_keeps_the_rest() {
        let request = ChatRequest::from_slice(
            br#"{"assistantId":"faith_builder","message":42,"accessCode":"Halifax-elim"}"#,
        );
        assert_eq!(request.assistant_id(), "faith_builder");
        assert_eq!(request.access_code(), "Halifax-elim");
        assert_eq!(request.message(), "");

        let request = ChatRequest::from_slice(
            br#"{"assistantId":null,"message":["hi"],"accessCode":"Halifax-elim","extra":{}}"#,
        );
        assert_eq!(request.assistant_id(), "");
        assert_eq!(request.message(), "");
        assert_eq!(request.access_code(), "Halifax-elim");
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let request = ChatRequest::from_slice(
            br#"{"message":"first","message":"second","accessCode":"x"}"#,
        );
        assert_eq!(request.message(), "second");
        assert_eq!(request.access_code(), "x");
    }

    #[test]
    fn test_reply_serialization() {
        let reply = ChatReply {
            assistant_name: "Faith Builder".to_string(),
            reply: "Welcome!".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"assistantName":"Faith Builder","reply":"Welcome!"}"#);
    }
}
