// Wire message definitions for both sides of the bridge
//
// Frontend side: CDP-style requests, responses and notifications
// Backend side: behavior.* command messages

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    #[error("Pause event carried an empty stack")]
    EmptyStack,

    #[error("Invalid source glob: {0}")]
    InvalidPattern(String),
}

impl BridgeError {
    pub fn invalid_params(method: &str, reason: impl Into<String>) -> Self {
        BridgeError::InvalidParams {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

pub type RequestId = u64;

/// Frontend request: `{ id, method: "Domain.action", params }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub method: String,
    #[serde(default = "empty_object")]
    pub params: Value,
}

/// Response correlated to exactly one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: RequestId,
    pub result: Value,
}

/// Unsolicited frontend event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub method: String,
    pub params: Value,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrontendMessage {
    Response(Response),
    Notification(Notification),
}

impl FrontendMessage {
    /// Method name for notifications, `None` for responses
    pub fn method(&self) -> Option<&str> {
        match self {
            FrontendMessage::Notification(n) => Some(&n.method),
            FrontendMessage::Response(_) => None,
        }
    }
}

/// Command sent to the runtime backend.
///
/// `params` serializes as `null` when the command disables or clears a
/// backend feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendCommand {
    pub method: String,
    pub params: Option<Value>,
}

impl BackendCommand {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            method: method.to_string(),
            params: Some(params),
        }
    }

    pub fn cleared(method: &str) -> Self {
        Self {
            method: method.to_string(),
            params: None,
        }
    }
}

/// Message received from the runtime backend
#[derive(Debug, Clone, Deserialize)]
pub struct BackendMessage {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Handler result: either a response body or no response at all
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Respond(Value),
    Suppress,
}

impl Reply {
    pub fn empty() -> Self {
        Reply::Respond(empty_object())
    }

    /// Response body as sent on the wire
    pub fn into_result(self) -> Option<Value> {
        match self {
            Reply::Respond(value) => Some(normalize_result(value)),
            Reply::Suppress => None,
        }
    }
}

/// Response bodies are always objects; `null` becomes `{}`
pub fn normalize_result(result: Value) -> Value {
    match result {
        Value::Null => empty_object(),
        other => other,
    }
}

pub(crate) fn empty_object() -> Value {
    json!({})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params_default_to_empty_object() {
        let request: Request = serde_json::from_str(r#"{"id":3,"method":"Log.enable"}"#).unwrap();
        assert_eq!(request.id, 3);
        assert_eq!(request.params, json!({}));
    }

    #[test]
    fn test_cleared_command_serializes_null_params() {
        let cmd = BackendCommand::cleared("behavior.executeResume");
        let encoded = serde_json::to_string(&cmd).unwrap();
        assert_eq!(encoded, r#"{"method":"behavior.executeResume","params":null}"#);
    }

    #[test]
    fn test_null_reply_normalizes_to_empty_object() {
        assert_eq!(Reply::Respond(Value::Null).into_result(), Some(json!({})));
        assert_eq!(Reply::Respond(json!({"a": 1})).into_result(), Some(json!({"a": 1})));
        assert_eq!(Reply::Suppress.into_result(), None);
    }

    #[test]
    fn test_normalize_result_only_touches_null() {
        assert_eq!(normalize_result(Value::Null), json!({}));
        assert_eq!(normalize_result(json!([])), json!([]));
        assert_eq!(normalize_result(json!(false)), json!(false));
    }

    #[test]
    fn test_frontend_message_is_untagged() {
        let msg = FrontendMessage::Response(Response {
            id: 7,
            result: json!({}),
        });
        assert_eq!(serde_json::to_string(&msg).unwrap(), r#"{"id":7,"result":{}}"#);

        let msg = FrontendMessage::Notification(Notification::new("Debugger.resumed", json!({})));
        assert_eq!(msg.method(), Some("Debugger.resumed"));
    }
}
