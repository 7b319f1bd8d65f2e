//! Raw platform responses.

use serde::Serialize;
use serde_json::Value;

/// What every remote call yields: the HTTP status plus the raw JSON payload.
///
/// This is deliberately unopinionated — deciding whether a given status means
/// "created", "already there", or "broken" is the idempotency classifier's
/// job, and it needs the untouched body (timestamps, error messages) to do it.
/// Serializable so responses can ride along in structured event output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A bodyless response (204 deletes, failed body reads).
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Value::Null,
        }
    }

    /// The platform's `error.message` field, when present.
    pub fn error_message(&self) -> Option<&str> {
        self.body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
    }

    /// A top-level string field (`created_on`, `updated_on`, ...).
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }

    /// The latest commit hash of a branch payload (`target.hash`).
    pub fn target_hash(&self) -> Option<&str> {
        self.body
            .get("target")
            .and_then(|t| t.get("hash"))
            .and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_digs_into_nested_error() {
        let resp = RawResponse::new(
            400,
            json!({"error": {"message": "Repository already exists."}}),
        );
        assert_eq!(resp.error_message(), Some("Repository already exists."));
    }

    #[test]
    fn error_message_absent_on_flat_body() {
        let resp = RawResponse::new(200, json!({"slug": "api"}));
        assert_eq!(resp.error_message(), None);
        assert!(resp.is_success());
    }

    #[test]
    fn target_hash_resolves() {
        let resp = RawResponse::new(200, json!({"target": {"hash": "abc123"}}));
        assert_eq!(resp.target_hash(), Some("abc123"));
    }

    #[test]
    fn serializes_status_and_body_verbatim() {
        let resp = RawResponse::new(201, json!({"slug": "api"}));
        let event = serde_json::to_value(&resp).expect("serialize response");
        assert_eq!(event, json!({"status": 201, "body": {"slug": "api"}}));
    }

    #[test]
    fn empty_response_has_null_body() {
        let resp = RawResponse::empty(204);
        assert_eq!(resp.body, Value::Null);
        assert!(resp.is_success());
    }
}
