use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod driver;

/// Payload returned by the storage provider for a signed url request.
///
/// The body is kept opaque and handed back to the caller untouched; the only
/// field ever looked at is `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedUrlResponse(pub Value);

impl SignedUrlResponse {
    pub fn new(body: Value) -> Self {
        SignedUrlResponse(body)
    }

    /// The provider's error message, if the payload carries one. Accepts both
    /// `{"error": {"message": ..}}` and `{"error": ".."}`. Empty or zero-like
    /// values count as no error.
    pub fn error_message(&self) -> Option<String> {
        match self.0.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(message) if message.is_empty() => None,
            Value::Object(error) if error.is_empty() => None,
            Value::Array(errors) if errors.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(message) => Some(message.clone()),
            Value::Object(error) => Some(
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| Value::Object(error.clone()).to_string()),
            ),
            other => Some(other.to_string()),
        }
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("storage provider is unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage provider returned an unusable body: {0}")]
    Decode(String),

    #[error("invalid storage url: {0}")]
    InvalidUrl(String),
}

/// Issues signed urls for objects in a single bucket.
#[async_trait::async_trait]
pub trait SignedUrlProvider: Send + Sync {
    async fn create_signed_url(
        &self,
        path: &str,
        ttl: u64,
    ) -> Result<SignedUrlResponse, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message() {
        let nested = SignedUrlResponse::new(json!({"error": {"message": "object not found"}}));
        assert_eq!(nested.error_message().as_deref(), Some("object not found"));

        let flat = SignedUrlResponse::new(json!({"error": "bucket missing"}));
        assert_eq!(flat.error_message().as_deref(), Some("bucket missing"));

        let ok = SignedUrlResponse::new(json!({"signedURL": "https://x/y", "error": null}));
        assert_eq!(ok.error_message(), None);

        let bare = SignedUrlResponse::new(json!({"signedURL": "https://x/y"}));
        assert_eq!(bare.error_message(), None);

        for empty in [json!(""), json!({}), json!([]), json!(0), json!(0.0), json!(false)] {
            let res = SignedUrlResponse::new(json!({"signedURL": "https://x/y", "error": empty.clone()}));
            assert_eq!(res.error_message(), None, "error: {empty}");
        }

        let listed = SignedUrlResponse::new(json!({"error": ["quota"]}));
        assert_eq!(listed.error_message().as_deref(), Some(r#"["quota"]"#));
    }

    #[test]
    fn test_error_without_message_is_reported_whole() {
        let res = SignedUrlResponse::new(json!({"error": {"code": 404}}));
        assert_eq!(res.error_message().as_deref(), Some(r#"{"code":404}"#));
    }
}
