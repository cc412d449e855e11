use reqwest::{Client, StatusCode, Url};
use serde_json::{Value, json};

use crate::config::Config;
use crate::storage::{SignedUrlProvider, SignedUrlResponse, StorageError};
use crate::utils::validation::has_plain_segments;

const STORAGE_API_PREFIX: &str = "storage/v1";
const SIGN_SEGMENTS: [&str; 4] = ["storage", "v1", "object", "sign"];

/// Talks to the Supabase Storage REST API with a service role key.
pub struct SupabaseStorage {
    client: Client,
    storage_url: Url,
    storage_api: String,
    service_role_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(
        storage_url: &Url,
        service_role_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        SupabaseStorage {
            client: Client::new(),
            storage_url: storage_url.clone(),
            storage_api: format!(
                "{}/{STORAGE_API_PREFIX}",
                storage_url.as_str().trim_end_matches('/')
            ),
            service_role_key: service_role_key.into(),
            bucket: bucket.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.storage_url,
            config.service_role_key.clone(),
            config.bucket.clone(),
        )
    }

    /// Every segment is appended separately so that `?`, `#` and `%` inside
    /// an object name are percent-encoded instead of ending the path.
    fn sign_url(&self, path: &str) -> Result<Url, StorageError> {
        if !has_plain_segments(path) {
            return Err(StorageError::InvalidUrl(format!(
                "object path `{path}` has an empty or relative segment"
            )));
        }
        let mut url = self.storage_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| {
                StorageError::InvalidUrl(format!("`{}` cannot be a base url", self.storage_url))
            })?
            .pop_if_empty()
            .extend(SIGN_SEGMENTS)
            .push(&self.bucket)
            .extend(path.split('/'));
        Ok(url)
    }

    /// `signedURL` comes back relative to the storage api root.
    fn absolutize(&self, mut body: Value) -> Result<Value, StorageError> {
        let relative = body
            .get("signedURL")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::Decode(format!("missing `signedURL` in {body}")))?;
        let absolute = if relative.starts_with("http://") || relative.starts_with("https://") {
            relative.to_string()
        } else {
            format!("{}/{}", self.storage_api, relative.trim_start_matches('/'))
        };
        if let Value::Object(fields) = &mut body {
            fields.insert("signedURL".to_string(), Value::String(absolute.clone()));
            fields.insert("signedUrl".to_string(), Value::String(absolute));
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl SignedUrlProvider for SupabaseStorage {
    async fn create_signed_url(
        &self,
        path: &str,
        ttl: u64,
    ) -> Result<SignedUrlResponse, StorageError> {
        let url = self.sign_url(path)?;
        tracing::debug!(bucket = %self.bucket, path, ttl, "requesting signed url");

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.service_role_key)
            .json(&json!({ "expiresIn": ttl }))
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = rejection_message(status, &text);
            tracing::warn!(bucket = %self.bucket, path, %status, %message, "storage provider refused to sign");
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| StorageError::Decode(format!("{e}: {text}")))?;
        Ok(SignedUrlResponse::new(self.absolutize(body)?))
    }
}

fn rejection_message(status: StatusCode, text: &str) -> String {
    let body: Option<Value> = serde_json::from_str(text).ok();
    let from_body = body.as_ref().and_then(|body| {
        body.get("message")
            .and_then(Value::as_str)
            .or_else(|| match body.get("error") {
                Some(Value::String(error)) => Some(error.as_str()),
                Some(Value::Object(error)) => error.get("message").and_then(Value::as_str),
                _ => None,
            })
    });
    match from_body {
        Some(message) => message.to_string(),
        None if !text.trim().is_empty() => text.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("storage provider error")
            .to_string(),
    }
}
