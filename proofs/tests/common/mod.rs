#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use proofs::api::create_router;
use proofs::config::Config;
use proofs::storage::{SignedUrlProvider, SignedUrlResponse, StorageError};
use proofs::utils::state::AppState;
use reqwest::Url;
use serde_json::Value;

/// Records every call and answers with a canned result.
pub struct FakeProvider {
    pub calls: Mutex<Vec<(String, u64)>>,
    answer: Box<dyn Fn(&str, u64) -> Result<SignedUrlResponse, StorageError> + Send + Sync>,
}

impl FakeProvider {
    pub fn answering(
        answer: impl Fn(&str, u64) -> Result<SignedUrlResponse, StorageError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(FakeProvider {
            calls: Mutex::new(Vec::new()),
            answer: Box::new(answer),
        })
    }

    pub fn with_body(body: Value) -> Arc<Self> {
        Self::answering(move |_, _| Ok(SignedUrlResponse::new(body.clone())))
    }

    pub fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SignedUrlProvider for FakeProvider {
    async fn create_signed_url(
        &self,
        path: &str,
        ttl: u64,
    ) -> Result<SignedUrlResponse, StorageError> {
        self.calls.lock().unwrap().push((path.to_string(), ttl));
        (self.answer)(path, ttl)
    }
}

pub fn test_config(storage_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_url: Url::parse(storage_url).unwrap(),
        service_role_key: "service-role-key".to_string(),
        bucket: "proofs".to_string(),
    }
}

pub fn router_with(provider: Arc<FakeProvider>) -> Router {
    let state = AppState::new(provider);
    create_router(Arc::new(state))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(res: Response<Body>) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
