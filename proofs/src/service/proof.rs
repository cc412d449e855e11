use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::storage::{SignedUrlProvider, SignedUrlResponse};
use crate::utils::state::AppState;
use crate::utils::validation::{has_plain_segments, is_owned_by};

pub const DEFAULT_TTL_SECS: u64 = 600;

fn default_ttl() -> u64 {
    DEFAULT_TTL_SECS
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignedUrlReq {
    pub path: String,
    #[serde(default = "default_ttl")]
    pub ttl: u64,
    pub user_id: String,
}

pub async fn create_signed_url(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<SignedUrlReq>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let res = issue_signed_url(state.storage.as_ref(), &req.path, req.ttl, &req.user_id).await?;
    Ok(Json(res))
}

/// Checks that `user_id` owns `path` and asks the provider to sign it.
///
/// The provider is only contacted once ownership is established, and its
/// payload is returned as is unless it reports an error.
pub async fn issue_signed_url(
    storage: &dyn SignedUrlProvider,
    path: &str,
    ttl: u64,
    user_id: &str,
) -> Result<SignedUrlResponse, AppError> {
    if path.is_empty() {
        return Err(AppError::Validation("path must not be empty".to_string()));
    }
    if !has_plain_segments(path) {
        return Err(AppError::Validation(
            "path must not contain empty, `.` or `..` segments".to_string(),
        ));
    }
    if user_id.is_empty() {
        return Err(AppError::Validation("user_id must not be empty".to_string()));
    }
    if ttl == 0 {
        return Err(AppError::Validation(
            "ttl must be a positive number of seconds".to_string(),
        ));
    }

    if !is_owned_by(path, user_id) {
        return Err(AppError::Forbidden("path not owned by user".to_string()));
    }

    let res = storage.create_signed_url(path, ttl).await?;
    if let Some(message) = res.error_message() {
        return Err(AppError::Provider(message));
    }

    tracing::debug!(ttl, "issued signed url");
    Ok(res)
}
