// Route exports
pub mod feed;
pub mod preferences;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::config::FeedSettings;
use crate::core::FeedBuilder;
use crate::models::{ErrorResponse, Profile};
use crate::services::{CacheKey, CacheManager, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// Absent when Redis was unreachable at startup
    pub cache: Option<Arc<CacheManager>>,
    pub feed: FeedBuilder,
    pub feed_settings: FeedSettings,
}

impl AppState {
    /// Profile lookup through the cache
    ///
    /// Cache failures are logged and fall through to PostgreSQL.
    pub async fn load_profile(&self, user_id: &str) -> Result<Option<Profile>, PostgresError> {
        let key = CacheKey::profile(user_id);

        if let Some(cache) = &self.cache {
            match cache.get::<Profile>(&key).await {
                Ok(Some(profile)) => return Ok(Some(profile)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Profile cache read failed for {}: {}", user_id, e),
            }
        }

        let profile = self.postgres.get_profile(user_id).await?;

        if let (Some(cache), Some(profile)) = (&self.cache, &profile) {
            if let Err(e) = cache.set(&key, profile).await {
                tracing::warn!("Profile cache write failed for {}: {}", user_id, e);
            }
        }

        Ok(profile)
    }

    pub async fn invalidate_profile(&self, user_id: &str) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete(&CacheKey::profile(user_id)).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(feed::configure)
            .configure(preferences::configure),
    );
}

/// JSON extractor config that reports payload errors as `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Query extractor config that reports query errors as `ErrorResponse`
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}

pub(crate) fn error_response(
    status: StatusCode,
    error: &str,
    message: impl ToString,
) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}
