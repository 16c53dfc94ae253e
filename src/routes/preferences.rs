use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ProfileResponse, UpdatePreferencesRequest, UserQuery};
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/preferences", web::get().to(get_preferences))
        .route("/preferences", web::put().to(update_preferences));
}

/// GET /api/v1/preferences?userId={userId}
async fn get_preferences(state: web::Data<AppState>, query: web::Query<UserQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.load_profile(&query.user_id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(ProfileResponse {
            success: None,
            profile,
        }),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "Profile not found",
            format!("No profile for user {}", query.user_id),
        ),
        Err(e) => {
            tracing::error!("Failed to load preferences for {}: {}", query.user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load preferences", e)
        }
    }
}

/// PUT /api/v1/preferences
///
/// Fields left out of the body keep their stored value.
async fn update_preferences(
    state: web::Data<AppState>,
    req: web::Json<UpdatePreferencesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.postgres.update_preferences(&req.user_id, &req.changes()).await {
        Ok(Some(profile)) => {
            state.invalidate_profile(&req.user_id).await;
            tracing::info!("Updated preferences for {}", req.user_id);
            HttpResponse::Ok().json(ProfileResponse {
                success: Some(true),
                profile,
            })
        }
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "Profile not found",
            format!("No profile for user {}", req.user_id),
        ),
        Err(e) => {
            tracing::error!("Failed to update preferences for {}: {}", req.user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update preferences", e)
        }
    }
}
