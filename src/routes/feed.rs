use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::FeedOptions;
use crate::models::{
    FeedQuery, FeedResponse, HealthResponse, SavedResponse, SwipeRequest, SwipeResponse,
    SwipedCards, UserPreferences, UserQuery,
};
use crate::routes::{error_response, AppState};

/// Configure feed and swipe routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/feed", web::get().to(get_feed))
        .route("/swipe", web::post().to(record_swipe))
        .route("/saved", web::get().to(get_saved));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Personalized feed endpoint
///
/// GET /api/v1/feed?city={city}&userId={userId}&type={venues|events|all}&category={category}
///
/// The city falls back to the one stored in the user's profile.
async fn get_feed(state: web::Data<AppState>, query: web::Query<FeedQuery>) -> impl Responder {
    let query = query.into_inner();
    let user_id = query.user_id.as_deref().filter(|id| !id.is_empty());
    let mut city = query.city.clone().unwrap_or_default();
    let mut preferences = UserPreferences::anonymous(state.feed_settings.default_go_out_days.clone());

    if let Some(user_id) = user_id {
        match state.load_profile(user_id).await {
            Ok(Some(profile)) => {
                if city.is_empty() {
                    city = profile.current_city;
                }
                preferences = profile.preferences;
            }
            Ok(None) => {
                tracing::debug!("No profile for {}, using anonymous preferences", user_id);
            }
            Err(e) => {
                tracing::error!("Failed to load profile for {}: {}", user_id, e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load feed", e);
            }
        }
    }

    if city.is_empty() {
        return HttpResponse::Ok().json(FeedResponse::empty("Set your city first"));
    }

    tracing::info!("Building {:?} feed for city: {}, user: {:?}", query.feed_type, city, user_id);

    let swiped = match user_id {
        Some(user_id) => match state.postgres.swiped_cards(user_id).await {
            Ok(swiped) => swiped,
            Err(e) => {
                tracing::warn!("Failed to fetch swipes for {}, proceeding without filtering: {}", user_id, e);
                SwipedCards::default()
            }
        },
        None => SwipedCards::default(),
    };

    let venues = if query.feed_type.includes_venues() {
        let exclude: Vec<String> = swiped.venue_ids.iter().cloned().collect();
        match state
            .postgres
            .venues_for_city(&city, &exclude, state.feed_settings.venue_limit)
            .await
        {
            Ok(venues) => venues,
            Err(e) => {
                tracing::error!("Failed to query venues for {}: {}", city, e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load feed", e);
            }
        }
    } else {
        vec![]
    };

    let category = query.category.clone().filter(|c| !c.is_empty());
    let events = if query.feed_type.includes_events() {
        let exclude: Vec<String> = swiped.event_ids.iter().cloned().collect();
        match state
            .postgres
            .upcoming_events_for_city(
                &city,
                &exclude,
                category.as_deref(),
                state.feed_settings.event_limit,
            )
            .await
        {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Failed to query events for {}: {}", city, e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load feed", e);
            }
        }
    } else {
        vec![]
    };

    let options = FeedOptions {
        feed_type: query.feed_type,
        category,
    };
    let result = state.feed.build(&preferences, venues, events, &swiped, &options);

    tracing::info!(
        "Returning {} cards for {} (from {} candidates)",
        result.feed.len(),
        city,
        result.total_candidates
    );

    HttpResponse::Ok().json(FeedResponse {
        count: result.feed.len(),
        feed: result.feed,
        venues: result.venues,
        events: result.events,
        city,
        message: None,
    })
}

/// Record swipe endpoint
///
/// POST /api/v1/swipe
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "cardId": "string",
///   "cardType": "venue|event",
///   "action": "like|superlike|pass"
/// }
/// ```
///
/// `venueCardId` / `eventCardId` are accepted in place of `cardId` and
/// `cardType`; when both are given both swipes are recorded and the first
/// swipe id is returned.
async fn record_swipe(state: web::Data<AppState>, req: web::Json<SwipeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let targets = req.targets();
    if targets.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "Must provide cardId and cardType, or venueCardId or eventCardId",
        );
    }

    let mut swipe_ids = Vec::with_capacity(targets.len());
    for (card_type, card_id) in targets {
        match state
            .postgres
            .record_swipe(&req.user_id, card_type, card_id, req.action)
            .await
        {
            Ok(swipe_id) => swipe_ids.push(swipe_id),
            Err(e) => {
                tracing::error!("Failed to record swipe for {}: {}", req.user_id, e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save swipe", e);
            }
        }
    }

    HttpResponse::Ok().json(SwipeResponse {
        success: true,
        action: req.action,
        swipe_id: swipe_ids[0],
    })
}

/// Saved cards endpoint
///
/// GET /api/v1/saved?userId={userId}
async fn get_saved(state: web::Data<AppState>, query: web::Query<UserQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.postgres.saved_cards(&query.user_id).await {
        Ok(saved) => HttpResponse::Ok().json(SavedResponse {
            total: saved.venues.len() + saved.events.len(),
            venues: saved.venues,
            events: saved.events,
        }),
        Err(e) => {
            tracing::error!("Failed to load saved cards for {}: {}", query.user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load saved items", e)
        }
    }
}
