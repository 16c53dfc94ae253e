use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::core::FeedType;
use crate::models::domain::{BudgetLevel, CardType, PreferenceChanges, SwipeAction};

/// Query string of the feed endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "feed_type_or_all")]
    pub feed_type: FeedType,
    #[serde(default)]
    pub category: Option<String>,
}

/// An empty `type` means every card kind
fn feed_type_or_all<'de, D>(deserializer: D) -> Result<FeedType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(FeedType::All),
        Some("venues") => Ok(FeedType::Venues),
        Some("events") => Ok(FeedType::Events),
        Some(other) => Err(de::Error::unknown_variant(other, &["venues", "events", "all"])),
    }
}

/// Query string carrying only a user id
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id")]
    pub user_id: String,
}

/// Request to record a swipe
///
/// The card is named either by `cardId` plus `cardType`, or by
/// `venueCardId` and/or `eventCardId`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id")]
    pub user_id: String,
    #[serde(default, alias = "card_id")]
    pub card_id: Option<String>,
    #[serde(default, alias = "card_type")]
    pub card_type: Option<CardType>,
    #[serde(default, alias = "venue_card_id", skip_serializing_if = "Option::is_none")]
    pub venue_card_id: Option<String>,
    #[serde(default, alias = "event_card_id", skip_serializing_if = "Option::is_none")]
    pub event_card_id: Option<String>,
    pub action: SwipeAction,
}

impl SwipeRequest {
    /// Cards this swipe applies to; empty when no card id was given
    pub fn targets(&self) -> Vec<(CardType, &str)> {
        if let (Some(card_type), Some(card_id)) = (self.card_type, non_empty(&self.card_id)) {
            return vec![(card_type, card_id)];
        }

        let mut targets = Vec::with_capacity(2);
        if let Some(id) = non_empty(&self.venue_card_id) {
            targets.push((CardType::Venue, id));
        }
        if let Some(id) = non_empty(&self.event_card_id) {
            targets.push((CardType::Event, id));
        }
        targets
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Request to update stored preferences; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id")]
    pub user_id: String,
    #[serde(default)]
    pub vibe_styles: Option<Vec<String>>,
    #[serde(default)]
    pub go_out_days: Option<Vec<String>>,
    #[serde(default)]
    pub budget_level: Option<BudgetLevel>,
    #[serde(default)]
    pub music_genres: Option<Vec<String>>,
    #[serde(default)]
    pub current_city: Option<String>,
    #[serde(default)]
    pub current_country: Option<String>,
    #[serde(default)]
    pub is_visitor: Option<bool>,
}

impl UpdatePreferencesRequest {
    pub fn changes(&self) -> PreferenceChanges {
        PreferenceChanges {
            vibe_styles: self.vibe_styles.clone(),
            go_out_days: self.go_out_days.clone(),
            budget_level: self.budget_level.clone(),
            music_genres: self.music_genres.clone(),
            current_city: self.current_city.clone(),
            current_country: self.current_country.clone(),
            is_visitor: self.is_visitor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web;

    #[test]
    fn test_feed_query_empty_type_means_all() {
        let query = web::Query::<FeedQuery>::from_query("city=Berlin&type=").unwrap();
        assert_eq!(query.feed_type, FeedType::All);

        let query = web::Query::<FeedQuery>::from_query("city=Berlin").unwrap();
        assert_eq!(query.feed_type, FeedType::All);

        let query = web::Query::<FeedQuery>::from_query("type=events").unwrap();
        assert_eq!(query.feed_type, FeedType::Events);

        assert!(web::Query::<FeedQuery>::from_query("type=parties").is_err());
    }

    #[test]
    fn test_swipe_targets_card_id_and_type() {
        let req: SwipeRequest = serde_json::from_str(
            r#"{"userId": "user_1", "cardId": "venue_1", "cardType": "venue", "action": "like"}"#,
        )
        .unwrap();

        assert_eq!(req.targets(), vec![(CardType::Venue, "venue_1")]);
    }

    #[test]
    fn test_swipe_targets_venue_and_event_ids() {
        let req: SwipeRequest = serde_json::from_str(
            r#"{"userId": "user_1", "venueCardId": "v1", "eventCardId": "e1", "action": "superlike"}"#,
        )
        .unwrap();

        assert_eq!(
            req.targets(),
            vec![(CardType::Venue, "v1"), (CardType::Event, "e1")]
        );
        assert_eq!(req.action, SwipeAction::Superlike);
    }

    #[test]
    fn test_swipe_without_card_has_no_targets() {
        let req: SwipeRequest =
            serde_json::from_str(r#"{"userId": "user_1", "venueCardId": "", "action": "pass"}"#).unwrap();

        assert!(req.targets().is_empty());
    }
}
