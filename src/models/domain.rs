use serde::{Deserialize, Serialize};

/// Integer match score in `[0, 100]`
pub type MatchScore = u8;

/// Spending level a user picked during onboarding
///
/// Anything outside the four known levels is kept verbatim and treated as
/// `any` by the scorers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetLevel {
    Budget,
    Medium,
    Premium,
    #[default]
    Any,
    Unrecognized(String),
}

impl BudgetLevel {
    /// Venue price tiers (`$` = 1 .. `$$$$` = 4) that fit this budget
    pub fn allowed_tiers(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            BudgetLevel::Budget => 1..=2,
            BudgetLevel::Medium => 2..=3,
            BudgetLevel::Premium => 3..=4,
            BudgetLevel::Any | BudgetLevel::Unrecognized(_) => 1..=4,
        }
    }

    /// Highest ticket price that still fits this budget
    pub fn price_ceiling(&self) -> f64 {
        match self {
            BudgetLevel::Budget => 20.0,
            BudgetLevel::Medium => 50.0,
            BudgetLevel::Premium => 200.0,
            BudgetLevel::Any | BudgetLevel::Unrecognized(_) => 999.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BudgetLevel::Budget => "budget",
            BudgetLevel::Medium => "medium",
            BudgetLevel::Premium => "premium",
            BudgetLevel::Any => "any",
            BudgetLevel::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for BudgetLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "budget" => BudgetLevel::Budget,
            "medium" => BudgetLevel::Medium,
            "premium" => BudgetLevel::Premium,
            "any" => BudgetLevel::Any,
            _ => BudgetLevel::Unrecognized(value),
        }
    }
}

impl From<&str> for BudgetLevel {
    fn from(value: &str) -> Self {
        BudgetLevel::from(value.to_string())
    }
}

impl From<BudgetLevel> for String {
    fn from(value: BudgetLevel) -> Self {
        match value {
            BudgetLevel::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Taste profile the feed is personalized with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub vibe_styles: Vec<String>,
    pub go_out_days: Vec<String>,
    pub budget_level: BudgetLevel,
    pub music_genres: Vec<String>,
}

impl UserPreferences {
    /// Preferences used when the caller has no stored profile
    pub fn anonymous(go_out_days: Vec<String>) -> Self {
        Self {
            go_out_days,
            ..Self::default()
        }
    }
}

/// Venue attributes the scorer reads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VenueCandidate {
    pub venue_type: String,
    pub price_level: String,
    pub rating: f64,
    pub vibe_score: f64,
    pub tags: Vec<String>,
    pub best_nights: Vec<String>,
    pub music_genres: Vec<String>,
    pub has_dance_floor: bool,
    pub has_live_music: bool,
    pub has_outdoor: bool,
}

impl VenueCandidate {
    /// Map `$`..`$$$$` onto tiers 1..4
    pub fn price_tier(&self) -> Option<u8> {
        match self.price_level.as_str() {
            "$" => Some(1),
            "$$" => Some(2),
            "$$$" => Some(3),
            "$$$$" => Some(4),
            _ => None,
        }
    }
}

/// Event attributes the scorer reads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventCandidate {
    pub event_type: String,
    pub hype_score: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub is_free: bool,
    pub day_of_week: String,
    pub genre: String,
    pub music_genres: Vec<String>,
    pub tags: Vec<String>,
    pub artists: Vec<String>,
}

/// Venue record as stored and shown on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueCard {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub attributes: VenueCandidate,
}

/// Event record as stored and shown on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub city: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub category: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub attributes: EventCandidate,
}

/// Human-readable tier for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchLabel {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredVenue {
    #[serde(flatten)]
    pub card: VenueCard,
    pub match_score: MatchScore,
    pub match_label: MatchLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEvent {
    #[serde(flatten)]
    pub card: EventCard,
    pub match_score: MatchScore,
    pub match_label: MatchLabel,
}

/// One entry of the ranked feed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cardType", rename_all = "lowercase")]
pub enum FeedCard {
    Venue(ScoredVenue),
    Event(ScoredEvent),
}

impl FeedCard {
    pub fn id(&self) -> &str {
        match self {
            FeedCard::Venue(v) => &v.card.id,
            FeedCard::Event(e) => &e.card.id,
        }
    }

    pub fn match_score(&self) -> MatchScore {
        match self {
            FeedCard::Venue(v) => v.match_score,
            FeedCard::Event(e) => e.match_score,
        }
    }

    pub fn card_type(&self) -> CardType {
        match self {
            FeedCard::Venue(_) => CardType::Venue,
            FeedCard::Event(_) => CardType::Event,
        }
    }
}

/// Which kind of card a swipe refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "card_type", rename_all = "lowercase")]
pub enum CardType {
    Venue,
    Event,
}

/// What the user did with a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "swipe_action", rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Superlike,
    #[serde(alias = "skip")]
    Pass,
}

impl SwipeAction {
    /// Likes and superlikes end up in the saved list
    pub fn is_save(&self) -> bool {
        matches!(self, SwipeAction::Like | SwipeAction::Superlike)
    }
}

/// Ids of every card a user has already swiped on
#[derive(Debug, Clone, Default)]
pub struct SwipedCards {
    pub venue_ids: std::collections::HashSet<String>,
    pub event_ids: std::collections::HashSet<String>,
}

impl SwipedCards {
    pub fn insert(&mut self, card_type: CardType, card_id: String) {
        match card_type {
            CardType::Venue => self.venue_ids.insert(card_id),
            CardType::Event => self.event_ids.insert(card_id),
        };
    }

    pub fn contains(&self, card_type: CardType, card_id: &str) -> bool {
        match card_type {
            CardType::Venue => self.venue_ids.contains(card_id),
            CardType::Event => self.event_ids.contains(card_id),
        }
    }

    pub fn len(&self) -> usize {
        self.venue_ids.len() + self.event_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stored user profile with the preferences used for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub current_city: String,
    #[serde(default)]
    pub current_country: String,
    #[serde(default)]
    pub is_visitor: bool,
    #[serde(flatten)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Partial preference update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct PreferenceChanges {
    pub vibe_styles: Option<Vec<String>>,
    pub go_out_days: Option<Vec<String>>,
    pub budget_level: Option<BudgetLevel>,
    pub music_genres: Option<Vec<String>>,
    pub current_city: Option<String>,
    pub current_country: Option<String>,
    pub is_visitor: Option<bool>,
}

/// Liked venues and events, most recent swipe first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCards {
    pub venues: Vec<SavedVenue>,
    pub events: Vec<SavedEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedVenue {
    #[serde(flatten)]
    pub card: VenueCard,
    pub swipe_action: SwipeAction,
    pub swiped_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEvent {
    #[serde(flatten)]
    pub card: EventCard,
    pub swipe_action: SwipeAction,
    pub swiped_at: chrono::DateTime<chrono::Utc>,
}
