// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetLevel, CardType, EventCandidate, EventCard, FeedCard, MatchLabel, MatchScore,
    PreferenceChanges, Profile, SavedCards, SavedEvent, SavedVenue, ScoredEvent, ScoredVenue,
    SwipeAction, SwipedCards, UserPreferences, VenueCandidate, VenueCard,
};
pub use requests::{FeedQuery, SwipeRequest, UpdatePreferencesRequest, UserQuery};
pub use responses::{ErrorResponse, FeedResponse, HealthResponse, ProfileResponse, SavedResponse, SwipeResponse};
