//! VibeSwipe - personalized venue and event feed service
//!
//! This library provides the match scoring used to rank venue and event
//! cards against a user's taste profile, the feed assembly built on it, and
//! the HTTP service around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{
    event_match_label, score_event, score_venue, venue_match_label, FeedBuilder, Scorer,
    TagMatching,
};
pub use models::{EventCandidate, MatchScore, UserPreferences, VenueCandidate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let score = score_venue(&VenueCandidate::default(), &UserPreferences::default());
        // neutral vibe, nights and genres, budget fits, no rating
        assert_eq!(score, 20 + 10 + 15 + 7);
        assert_eq!(venue_match_label(score).label, "Worth Trying");
    }
}
