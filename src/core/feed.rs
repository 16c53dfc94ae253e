use serde::{Deserialize, Serialize};

use crate::core::labels::{event_match_label, venue_match_label};
use crate::core::scoring::Scorer;
use crate::models::{
    CardType, EventCard, FeedCard, ScoredEvent, ScoredVenue, SwipedCards, UserPreferences,
    VenueCard,
};

/// Which card kinds a feed request wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Venues,
    Events,
    #[default]
    All,
}

impl FeedType {
    pub fn includes_venues(&self) -> bool {
        matches!(self, FeedType::Venues | FeedType::All)
    }

    pub fn includes_events(&self) -> bool {
        matches!(self, FeedType::Events | FeedType::All)
    }
}

/// Per-request feed filters
#[derive(Debug, Clone, Default)]
pub struct FeedOptions {
    pub feed_type: FeedType,
    /// Only keep events in this category; venues are unaffected
    pub category: Option<String>,
}

/// Result of assembling a feed
#[derive(Debug)]
pub struct Feed {
    /// Venues and events merged by descending match score
    pub feed: Vec<FeedCard>,
    /// Scored venues in fetch order
    pub venues: Vec<ScoredVenue>,
    /// Scored events in fetch order
    pub events: Vec<ScoredEvent>,
    pub total_candidates: usize,
}

/// Feed orchestrator
///
/// # Pipeline Stages
/// 1. Drop cards the user already swiped on
/// 2. Apply feed type and category filters
/// 3. Score each remaining card
/// 4. Merge venues and events by descending score
#[derive(Debug, Clone, Default)]
pub struct FeedBuilder {
    scorer: Scorer,
    max_results: Option<usize>,
}

impl FeedBuilder {
    pub fn new(scorer: Scorer, max_results: Option<usize>) -> Self {
        Self { scorer, max_results }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Build a ranked feed from candidate cards
    ///
    /// # Arguments
    /// * `preferences` - The user's taste profile
    /// * `venues` - Venue candidates in the order the store returned them
    /// * `events` - Event candidates in the order the store returned them
    /// * `swiped` - Cards the user has already swiped on
    /// * `options` - Feed type and category filters
    ///
    /// Equal scores keep fetch order, venues ahead of events.
    pub fn build(
        &self,
        preferences: &UserPreferences,
        venues: Vec<VenueCard>,
        events: Vec<EventCard>,
        swiped: &SwipedCards,
        options: &FeedOptions,
    ) -> Feed {
        let total_candidates = venues.len() + events.len();

        let venues: Vec<ScoredVenue> = if options.feed_type.includes_venues() {
            venues
                .into_iter()
                .filter(|venue| !swiped.contains(CardType::Venue, &venue.id))
                .map(|card| {
                    let match_score = self.scorer.score_venue(&card.attributes, preferences);
                    ScoredVenue {
                        card,
                        match_score,
                        match_label: venue_match_label(match_score),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let category = options.category.as_deref().filter(|c| !c.is_empty());
        let events: Vec<ScoredEvent> = if options.feed_type.includes_events() {
            events
                .into_iter()
                .filter(|event| !swiped.contains(CardType::Event, &event.id))
                .filter(|event| category.map_or(true, |c| event.category == c))
                .map(|card| {
                    let match_score = self.scorer.score_event(&card.attributes, preferences);
                    ScoredEvent {
                        card,
                        match_score,
                        match_label: event_match_label(match_score),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut feed: Vec<FeedCard> = venues
            .iter()
            .cloned()
            .map(FeedCard::Venue)
            .chain(events.iter().cloned().map(FeedCard::Event))
            .collect();

        // sort_by is stable, so ties stay in fetch order
        feed.sort_by(|a, b| b.match_score().cmp(&a.match_score()));

        if let Some(max) = self.max_results {
            feed.truncate(max);
        }

        tracing::debug!(
            "Assembled feed of {} cards ({} venues, {} events) from {} candidates",
            feed.len(),
            venues.len(),
            events.len(),
            total_candidates
        );

        Feed {
            feed,
            venues,
            events,
            total_candidates,
        }
    }
}
