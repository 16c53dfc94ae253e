use crate::core::overlap::TagMatching;
use crate::models::{EventCandidate, MatchScore, UserPreferences, VenueCandidate};

// Venue weights; the neutral values are used when either side has no data.
pub const VENUE_VIBE_WEIGHT: f64 = 40.0;
pub const VENUE_VIBE_NEUTRAL: f64 = 20.0;
pub const VENUE_NIGHT_WEIGHT: f64 = 20.0;
pub const VENUE_NIGHT_NEUTRAL: f64 = 10.0;
pub const VENUE_BUDGET_WEIGHT: f64 = 15.0;
pub const VENUE_BUDGET_MISS: f64 = 5.0;
pub const VENUE_GENRE_WEIGHT: f64 = 15.0;
pub const VENUE_GENRE_NEUTRAL: f64 = 7.0;
pub const VENUE_RATING_WEIGHT: f64 = 10.0;

// Event weights
pub const EVENT_GENRE_WEIGHT: f64 = 30.0;
pub const EVENT_GENRE_NEUTRAL: f64 = 15.0;
pub const EVENT_DAY_WEIGHT: f64 = 20.0;
pub const EVENT_DAY_NEUTRAL: f64 = 10.0;
pub const EVENT_VIBE_WEIGHT: f64 = 20.0;
pub const EVENT_VIBE_NEUTRAL: f64 = 10.0;
pub const EVENT_BUDGET_WEIGHT: f64 = 15.0;
pub const EVENT_BUDGET_PARTIAL: f64 = 8.0;
pub const EVENT_HYPE_WEIGHT: f64 = 15.0;

const MAX_RATING: f64 = 5.0;
const MAX_HYPE: f64 = 100.0;

/// Scores venues and events against a user's preferences
///
/// Both formulas are a weighted sum whose weights add up to 100, so the
/// raw sum is already on the 0-100 scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    matching: TagMatching,
}

impl Scorer {
    pub fn new(matching: TagMatching) -> Self {
        Self { matching }
    }

    pub fn matching(&self) -> TagMatching {
        self.matching
    }

    /// Score a venue (0-100)
    ///
    /// Scoring formula:
    /// score = (
    ///     vibe_overlap   * 40 +    # prefs.vibe_styles vs venue.tags, neutral 20
    ///     night_overlap  * 20 +    # prefs.go_out_days vs venue.best_nights, neutral 10
    ///     budget_fit          +    # 15 when the price tier fits, otherwise 5
    ///     genre_overlap  * 15 +    # prefs.music_genres vs venue.music_genres, neutral 7
    ///     rating / 5     * 10
    /// )
    pub fn score_venue(&self, venue: &VenueCandidate, prefs: &UserPreferences) -> MatchScore {
        let vibe = self.overlap_points(
            &prefs.vibe_styles,
            &venue.tags,
            VENUE_VIBE_WEIGHT,
            VENUE_VIBE_NEUTRAL,
        );

        let nights = self.overlap_points(
            &prefs.go_out_days,
            &venue.best_nights,
            VENUE_NIGHT_WEIGHT,
            VENUE_NIGHT_NEUTRAL,
        );

        // Unknown price levels fit every budget
        let budget = match venue.price_tier() {
            Some(tier) if !prefs.budget_level.allowed_tiers().contains(&tier) => VENUE_BUDGET_MISS,
            _ => VENUE_BUDGET_WEIGHT,
        };

        let genres = self.overlap_points(
            &prefs.music_genres,
            &venue.music_genres,
            VENUE_GENRE_WEIGHT,
            VENUE_GENRE_NEUTRAL,
        );

        let rating = capped_bonus(venue.rating, MAX_RATING, VENUE_RATING_WEIGHT);

        to_match_score(vibe + nights + budget + genres + rating)
    }

    /// Score an event (0-100)
    ///
    /// Scoring formula:
    /// score = (
    ///     genre_overlap  * 30 +    # neutral 15 when either side is empty
    ///     day_match           +    # 20 on a preferred day, 0 otherwise, 10 without days
    ///     vibe_overlap   * 20 +    # neutral 10 only when the user has no vibes
    ///     budget_fit          +    # 15 free or under ceiling, 8 partially, else 0
    ///     hype / 100     * 15
    /// )
    pub fn score_event(&self, event: &EventCandidate, prefs: &UserPreferences) -> MatchScore {
        let genres = self.overlap_points(
            &prefs.music_genres,
            &event.music_genres,
            EVENT_GENRE_WEIGHT,
            EVENT_GENRE_NEUTRAL,
        );

        let day = if prefs.go_out_days.is_empty() {
            EVENT_DAY_NEUTRAL
        } else if self.matching.contains(&prefs.go_out_days, &event.day_of_week) {
            EVENT_DAY_WEIGHT
        } else {
            0.0
        };

        let vibe = if prefs.vibe_styles.is_empty() {
            EVENT_VIBE_NEUTRAL
        } else {
            self.matching.overlap_ratio(&prefs.vibe_styles, &event.tags) * EVENT_VIBE_WEIGHT
        };

        let budget = event_budget_points(event, prefs);

        let hype = capped_bonus(event.hype_score, MAX_HYPE, EVENT_HYPE_WEIGHT);

        to_match_score(genres + day + vibe + budget + hype)
    }

    #[inline]
    fn overlap_points(&self, wanted: &[String], offered: &[String], weight: f64, neutral: f64) -> f64 {
        if wanted.is_empty() || offered.is_empty() {
            return neutral;
        }
        (self.matching.overlap_ratio(wanted, offered) * weight).min(weight)
    }
}

#[inline]
fn event_budget_points(event: &EventCandidate, prefs: &UserPreferences) -> f64 {
    if event.is_free {
        return EVENT_BUDGET_WEIGHT;
    }

    let ceiling = prefs.budget_level.price_ceiling();
    if event.price_max <= ceiling {
        EVENT_BUDGET_WEIGHT
    } else if event.price_min <= ceiling {
        EVENT_BUDGET_PARTIAL
    } else {
        0.0
    }
}

/// Proportional bonus capped at `weight`; non-finite values earn nothing
#[inline]
fn capped_bonus(value: f64, max: f64, weight: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value / max * weight).min(weight)
}

#[inline]
fn to_match_score(raw: f64) -> MatchScore {
    raw.round().clamp(0.0, 100.0) as MatchScore
}

/// Score a venue with exact tag matching
pub fn score_venue(venue: &VenueCandidate, prefs: &UserPreferences) -> MatchScore {
    Scorer::default().score_venue(venue, prefs)
}

/// Score an event with exact tag matching
pub fn score_event(event: &EventCandidate, prefs: &UserPreferences) -> MatchScore {
    Scorer::default().score_event(event, prefs)
}
