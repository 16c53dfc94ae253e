use crate::models::{MatchLabel, MatchScore};

const VENUE_LABELS: [(MatchScore, MatchLabel); 3] = [
    (85, MatchLabel { label: "Perfect Match", color: "emerald" }),
    (70, MatchLabel { label: "Great Fit", color: "violet" }),
    (50, MatchLabel { label: "Worth Trying", color: "amber" }),
];
const VENUE_FALLBACK: MatchLabel = MatchLabel { label: "Explore", color: "slate" };

const EVENT_LABELS: [(MatchScore, MatchLabel); 3] = [
    (85, MatchLabel { label: "Must Go", color: "rose" }),
    (70, MatchLabel { label: "Hot Pick", color: "violet" }),
    (50, MatchLabel { label: "Check It Out", color: "amber" }),
];
const EVENT_FALLBACK: MatchLabel = MatchLabel { label: "Discover", color: "slate" };

/// Label shown on a venue card for its match score
pub fn venue_match_label(score: MatchScore) -> MatchLabel {
    lookup(&VENUE_LABELS, VENUE_FALLBACK, score)
}

/// Label shown on an event card for its match score
pub fn event_match_label(score: MatchScore) -> MatchLabel {
    lookup(&EVENT_LABELS, EVENT_FALLBACK, score)
}

#[inline]
fn lookup(table: &[(MatchScore, MatchLabel)], fallback: MatchLabel, score: MatchScore) -> MatchLabel {
    table
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_label_boundaries() {
        assert_eq!(venue_match_label(100).label, "Perfect Match");
        assert_eq!(venue_match_label(85).label, "Perfect Match");
        assert_eq!(venue_match_label(84).label, "Great Fit");
        assert_eq!(venue_match_label(70).color, "violet");
        assert_eq!(venue_match_label(69).label, "Worth Trying");
        assert_eq!(venue_match_label(50).color, "amber");
        assert_eq!(venue_match_label(49).label, "Explore");
        assert_eq!(venue_match_label(0).color, "slate");
    }

    #[test]
    fn test_event_label_boundaries() {
        assert_eq!(event_match_label(85).label, "Must Go");
        assert_eq!(event_match_label(85).color, "rose");
        assert_eq!(event_match_label(84).label, "Hot Pick");
        assert_eq!(event_match_label(50).label, "Check It Out");
        assert_eq!(event_match_label(49).label, "Discover");
    }
}
