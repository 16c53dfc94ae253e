// Core algorithm exports
pub mod feed;
pub mod labels;
pub mod overlap;
pub mod scoring;

pub use feed::{Feed, FeedBuilder, FeedOptions, FeedType};
pub use labels::{event_match_label, venue_match_label};
pub use overlap::TagMatching;
pub use scoring::{score_event, score_venue, Scorer};
