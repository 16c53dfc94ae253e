use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashSet;

/// How preference tags are compared with candidate tags
///
/// `Exact` compares raw strings, so `"Techno"` and `"techno"` do not match.
/// `Normalized` trims and lowercases both sides before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatching {
    #[default]
    Exact,
    Normalized,
}

impl TagMatching {
    #[inline]
    fn key<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            TagMatching::Exact => Cow::Borrowed(value),
            TagMatching::Normalized => Cow::Owned(value.trim().to_lowercase()),
        }
    }

    /// Count distinct wanted values present in `offered`
    ///
    /// Returns `(matched, distinct_wanted)`.
    pub fn overlap(&self, wanted: &[String], offered: &[String]) -> (usize, usize) {
        let offered: HashSet<Cow<'_, str>> = offered.iter().map(|v| self.key(v)).collect();
        let wanted: HashSet<Cow<'_, str>> = wanted.iter().map(|v| self.key(v)).collect();

        let matched = wanted.iter().filter(|v| offered.contains(*v)).count();
        (matched, wanted.len())
    }

    /// Share of `wanted` covered by `offered`, in `[0, 1]`
    pub fn overlap_ratio(&self, wanted: &[String], offered: &[String]) -> f64 {
        let (matched, total) = self.overlap(wanted, offered);
        if total == 0 {
            return 0.0;
        }
        matched as f64 / total as f64
    }

    pub fn contains(&self, haystack: &[String], needle: &str) -> bool {
        let needle = self.key(needle);
        haystack.iter().any(|v| self.key(v) == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_exact_overlap() {
        let (matched, total) = TagMatching::Exact.overlap(
            &tags(&["techno", "underground"]),
            &tags(&["techno", "dance"]),
        );
        assert_eq!((matched, total), (1, 2));
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let ratio = TagMatching::Exact.overlap_ratio(&tags(&["Techno"]), &tags(&["techno"]));
        assert_eq!(ratio, 0.0);
    }

    #[test]
    fn test_normalized_ignores_case_and_whitespace() {
        let ratio = TagMatching::Normalized.overlap_ratio(&tags(&[" Techno"]), &tags(&["techno "]));
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let (matched, total) = TagMatching::Exact.overlap(
            &tags(&["house", "house", "jazz"]),
            &tags(&["house", "house"]),
        );
        assert_eq!((matched, total), (1, 2));
    }

    #[test]
    fn test_empty_wanted() {
        assert_eq!(TagMatching::Exact.overlap_ratio(&[], &tags(&["a"])), 0.0);
    }

    #[test]
    fn test_contains() {
        let days = tags(&["friday", "saturday"]);
        assert!(TagMatching::Exact.contains(&days, "friday"));
        assert!(!TagMatching::Exact.contains(&days, "Friday"));
        assert!(TagMatching::Normalized.contains(&days, "Friday"));
    }
}
