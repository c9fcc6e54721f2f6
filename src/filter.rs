//! Device in-scope filtering by ignore/accept patterns.

use regex::Regex;
use thiserror::Error;

/// Error constructing a [`DeviceFilter`]
///
/// Invalid pattern syntax is a configuration error and is surfaced at
/// startup, never at query time.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid ignore pattern: {0}")]
    IgnorePattern(regex::Error),

    #[error("invalid accept pattern: {0}")]
    AcceptPattern(regex::Error),
}

/// Decides whether a named interface is in scope.
///
/// A name is ignored if it matches the ignore pattern, or if an accept
/// pattern is configured and the name does not match it. With neither
/// pattern configured, nothing is ignored.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    ignore_pattern: Option<Regex>,
    accept_pattern: Option<Regex>,
}

impl DeviceFilter {
    /// Build a filter from optional patterns. Empty strings count as unset.
    pub fn new(ignore: Option<&str>, accept: Option<&str>) -> Result<Self, FilterError> {
        let ignore_pattern = match ignore.filter(|p| !p.is_empty()) {
            Some(p) => Some(Regex::new(p).map_err(FilterError::IgnorePattern)?),
            None => None,
        };
        let accept_pattern = match accept.filter(|p| !p.is_empty()) {
            Some(p) => Some(Regex::new(p).map_err(FilterError::AcceptPattern)?),
            None => None,
        };
        Ok(Self {
            ignore_pattern,
            accept_pattern,
        })
    }

    /// Whether the device should be excluded from sampling.
    #[must_use]
    pub fn ignored(&self, name: &str) -> bool {
        self.ignore_pattern
            .as_ref()
            .is_some_and(|p| p.is_match(name))
            || self
                .accept_pattern
                .as_ref()
                .is_some_and(|p| !p.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_patterns_ignores_nothing() {
        let filter = DeviceFilter::new(None, None).unwrap();
        assert!(!filter.ignored("eth0"));
        assert!(!filter.ignored("lo"));
    }

    #[test]
    fn test_empty_patterns_count_as_unset() {
        let filter = DeviceFilter::new(Some(""), Some("")).unwrap();
        assert!(!filter.ignored("wlan0"));
    }

    #[test]
    fn test_ignore_pattern_excludes_matches() {
        let filter = DeviceFilter::new(Some("^(lo|docker.*)$"), None).unwrap();
        assert!(filter.ignored("lo"));
        assert!(filter.ignored("docker0"));
        assert!(!filter.ignored("eth0"));
    }

    #[test]
    fn test_accept_pattern_excludes_non_matches() {
        let filter = DeviceFilter::new(None, Some("^wlan0$")).unwrap();
        assert!(!filter.ignored("wlan0"));
        assert!(filter.ignored("eth0"));
        assert!(filter.ignored("wlan01"));
    }

    #[test]
    fn test_ignore_wins_over_accept() {
        let filter = DeviceFilter::new(Some("^wlan0$"), Some("^wlan0$")).unwrap();
        assert!(filter.ignored("wlan0"));
    }

    #[test]
    fn test_invalid_pattern_fails_at_construction() {
        assert!(DeviceFilter::new(Some("["), None).is_err());
        assert!(DeviceFilter::new(None, Some("(unclosed")).is_err());
    }
}
