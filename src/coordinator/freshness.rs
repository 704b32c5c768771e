//! Freshness gate suppressing redundant refetches.
//!
//! Several dashboard sections poll the same resources independently; the
//! gate is the sole throttle that keeps them from stacking duplicate
//! network calls within the window. The timestamp itself is stamped by the
//! coordinator only after a successful store, so a failed fetch never
//! extends freshness.

use std::time::{Duration, Instant};

/// Minimum interval before a non-forced refetch of a resource is allowed.
pub const FRESHNESS_WINDOW: Duration = Duration::from_millis(5000);

/// Pure read: true if the fetch is forced, the resource has never been
/// fetched successfully, or the window has elapsed.
pub fn should_fetch(last_fetch: Option<Instant>, force: bool) -> bool {
    should_fetch_at(last_fetch, force, Instant::now(), FRESHNESS_WINDOW)
}

fn should_fetch_at(
    last_fetch: Option<Instant>,
    force: bool,
    now: Instant,
    window: Duration,
) -> bool {
    if force {
        return true;
    }
    match last_fetch {
        None => true,
        Some(last) => now.duration_since(last) >= window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prior_fetch_allows() {
        let now = Instant::now();
        assert!(should_fetch_at(None, false, now, FRESHNESS_WINDOW));
    }

    #[test]
    fn test_recent_fetch_suppresses() {
        let now = Instant::now();
        let last = now - Duration::from_millis(1000);
        assert!(!should_fetch_at(Some(last), false, now, FRESHNESS_WINDOW));
    }

    #[test]
    fn test_force_bypasses_window() {
        let now = Instant::now();
        let last = now - Duration::from_millis(1);
        assert!(should_fetch_at(Some(last), true, now, FRESHNESS_WINDOW));
    }

    #[test]
    fn test_elapsed_window_allows() {
        let now = Instant::now();
        let last = now - FRESHNESS_WINDOW;
        assert!(should_fetch_at(Some(last), false, now, FRESHNESS_WINDOW));

        let just_inside = now - (FRESHNESS_WINDOW - Duration::from_millis(1));
        assert!(!should_fetch_at(
            Some(just_inside),
            false,
            now,
            FRESHNESS_WINDOW
        ));
    }
}
