//! Sliding-window rate limiter keyed by caller identity.

use crate::config::SecurityConfig;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-identity sliding-window rate limiter.
///
/// Each identity owns an ordered sequence of request timestamps. A request
/// is admitted while the window holds at most `max_per_window` timestamps
/// after the request's own is appended: the call that fills the window to
/// exactly `max_per_window` is admitted, and the next call inside the
/// window is the first one rejected.
///
/// Tracked identities are never evicted, so memory grows with the number of
/// distinct identities seen over the process lifetime.
pub struct RateLimiter {
    /// Width of the sliding window.
    window: Duration,
    /// Admitted requests per identity per window.
    max_per_window: usize,
    /// Timestamp sequences, one per identity. The map shards give
    /// per-identity atomicity without serializing unrelated identities.
    windows: DashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new(window: Duration, max_per_window: usize) -> Self {
        Self {
            window,
            max_per_window,
            windows: DashMap::new(),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.window_duration, config.max_per_window)
    }

    /// Records the request at `now` and decides admission in one atomic
    /// step for the given identity.
    ///
    /// The sequence is pruned of timestamps at least one window old, `now`
    /// is appended, and the request is rejected when the resulting length
    /// exceeds `max_per_window`. Bookkeeping always advances: a rejected
    /// call still leaves its timestamp in the window.
    ///
    /// The shard entry is released before this returns; callers never hold
    /// it across blocking I/O.
    pub fn check_and_record(&self, identity: &str, now: Instant) -> bool {
        let mut stamps = self.windows.entry(identity.to_string()).or_default();

        stamps.retain(|t| now.duration_since(*t) < self.window);
        stamps.push(now);

        let admitted = stamps.len() <= self.max_per_window;
        if !admitted {
            debug!(
                identity,
                in_window = stamps.len(),
                max = self.max_per_window,
                "rate window exceeded"
            );
        }
        admitted
    }

    /// Number of distinct identities with recorded state.
    pub fn tracked_identities(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: usize) -> RateLimiter {
        RateLimiter::new(Duration::from_millis(60_000), max)
    }

    #[test]
    fn test_admits_up_to_max_per_window() {
        let limiter = limiter(5);
        let now = Instant::now();

        for i in 0..5 {
            assert!(
                limiter.check_and_record("caller", now + Duration::from_millis(i)),
                "request {} should be admitted",
                i + 1
            );
        }
    }

    #[test]
    fn test_rejects_request_after_window_is_full() {
        // The boundary is deliberate: the call reaching exactly max is
        // admitted, the one after it is not.
        let limiter = limiter(5);
        let now = Instant::now();

        for i in 0..5 {
            assert!(limiter.check_and_record("caller", now + Duration::from_millis(i)));
        }
        assert!(!limiter.check_and_record("caller", now + Duration::from_millis(5)));
    }

    #[test]
    fn test_rejected_call_still_counts() {
        let limiter = limiter(1);
        let now = Instant::now();

        assert!(limiter.check_and_record("caller", now));
        assert!(!limiter.check_and_record("caller", now + Duration::from_millis(1)));
        // Still rejected: the rejected call above extended the window.
        assert!(!limiter.check_and_record("caller", now + Duration::from_millis(2)));
    }

    #[test]
    fn test_window_expiry_readmits() {
        let limiter = limiter(2);
        let start = Instant::now();

        assert!(limiter.check_and_record("caller", start));
        assert!(limiter.check_and_record("caller", start + Duration::from_millis(1)));
        assert!(!limiter.check_and_record("caller", start + Duration::from_millis(2)));

        // One full window later everything above has aged out, so a fresh
        // burst of max_per_window is admitted again.
        let later = start + Duration::from_millis(60_002);
        assert!(limiter.check_and_record("caller", later));
        assert!(limiter.check_and_record("caller", later + Duration::from_millis(1)));
        assert!(!limiter.check_and_record("caller", later + Duration::from_millis(2)));
    }

    #[test]
    fn test_timestamp_at_exact_window_age_is_pruned() {
        let limiter = limiter(1);
        let start = Instant::now();

        assert!(limiter.check_and_record("caller", start));
        // now - t == window: stale, discarded before the new append.
        assert!(limiter.check_and_record("caller", start + Duration::from_millis(60_000)));
    }

    #[test]
    fn test_identities_are_independent() {
        let limiter = limiter(1);
        let now = Instant::now();

        assert!(limiter.check_and_record("alpha", now));
        assert!(!limiter.check_and_record("alpha", now + Duration::from_millis(1)));
        assert!(limiter.check_and_record("beta", now + Duration::from_millis(1)));
    }

    #[test]
    fn test_tracked_identities_grow_without_eviction() {
        let limiter = limiter(5);
        let now = Instant::now();

        for i in 0..10 {
            limiter.check_and_record(&format!("caller-{i}"), now);
        }
        assert_eq!(limiter.tracked_identities(), 10);

        // Window expiry prunes timestamps, not identities.
        limiter.check_and_record("caller-0", now + Duration::from_millis(120_000));
        assert_eq!(limiter.tracked_identities(), 10);
    }

    #[test]
    fn test_from_config() {
        let limiter = RateLimiter::from_config(&SecurityConfig::default());
        let now = Instant::now();
        for i in 0..5 {
            assert!(limiter.check_and_record("caller", now + Duration::from_millis(i)));
        }
        assert!(!limiter.check_and_record("caller", now + Duration::from_millis(5)));
    }

    #[test]
    fn test_concurrent_identities_do_not_interfere() {
        use std::sync::Arc;

        let limiter = Arc::new(limiter(3));
        let mut handles = Vec::new();

        for id in 0..8 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let identity = format!("caller-{id}");
                let now = Instant::now();
                let mut admitted = 0;
                for i in 0..5 {
                    if limiter.check_and_record(&identity, now + Duration::from_millis(i)) {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        for handle in handles {
            // Each identity sees only its own window: exactly 3 of 5 admitted.
            assert_eq!(handle.join().unwrap(), 3);
        }
    }
}
