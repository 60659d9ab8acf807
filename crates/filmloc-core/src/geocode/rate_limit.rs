// crates/filmloc-core/src/geocode/rate_limit.rs
use super::Place;
use crate::error::Result;
use crate::traits::Geocoder;
use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Spaces out calls to the wrapped geocoder and retries failed ones.
///
/// Every call starts at least `min_delay` after the previous one started.
/// A call that returns `Err` is retried up to `max_retries` times, sleeping
/// `error_wait` before each retry; the last error is returned as-is.
/// `Ok(None)` is a valid answer and is never retried.
#[derive(Debug)]
pub struct RateLimited<G> {
    inner: G,
    min_delay: Duration,
    max_retries: u32,
    error_wait: Duration,
    last_call: Cell<Option<Instant>>,
}

impl<G> RateLimited<G> {
    /// Public Nominatim instances allow one request per second; stay well below.
    pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(3);
    pub const DEFAULT_MAX_RETRIES: u32 = 2;
    pub const DEFAULT_ERROR_WAIT: Duration = Duration::from_secs(5);

    pub fn new(inner: G, min_delay: Duration) -> Self {
        Self {
            inner,
            min_delay,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            error_wait: Self::DEFAULT_ERROR_WAIT,
            last_call: Cell::new(None),
        }
    }

    pub fn with_retries(mut self, max_retries: u32, error_wait: Duration) -> Self {
        self.max_retries = max_retries;
        self.error_wait = error_wait;
        self
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    fn wait_turn(&self) {
        if let Some(last) = self.last_call.get() {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                thread::sleep(self.min_delay - elapsed);
            }
        }
        self.last_call.set(Some(Instant::now()));
    }
}

impl<G: Geocoder> Geocoder for RateLimited<G> {
    fn geocode(&self, query: &str) -> Result<Option<Place>> {
        let mut retries = 0;
        loop {
            self.wait_turn();
            match self.inner.geocode(query) {
                Err(e) if retries < self.max_retries => {
                    retries += 1;
                    log::warn!(
                        "geocoding {query:?} failed ({e}), retry {retries}/{} in {:?}",
                        self.max_retries,
                        self.error_wait
                    );
                    thread::sleep(self.error_wait);
                }
                answer => return answer,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;
    use crate::geo::GeoPoint;
    use std::cell::RefCell;

    /// Fails the first `failures` calls, then answers; records call times.
    struct Flaky {
        failures: Cell<u32>,
        calls: RefCell<Vec<Instant>>,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures: Cell::new(failures),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Geocoder for Flaky {
        fn geocode(&self, _query: &str) -> Result<Option<Place>> {
            self.calls.borrow_mut().push(Instant::now());
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(GeoError::InvalidData("service unavailable".into()));
            }
            Ok(Some(Place::new(GeoPoint::new(1.0, 2.0)?)))
        }
    }

    #[test]
    fn consecutive_calls_are_spaced() {
        let delay = Duration::from_millis(40);
        let geocoder = RateLimited::new(Flaky::new(0), delay);
        for _ in 0..3 {
            geocoder.geocode("x").unwrap();
        }
        let calls = geocoder.inner().calls.borrow();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            // Call times are taken inside the inner geocoder, a hair after the gate.
            assert!(pair[1] - pair[0] + Duration::from_millis(1) >= delay);
        }
    }

    #[test]
    fn first_call_does_not_wait() {
        let geocoder = RateLimited::new(Flaky::new(0), Duration::from_secs(60));
        let start = Instant::now();
        geocoder.geocode("x").unwrap();
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn errors_are_retried() {
        let geocoder = RateLimited::new(Flaky::new(2), Duration::ZERO)
            .with_retries(2, Duration::from_millis(1));
        let place = geocoder.geocode("x").unwrap();
        assert!(place.is_some());
        assert_eq!(geocoder.inner().calls.borrow().len(), 3);
    }

    #[test]
    fn last_error_is_returned_when_retries_run_out() {
        let geocoder = RateLimited::new(Flaky::new(5), Duration::ZERO)
            .with_retries(1, Duration::from_millis(1));
        assert!(geocoder.geocode("x").is_err());
        assert_eq!(geocoder.into_inner().calls.into_inner().len(), 2);
    }
}
