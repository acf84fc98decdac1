use crate::models::{GeoPoint, GeolocationResult};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Options for a position request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix that may be reused; zero always asks for a fresh one
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(5),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Something that can work out where the user is
pub trait Geolocator {
    fn locate(&self, high_accuracy: bool) -> impl Future<Output = GeolocationResult> + Send;
}

/// A geolocator backed by a fixed, configured point
///
/// With no point configured every request is denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredGeolocator {
    point: Option<GeoPoint>,
}

impl ConfiguredGeolocator {
    pub fn new(point: Option<GeoPoint>) -> Self {
        Self { point }
    }
}

impl Geolocator for ConfiguredGeolocator {
    async fn locate(&self, _high_accuracy: bool) -> GeolocationResult {
        match self.point {
            Some(point) => GeolocationResult::Resolved(point),
            None => GeolocationResult::Denied,
        }
    }
}

/// One-shot position requests with a timeout and an optional fix cache
pub struct Geolocation<G> {
    geolocator: G,
    options: GeolocationOptions,
    last_fix: Mutex<Option<(Instant, GeoPoint)>>,
}

impl<G: Geolocator> Geolocation<G> {
    pub fn new(geolocator: G, options: GeolocationOptions) -> Self {
        Self {
            geolocator,
            options,
            last_fix: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &GeolocationOptions {
        &self.options
    }

    /// Ask for the current position
    ///
    /// A request that outlives `timeout` settles as `TimedOut`. Failures are
    /// never retried.
    pub async fn current_position(&self) -> GeolocationResult {
        if let Some(point) = self.cached_fix().await {
            tracing::debug!("Reusing cached position fix");
            return GeolocationResult::Resolved(point);
        }

        let request = self.geolocator.locate(self.options.enable_high_accuracy);
        let result = match tokio::time::timeout(self.options.timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Geolocation timed out after {:?}", self.options.timeout);
                GeolocationResult::TimedOut
            }
        };

        if let GeolocationResult::Resolved(point) = result {
            *self.last_fix.lock().await = Some((Instant::now(), point));
        }

        result
    }

    async fn cached_fix(&self) -> Option<GeoPoint> {
        if self.options.maximum_age.is_zero() {
            return None;
        }
        let last_fix = *self.last_fix.lock().await;
        last_fix
            .filter(|(at, _)| at.elapsed() <= self.options.maximum_age)
            .map(|(_, point)| point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SlowGeolocator;

    impl Geolocator for SlowGeolocator {
        async fn locate(&self, _high_accuracy: bool) -> GeolocationResult {
            tokio::time::sleep(Duration::from_secs(30)).await;
            GeolocationResult::Unavailable
        }
    }

    struct CountingGeolocator {
        calls: AtomicUsize,
    }

    impl Geolocator for CountingGeolocator {
        async fn locate(&self, _high_accuracy: bool) -> GeolocationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            GeolocationResult::Resolved(GeoPoint { latitude: 1.0, longitude: 1.0 })
        }
    }

    fn options(maximum_age: Duration) -> GeolocationOptions {
        GeolocationOptions {
            enable_high_accuracy: true,
            timeout: Duration::from_millis(50),
            maximum_age,
        }
    }

    #[tokio::test]
    async fn test_configured_point_resolves() {
        let point = GeoPoint { latitude: 10.0, longitude: 20.0 };
        let geolocation = Geolocation::new(ConfiguredGeolocator::new(Some(point)), GeolocationOptions::default());
        assert_eq!(geolocation.current_position().await, GeolocationResult::Resolved(point));
    }

    #[tokio::test]
    async fn test_missing_point_is_denied() {
        let geolocation = Geolocation::new(ConfiguredGeolocator::default(), GeolocationOptions::default());
        assert_eq!(geolocation.current_position().await, GeolocationResult::Denied);
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let geolocation = Geolocation::new(SlowGeolocator, options(Duration::ZERO));
        assert_eq!(geolocation.current_position().await, GeolocationResult::TimedOut);
    }

    #[tokio::test]
    async fn test_zero_maximum_age_always_asks() {
        let geolocation = Geolocation::new(CountingGeolocator { calls: AtomicUsize::new(0) }, options(Duration::ZERO));
        geolocation.current_position().await;
        geolocation.current_position().await;
        assert_eq!(geolocation.geolocator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_maximum_age_reuses_fix() {
        let geolocation = Geolocation::new(
            CountingGeolocator { calls: AtomicUsize::new(0) },
            options(Duration::from_secs(60)),
        );
        geolocation.current_position().await;
        geolocation.current_position().await;
        assert_eq!(geolocation.geolocator.calls.load(Ordering::SeqCst), 1);
    }
}
