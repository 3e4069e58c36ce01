//! Geolocation flow: host position, then reverse geocoding to a country name.
//!
//! Every failure here is logged and swallowed; the caller just gets no default
//! country.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::{model::Coordinates, position::PositionSource, provider::ReverseGeocoder};

#[derive(Debug, Clone)]
pub struct Locator {
    position: Arc<dyn PositionSource>,
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl Locator {
    pub fn new(position: Arc<dyn PositionSource>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { position, geocoder }
    }

    pub async fn locate(&self) -> Option<Coordinates> {
        match self.position.current_position().await {
            Ok(coords) => {
                debug!(%coords, "obtained current position");
                Some(coords)
            }
            Err(err) => {
                warn!(error = %err, "error getting location");
                None
            }
        }
    }

    pub async fn reverse_geocode(&self, coords: Coordinates) -> Option<String> {
        match self.geocoder.country_at(coords).await {
            Ok(Some(country)) => {
                debug!(%coords, %country, "resolved position to country");
                Some(country)
            }
            Ok(None) => {
                warn!(%coords, "location data has no country");
                None
            }
            Err(err) => {
                warn!(%coords, error = ?err, "error fetching location data");
                None
            }
        }
    }

    /// Country the user is currently in, if it can be determined.
    pub async fn default_country(&self) -> Option<String> {
        let coords = self.locate().await?;
        self.reverse_geocode(coords).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{LookupError, Result as LookupResult},
        position::{Denied, FixedPosition, Unsupported},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    enum Answer {
        Country(&'static str),
        NoCountry,
        Fail,
    }

    #[derive(Debug)]
    struct FakeGeocoder {
        answer: Answer,
        calls: AtomicUsize,
    }

    impl FakeGeocoder {
        fn new(answer: Answer) -> Arc<Self> {
            Arc::new(Self { answer, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl ReverseGeocoder for FakeGeocoder {
        async fn country_at(&self, _coords: Coordinates) -> anyhow::Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Answer::Country(c) => Ok(Some(c.to_string())),
                Answer::NoCountry => Ok(None),
                Answer::Fail => Err(anyhow::anyhow!("connection reset")),
            }
        }
    }

    #[derive(Debug)]
    struct Broken;

    #[async_trait]
    impl PositionSource for Broken {
        async fn current_position(&self) -> LookupResult<Coordinates> {
            Err(LookupError::UpstreamError(anyhow::anyhow!("position timeout")))
        }
    }

    fn paris() -> Arc<dyn PositionSource> {
        Arc::new(FixedPosition(Coordinates::new(48.8566, 2.3522)))
    }

    #[tokio::test]
    async fn default_country_from_position() {
        let geocoder = FakeGeocoder::new(Answer::Country("France"));
        let locator = Locator::new(paris(), geocoder.clone());

        assert_eq!(locator.default_country().await.as_deref(), Some("France"));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unavailable_position_skips_geocoder() {
        let sources: Vec<Arc<dyn PositionSource>> =
            vec![Arc::new(Unsupported), Arc::new(Denied), Arc::new(Broken)];

        for position in sources {
            let geocoder = FakeGeocoder::new(Answer::Country("France"));
            let locator = Locator::new(position, geocoder.clone());

            assert!(locator.default_country().await.is_none());
            assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn geocoder_failures_yield_none() {
        for answer in [Answer::NoCountry, Answer::Fail] {
            let locator = Locator::new(paris(), FakeGeocoder::new(answer));
            assert!(locator.default_country().await.is_none());
        }
    }
}
