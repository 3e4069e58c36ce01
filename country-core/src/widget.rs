//! The lookup widget: one search input, one display slot, and the two flows
//! (geolocation on mount, manual search) that write into the slot.
//!
//! Concurrent lookups are not ordered against each other. Whichever response
//! arrives last replaces the display.

use chrono::Utc;
use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    error::LookupError,
    locator::Locator,
    model::{CountryRecord, Displayed, Invocation},
    position::PositionSource,
    provider::Services,
    resolver::Resolver,
};

/// User-visible alert channel.
pub trait AlertSink: Send + Sync + Debug {
    fn alert(&self, message: &str);
}

/// Result of one lookup as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Nothing to do: blank term, no default country, or already mounted.
    Skipped,
    Displayed(CountryRecord),
    NotFound,
    Failed(String),
}

/// Holds the record currently shown. Last write wins.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    current: RwLock<Option<Displayed>>,
}

impl DisplaySlot {
    pub async fn get(&self) -> Option<Displayed> {
        self.current.read().await.clone()
    }

    pub async fn set(&self, record: CountryRecord, origin: Invocation) -> Displayed {
        let displayed = Displayed { record, origin, updated_at: Utc::now() };
        *self.current.write().await = Some(displayed.clone());
        displayed
    }
}

/// The text field the user types a country name into.
#[derive(Debug, Default)]
pub struct SearchInput {
    value: RwLock<String>,
}

impl SearchInput {
    pub async fn get(&self) -> String {
        self.value.read().await.clone()
    }

    pub async fn set(&self, text: impl Into<String>) {
        *self.value.write().await = text.into();
    }

    pub async fn clear(&self) {
        self.value.write().await.clear();
    }
}

#[derive(Debug)]
pub struct CountryWidget {
    locator: Locator,
    resolver: Resolver,
    alerts: Arc<dyn AlertSink>,
    display: DisplaySlot,
    input: SearchInput,
    mounted: AtomicBool,
}

impl CountryWidget {
    pub fn new(locator: Locator, resolver: Resolver, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            locator,
            resolver,
            alerts,
            display: DisplaySlot::default(),
            input: SearchInput::default(),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn from_services(
        services: &Services,
        position: Arc<dyn PositionSource>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self::new(
            Locator::new(position, services.geocoder.clone()),
            Resolver::new(services.countries.clone()),
            alerts,
        )
    }

    /// Run the geolocation flow. Only the first call per widget does anything.
    pub async fn mount(&self) -> FetchOutcome {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("widget already mounted");
            return FetchOutcome::Skipped;
        }

        match self.locator.default_country().await {
            Some(country) => self.fetch_data(&country, Invocation::Default).await,
            None => {
                info!("no default country; waiting for a search");
                FetchOutcome::Skipped
            }
        }
    }

    /// Search for whatever is currently typed in the input.
    pub async fn submit_search(&self) -> FetchOutcome {
        let term = self.input.get().await;
        self.fetch_data(&term, Invocation::Manual).await
    }

    pub async fn fetch_data(&self, term: &str, invocation: Invocation) -> FetchOutcome {
        let term = term.trim();
        if term.is_empty() {
            debug!("blank search term ignored");
            return FetchOutcome::Skipped;
        }

        match self.resolver.resolve(term).await {
            Ok(record) => {
                info!(country = %record.name, origin = %invocation, "displaying country");
                self.display.set(record.clone(), invocation).await;
                if invocation == Invocation::Manual {
                    self.input.clear().await;
                }
                FetchOutcome::Displayed(record)
            }
            Err(err) => {
                warn!(term, origin = %invocation, error = %err, "country lookup failed");
                self.alerts.alert(err.alert_message());
                match err {
                    LookupError::UpstreamEmpty => FetchOutcome::NotFound,
                    other => FetchOutcome::Failed(other.to_string()),
                }
            }
        }
    }

    pub async fn display(&self) -> Option<Displayed> {
        self.display.get().await
    }

    pub async fn input(&self) -> String {
        self.input.get().await
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.input.set(text).await;
    }
}
