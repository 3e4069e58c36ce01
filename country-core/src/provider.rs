use crate::{
    Config, Coordinates, CountryMatch,
    provider::{geocodexyz::GeocodeXyzProvider, restcountries::RestCountriesProvider},
};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::{fmt::Debug, sync::Arc};

pub mod geocodexyz;
pub mod restcountries;

/// Turns coordinates into a country name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    /// `Ok(None)` when the service answered but named no country.
    async fn country_at(&self, coords: Coordinates) -> anyhow::Result<Option<String>>;
}

/// Looks countries up by (partial) name.
#[async_trait]
pub trait CountryInfoService: Send + Sync + Debug {
    /// Matches in upstream order; empty when nothing matched.
    async fn search_by_name(&self, name: &str) -> anyhow::Result<Vec<CountryMatch>>;
}

/// Both upstream services, wired from one config.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub countries: Arc<dyn CountryInfoService>,
}

/// Construct both providers from config, sharing one HTTP client.
pub fn services_from_config(config: &Config) -> anyhow::Result<Services> {
    let http = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    // Validate early so a typo in the config fails before the first lookup.
    endpoint_url(&config.endpoints.geocode_url, &[])?;
    endpoint_url(&config.endpoints.country_url, &[])?;

    Ok(Services {
        geocoder: Arc::new(GeocodeXyzProvider::new(
            config.endpoints.geocode_url.clone(),
            http.clone(),
        )),
        countries: Arc::new(RestCountriesProvider::new(config.endpoints.country_url.clone(), http)),
    })
}

/// Append percent-encoded path segments to a base URL.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> anyhow::Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid service URL '{base}'"))?;

    url.path_segments_mut()
        .map_err(|_| anyhow!("Service URL '{base}' cannot take a path"))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
