use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    model::Coordinates,
    provider::{endpoint_url, truncate_body},
};

use super::ReverseGeocoder;

/// Reverse geocoder backed by geocode.xyz.
#[derive(Debug, Clone)]
pub struct GeocodeXyzProvider {
    base_url: String,
    http: Client,
}

impl GeocodeXyzProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct GxError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GxResponse {
    country: Option<String>,
    error: Option<GxError>,
}

#[async_trait]
impl ReverseGeocoder for GeocodeXyzProvider {
    async fn country_at(&self, coords: Coordinates) -> Result<Option<String>> {
        let segment = coords.to_string();
        let url = endpoint_url(&self.base_url, &[segment.as_str()])?;
        debug!(%url, "reverse geocoding");

        let res = self
            .http
            .get(url)
            .query(&[("geoit", "json")])
            .send()
            .await
            .context("Failed to send request to geocode.xyz")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read geocode.xyz response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "geocode.xyz request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GxResponse =
            serde_json::from_str(&body).context("Failed to parse geocode.xyz JSON")?;

        match parsed.country.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            Some(country) => Ok(Some(country)),
            None => match parsed.error.and_then(|e| e.description) {
                Some(description) => Err(anyhow!("geocode.xyz reported an error: {description}")),
                None => Ok(None),
            },
        }
    }
}
