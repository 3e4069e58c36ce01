use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    model::CountryMatch,
    provider::{endpoint_url, truncate_body},
};

use super::CountryInfoService;

/// Country-info service backed by restcountries.com (v3.1 schema).
#[derive(Debug, Clone)]
pub struct RestCountriesProvider {
    base_url: String,
    http: Client,
}

impl RestCountriesProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct RcName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct RcFlags {
    svg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RcCountry {
    name: RcName,
    capital: Option<Vec<String>>,
    /// Language code to language name; order is the upstream order.
    languages: Option<Map<String, Value>>,
    flags: Option<RcFlags>,
}

impl From<RcCountry> for CountryMatch {
    fn from(c: RcCountry) -> Self {
        let languages = c.languages.map(|langs| {
            langs
                .into_iter()
                .map(|(_, v)| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect()
        });

        CountryMatch {
            common_name: c.name.common,
            capitals: c.capital,
            languages,
            flag_svg: c.flags.and_then(|f| f.svg),
        }
    }
}

#[async_trait]
impl CountryInfoService for RestCountriesProvider {
    async fn search_by_name(&self, name: &str) -> Result<Vec<CountryMatch>> {
        let url = endpoint_url(&self.base_url, &["name", name])?;
        debug!(%url, "looking up country");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send request to restcountries")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read restcountries response body")?;

        // The service answers an unmatched name with 404 rather than `[]`.
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !status.is_success() {
            return Err(anyhow!(
                "restcountries request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: Vec<RcCountry> =
            serde_json::from_str(&body).context("Failed to parse restcountries JSON")?;

        Ok(parsed.into_iter().map(CountryMatch::from).collect())
    }
}
