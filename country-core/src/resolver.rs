use std::sync::Arc;
use tracing::debug;

use crate::{
    error::{LookupError, Result},
    model::{CountryMatch, CountryRecord, NOT_AVAILABLE},
    provider::CountryInfoService,
};

/// Turns a country name into a displayable record.
#[derive(Debug, Clone)]
pub struct Resolver {
    service: Arc<dyn CountryInfoService>,
}

impl Resolver {
    pub fn new(service: Arc<dyn CountryInfoService>) -> Self {
        Self { service }
    }

    /// Look `name` up and normalize the first match.
    ///
    /// Callers are expected to have filtered out blank names.
    pub async fn resolve(&self, name: &str) -> Result<CountryRecord> {
        let matches =
            self.service.search_by_name(name).await.map_err(LookupError::UpstreamError)?;
        debug!(name, matches = matches.len(), "country lookup answered");

        matches.into_iter().next().map(to_record).ok_or(LookupError::UpstreamEmpty)
    }
}

/// Map one upstream match onto the four display fields.
pub fn to_record(m: CountryMatch) -> CountryRecord {
    let capital = m
        .capitals
        .and_then(|caps| caps.into_iter().next())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let languages = m
        .languages
        .map(|langs| langs.join(", "))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    CountryRecord {
        name: m.common_name,
        capital,
        languages,
        flag_url: m.flag_svg.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Canned(Option<Vec<CountryMatch>>);

    #[async_trait]
    impl CountryInfoService for Canned {
        async fn search_by_name(&self, _name: &str) -> anyhow::Result<Vec<CountryMatch>> {
            self.0.clone().ok_or_else(|| anyhow::anyhow!("Failed to parse restcountries JSON"))
        }
    }

    fn france() -> CountryMatch {
        CountryMatch {
            common_name: "France".to_string(),
            capitals: Some(vec!["Paris".to_string()]),
            languages: Some(vec!["French".to_string()]),
            flag_svg: Some("https://flagcdn.com/fr.svg".to_string()),
        }
    }

    #[test]
    fn full_match_maps_every_field() {
        let record = to_record(france());

        assert_eq!(
            record,
            CountryRecord {
                name: "France".to_string(),
                capital: "Paris".to_string(),
                languages: "French".to_string(),
                flag_url: "https://flagcdn.com/fr.svg".to_string(),
            }
        );
    }

    #[test]
    fn absent_fields_use_placeholders() {
        let record = to_record(CountryMatch {
            common_name: "Antarctica".to_string(),
            ..CountryMatch::default()
        });

        assert_eq!(record.capital, NOT_AVAILABLE);
        assert_eq!(record.languages, NOT_AVAILABLE);
        assert_eq!(record.flag_url, "");
    }

    #[test]
    fn empty_capital_list_is_not_available() {
        let record = to_record(CountryMatch { capitals: Some(Vec::new()), ..france() });
        assert_eq!(record.capital, NOT_AVAILABLE);
    }

    #[test]
    fn only_first_capital_and_all_languages_are_kept() {
        let record = to_record(CountryMatch {
            common_name: "South Africa".to_string(),
            capitals: Some(vec![
                "Pretoria".to_string(),
                "Bloemfontein".to_string(),
                "Cape Town".to_string(),
            ]),
            languages: Some(vec!["Afrikaans".to_string(), "English".to_string(), "Zulu".to_string()]),
            flag_svg: None,
        });

        assert_eq!(record.capital, "Pretoria");
        assert_eq!(record.languages, "Afrikaans, English, Zulu");
    }

    #[test]
    fn mapping_is_deterministic() {
        assert_eq!(to_record(france()), to_record(france()));
    }

    #[tokio::test]
    async fn resolve_takes_first_match() {
        let other = CountryMatch { common_name: "French Guiana".to_string(), ..france() };
        let resolver = Resolver::new(Arc::new(Canned(Some(vec![france(), other]))));

        let record = resolver.resolve("fran").await.expect("lookup must succeed");
        assert_eq!(record.name, "France");
    }

    #[tokio::test]
    async fn resolve_empty_list_is_not_found() {
        let resolver = Resolver::new(Arc::new(Canned(Some(Vec::new()))));

        let err = resolver.resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamEmpty));
    }

    #[tokio::test]
    async fn resolve_service_failure_is_upstream_error() {
        let resolver = Resolver::new(Arc::new(Canned(None)));

        let err = resolver.resolve("France").await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamError(_)));
        assert!(err.to_string().contains("Failed to parse restcountries JSON"));
    }
}
