use crate::adapters::sources::{ensure_success, url_with_segments};
use crate::domain::ports::Source;
use crate::utils::error::{EngineError, EngineResult};
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://otx.alienvault.com/api/v1/indicators/domain/";

#[derive(Debug, Deserialize)]
struct PassiveDnsResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    passive_dns: Vec<PassiveDnsRecord>,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsRecord {
    hostname: String,
}

/// AlienVault OTX passive DNS
#[derive(Debug, Clone)]
pub struct AlienVault {
    base_url: String,
}

impl AlienVault {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for AlienVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for AlienVault {
    fn name(&self) -> &'static str {
        "alienvault"
    }

    async fn fetch(&self, client: &reqwest::Client, domain: &str) -> EngineResult<Vec<String>> {
        let url = url_with_segments(&self.base_url, &[domain, "passive_dns"])?;

        tracing::debug!("Querying AlienVault OTX: {}", url);
        let response = ensure_success(self.name(), client.get(url).send().await?)?;
        let body: PassiveDnsResponse = response.json().await?;

        if let Some(message) = body.error.or(body.detail).filter(|m| !m.is_empty()) {
            return Err(EngineError::source_failure(self.name(), message));
        }

        Ok(body
            .passive_dns
            .into_iter()
            .map(|record| record.hostname)
            .collect())
    }
}
