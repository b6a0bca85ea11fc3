use crate::adapters::sources::{ensure_success, url_with_segments};
use crate::domain::ports::Source;
use crate::utils::error::EngineResult;
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://jonlu.ca/anubis/subdomains/";

#[derive(Debug, Clone)]
pub struct Anubis {
    base_url: String,
}

impl Anubis {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Anubis {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for Anubis {
    fn name(&self) -> &'static str {
        "anubis"
    }

    async fn fetch(&self, client: &reqwest::Client, domain: &str) -> EngineResult<Vec<String>> {
        let url = url_with_segments(&self.base_url, &[domain])?;

        tracing::debug!("Querying Anubis: {}", url);
        let response = ensure_success(self.name(), client.get(url).send().await?)?;
        let hosts: Vec<String> = response.json().await?;

        Ok(hosts)
    }
}
