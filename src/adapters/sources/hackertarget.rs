use crate::adapters::sources::ensure_success;
use crate::domain::ports::Source;
use crate::utils::error::{EngineError, EngineResult};
use async_trait::async_trait;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.hackertarget.com/hostsearch/";

#[derive(Debug, Clone)]
pub struct HackerTarget {
    base_url: String,
}

impl HackerTarget {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for HackerTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for HackerTarget {
    fn name(&self) -> &'static str {
        "hackertarget"
    }

    async fn fetch(&self, client: &reqwest::Client, domain: &str) -> EngineResult<Vec<String>> {
        let url = Url::parse_with_params(&self.base_url, &[("q", domain)])?;

        tracing::debug!("Querying HackerTarget: {}", url);
        let response = ensure_success(self.name(), client.get(url).send().await?)?;
        let body = response.text().await?;

        // 額度用盡或查詢錯誤時仍回 200，只能從內容判斷
        let trimmed = body.trim();
        if trimmed.starts_with("error") || trimmed.starts_with("API count exceeded") {
            return Err(EngineError::source_failure(self.name(), trimmed));
        }

        // 每行格式: host,ip
        let hosts = body
            .lines()
            .filter_map(|line| line.split_once(',').map(|(host, _)| host.trim()))
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect();

        Ok(hosts)
    }
}
