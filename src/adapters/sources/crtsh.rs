use crate::adapters::sources::ensure_success;
use crate::domain::ports::Source;
use crate::utils::error::EngineResult;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://crt.sh/";

#[derive(Debug, Deserialize)]
struct CertificateEntry {
    name_value: String,
}

/// crt.sh 憑證透明度紀錄
#[derive(Debug, Clone)]
pub struct CrtSh {
    base_url: String,
}

impl CrtSh {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for CrtSh {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for CrtSh {
    fn name(&self) -> &'static str {
        "crtsh"
    }

    async fn fetch(&self, client: &reqwest::Client, domain: &str) -> EngineResult<Vec<String>> {
        let query = format!("%.{}", domain);
        let url = Url::parse_with_params(
            &self.base_url,
            &[("q", query.as_str()), ("output", "json")],
        )?;

        tracing::debug!("Querying crt.sh: {}", url);
        let response = ensure_success(self.name(), client.get(url).send().await?)?;
        let entries: Vec<CertificateEntry> = response.json().await?;

        // name_value 可能以換行分隔多個名稱
        let names = entries
            .iter()
            .flat_map(|entry| entry.name_value.split('\n'))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Ok(names)
    }
}
