use crate::domain::model::EnumerationOptions;
use crate::domain::ports::EngineFactory;
use crate::utils::error::{AdapterError, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 包裝列舉引擎：固定設定、收集輸出並切成逐行結果
#[derive(Clone)]
pub struct SubdomainEnumerator {
    factory: Arc<dyn EngineFactory>,
    sources: Vec<String>,
    max_results: Option<usize>,
}

impl SubdomainEnumerator {
    pub fn new(factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            factory,
            sources: Vec::new(),
            max_results: None,
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// 每次呼叫都產生新的設定，threads/timeout/max_enumeration_time 固定
    pub fn options(&self) -> EnumerationOptions {
        EnumerationOptions {
            sources: self.sources.clone(),
            max_results: self.max_results,
            ..EnumerationOptions::default()
        }
    }

    pub async fn enumerate(&self, domain: &str, cancel: CancellationToken) -> Result<Vec<String>> {
        let options = self.options();

        let engine = self
            .factory
            .build(&options)
            .map_err(|e| AdapterError::InitFailure(e.to_string()))?;

        // 失敗時丟棄已寫入的部分輸出
        let mut output = Vec::new();
        engine
            .enumerate_single_domain(cancel, domain, &mut output)
            .await
            .map_err(|e| AdapterError::EnumerationFailure(e.to_string()))?;

        let mut subdomains = split_lines(&output);
        if let Some(max_results) = options.max_results {
            subdomains.truncate(max_results);
        }

        Ok(subdomains)
    }
}

pub fn split_lines(output: &[u8]) -> Vec<String> {
    output
        .split(|byte| *byte == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}
