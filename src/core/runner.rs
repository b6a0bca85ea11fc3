use crate::adapters::sources::default_sources;
use crate::domain::model::EnumerationOptions;
use crate::domain::ports::{EngineFactory, EnumerationEngine, Source};
use crate::utils::error::{EngineError, EngineResult, ValidationError};
use crate::utils::validation::{validate_positive_number, Validate};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

impl Validate for EnumerationOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_positive_number("threads", self.threads, 1)?;
        validate_positive_number("timeout", self.timeout as usize, 1)?;
        validate_positive_number(
            "max_enumeration_time",
            self.max_enumeration_time as usize,
            1,
        )?;
        if let Some(max_results) = self.max_results {
            validate_positive_number("max_results", max_results, 1)?;
        }
        Ok(())
    }
}

/// 依名稱挑選來源並建立 Runner
#[derive(Clone, Default)]
pub struct RunnerFactory {
    sources: Option<Vec<Arc<dyn Source>>>,
}

impl RunnerFactory {
    pub fn new() -> Self {
        Self { sources: None }
    }

    /// 以自訂來源取代內建清單
    pub fn with_sources(sources: Vec<Arc<dyn Source>>) -> Self {
        Self {
            sources: Some(sources),
        }
    }

    fn resolve_sources(&self, requested: &[String]) -> EngineResult<Vec<Arc<dyn Source>>> {
        let available = match &self.sources {
            Some(sources) => sources.clone(),
            None => default_sources(),
        };

        if requested.is_empty() {
            return Ok(available);
        }

        requested
            .iter()
            .map(|name| {
                available
                    .iter()
                    .find(|source| source.name() == name)
                    .cloned()
                    .ok_or_else(|| EngineError::UnknownSource(name.clone()))
            })
            .collect()
    }
}

impl EngineFactory for RunnerFactory {
    fn build(&self, options: &EnumerationOptions) -> EngineResult<Box<dyn EnumerationEngine>> {
        let sources = self.resolve_sources(&options.sources)?;
        Ok(Box::new(Runner::new(options, sources)?))
    }
}

/// 被動子網域列舉：並發查詢各來源，去重後逐行寫出
pub struct Runner {
    client: reqwest::Client,
    sources: Vec<Arc<dyn Source>>,
    threads: usize,
    max_enumeration_time: Duration,
}

impl Runner {
    pub fn new(options: &EnumerationOptions, sources: Vec<Arc<dyn Source>>) -> EngineResult<Self> {
        options.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout))
            .user_agent(concat!("subenum-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            sources,
            threads: options.threads,
            // max_enumeration_time 以分鐘計
            max_enumeration_time: Duration::from_secs(options.max_enumeration_time * 60),
        })
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.name()).collect()
    }
}

fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_lowercase()
}

/// 只接受目標網域底下的子網域 (不含網域本身)
pub fn subdomain_matcher(domain: &str) -> EngineResult<Regex> {
    let pattern = format!(
        r"^(?:[a-z0-9_-]+\.)+{}$",
        regex::escape(&normalize_domain(domain))
    );
    Regex::new(&pattern).map_err(|e| EngineError::Message(e.to_string()))
}

pub fn normalize_host(candidate: &str) -> String {
    let host = candidate.trim().trim_end_matches('.').to_lowercase();
    match host.strip_prefix("*.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

#[async_trait]
impl EnumerationEngine for Runner {
    async fn enumerate_single_domain(
        &self,
        cancel: CancellationToken,
        domain: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> EngineResult<()> {
        let matcher = subdomain_matcher(domain)?;
        let started = Instant::now();
        tracing::debug!(
            "Enumerating {:?} with sources: {}",
            domain,
            self.source_names().join(", ")
        );

        let client = &self.client;
        let fetches: Vec<_> = self
            .sources
            .iter()
            .cloned()
            .map(|source| async move {
                let name = source.name();
                (name, source.fetch(client, domain).await)
            })
            .collect();
        let mut results = stream::iter(fetches).buffer_unordered(self.threads);

        let deadline = tokio::time::sleep(self.max_enumeration_time);
        tokio::pin!(deadline);

        let mut seen = HashSet::new();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Enumeration of {:?} cancelled", domain);
                    return Err(EngineError::Cancelled);
                }
                _ = &mut deadline => {
                    tracing::warn!(
                        "Maximum enumeration time reached for {:?}, returning {} results",
                        domain,
                        seen.len()
                    );
                    break;
                }
                next = results.next() => match next {
                    None => break,
                    Some((name, Ok(candidates))) => {
                        let mut fresh = 0usize;
                        for candidate in candidates {
                            let host = normalize_host(&candidate);
                            if matcher.is_match(&host) && seen.insert(host.clone()) {
                                sink.write_all(host.as_bytes()).await?;
                                sink.write_all(b"\n").await?;
                                fresh += 1;
                            }
                        }
                        tracing::debug!("Source {} returned {} new subdomains", name, fresh);
                    }
                    Some((name, Err(e))) => {
                        tracing::warn!("Could not run source {}: {}", name, e);
                    }
                },
            }
        }

        sink.flush().await?;
        tracing::info!(
            "Found {} subdomains for {:?} in {:?}",
            seen.len(),
            domain,
            started.elapsed()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    struct StaticSource {
        name: &'static str,
        hosts: Vec<&'static str>,
    }

    #[async_trait]
    impl Source for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _client: &reqwest::Client, _domain: &str) -> EngineResult<Vec<String>> {
            Ok(self.hosts.iter().map(|h| h.to_string()).collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl Source for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self, _client: &reqwest::Client, _domain: &str) -> EngineResult<Vec<String>> {
            Err(EngineError::source_failure("failing", "boom"))
        }
    }

    struct SlowSource;

    #[async_trait]
    impl Source for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch(&self, _client: &reqwest::Client, _domain: &str) -> EngineResult<Vec<String>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec!["late.example.com".to_string()])
        }
    }

    struct BrokenSink;

    impl AsyncWrite for BrokenSink {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "sink closed",
            )))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn runner_with(sources: Vec<Arc<dyn Source>>) -> Runner {
        Runner::new(&EnumerationOptions::default(), sources).unwrap()
    }

    async fn run_to_string(runner: &Runner, domain: &str) -> EngineResult<String> {
        let mut output = Vec::new();
        runner
            .enumerate_single_domain(CancellationToken::new(), domain, &mut output)
            .await?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host(" *.API.Example.com. "), "api.example.com");
        assert_eq!(normalize_host("www.example.com"), "www.example.com");
    }

    #[test]
    fn test_subdomain_matcher_scope() {
        let matcher = subdomain_matcher("Example.com.").unwrap();
        assert!(matcher.is_match("www.example.com"));
        assert!(matcher.is_match("a.b.example.com"));
        assert!(!matcher.is_match("example.com"));
        assert!(!matcher.is_match("evil-example.com"));
        assert!(!matcher.is_match("www.example.community"));
        assert!(!matcher.is_match("wwwxexample.com"));
    }

    #[tokio::test]
    async fn test_enumerate_filters_normalizes_and_dedupes() {
        let runner = runner_with(vec![Arc::new(StaticSource {
            name: "static",
            hosts: vec![
                "www.example.com",
                "WWW.Example.com",
                "*.api.example.com",
                "example.com",
                "evil-example.com",
                "x.example.community",
                "mail.example.com.",
            ],
        })]);

        let output = run_to_string(&runner, "example.com").await.unwrap();
        assert_eq!(output, "www.example.com\napi.example.com\nmail.example.com\n");
    }

    #[tokio::test]
    async fn test_enumerate_merges_sources_and_skips_failures() {
        let runner = runner_with(vec![
            Arc::new(StaticSource {
                name: "first",
                hosts: vec!["a.example.com", "b.example.com"],
            }),
            Arc::new(FailingSource),
            Arc::new(StaticSource {
                name: "second",
                hosts: vec!["b.example.com", "c.example.com"],
            }),
        ]);

        let output = run_to_string(&runner, "example.com").await.unwrap();
        let mut hosts: Vec<&str> = output.lines().collect();
        hosts.sort();
        assert_eq!(hosts, vec!["a.example.com", "b.example.com", "c.example.com"]);
    }

    #[tokio::test]
    async fn test_enumerate_with_no_matches_writes_nothing() {
        let runner = runner_with(vec![Arc::new(FailingSource)]);
        let output = run_to_string(&runner, "example.com").await.unwrap();
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_enumerate_cancelled_returns_error() {
        let runner = runner_with(vec![Arc::new(SlowSource)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut output = Vec::new();
        let err = runner
            .enumerate_single_domain(cancel, "example.com", &mut output)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Cancelled));
        assert_eq!(err.to_string(), "context canceled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_enumerate_deadline_keeps_collected_results() {
        let runner = runner_with(vec![
            Arc::new(SlowSource),
            Arc::new(StaticSource {
                name: "fast",
                hosts: vec!["fast.example.com"],
            }),
        ]);

        let output = run_to_string(&runner, "example.com").await.unwrap();
        assert_eq!(output, "fast.example.com\n");
    }

    #[tokio::test]
    async fn test_enumerate_sink_failure_is_error() {
        let runner = runner_with(vec![Arc::new(StaticSource {
            name: "static",
            hosts: vec!["www.example.com"],
        })]);

        let err = runner
            .enumerate_single_domain(CancellationToken::new(), "example.com", &mut BrokenSink)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn test_factory_rejects_invalid_options() {
        let factory = RunnerFactory::with_sources(vec![]);
        let options = EnumerationOptions {
            threads: 0,
            ..EnumerationOptions::default()
        };

        let err = factory.build(&options).err().unwrap();
        assert!(matches!(err, EngineError::InvalidOption(_)));
        assert!(err.to_string().contains("threads"));
    }

    #[test]
    fn test_factory_rejects_unknown_source() {
        let options = EnumerationOptions {
            sources: vec!["crtsh".to_string(), "shodan".to_string()],
            ..EnumerationOptions::default()
        };

        let err = RunnerFactory::new().build(&options).err().unwrap();
        assert_eq!(err.to_string(), "unknown source: shodan");
    }

    #[test]
    fn test_factory_selects_requested_sources() {
        let factory = RunnerFactory::new();
        let selected = factory
            .resolve_sources(&["anubis".to_string(), "crtsh".to_string()])
            .unwrap();
        let names: Vec<&str> = selected.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["anubis", "crtsh"]);

        let all = factory.resolve_sources(&[]).unwrap();
        assert_eq!(all.len(), 4);
    }
}
