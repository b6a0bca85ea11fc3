pub mod alienvault;
pub mod anubis;
pub mod crtsh;
pub mod hackertarget;

use crate::domain::ports::Source;
use crate::utils::error::{EngineError, EngineResult};
use std::sync::Arc;
use url::Url;

pub use alienvault::AlienVault;
pub use anubis::Anubis;
pub use crtsh::CrtSh;
pub use hackertarget::HackerTarget;

pub const ALL_SOURCES: [&str; 4] = ["alienvault", "anubis", "crtsh", "hackertarget"];

pub fn source_by_name(name: &str) -> Option<Arc<dyn Source>> {
    match name {
        "alienvault" => Some(Arc::new(AlienVault::new())),
        "anubis" => Some(Arc::new(Anubis::new())),
        "crtsh" => Some(Arc::new(CrtSh::new())),
        "hackertarget" => Some(Arc::new(HackerTarget::new())),
        _ => None,
    }
}

pub fn default_sources() -> Vec<Arc<dyn Source>> {
    ALL_SOURCES.iter().filter_map(|name| source_by_name(name)).collect()
}

/// 在固定的 base URL 後附加路徑區段；每段都會 percent-encode，host 不會被改寫
pub(crate) fn url_with_segments(base_url: &str, segments: &[&str]) -> EngineResult<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| EngineError::Message(format!("base URL cannot have a path: {}", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// 非 2xx 回應視為來源錯誤
pub(crate) fn ensure_success(
    name: &str,
    response: reqwest::Response,
) -> EngineResult<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(EngineError::source_failure(
            name,
            format!("unexpected status {}", status),
        ));
    }
    Ok(response)
}
