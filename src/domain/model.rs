use serde::{Deserialize, Serialize};

/// 預設並發數
pub const DEFAULT_THREADS: usize = 100;
/// 單次 HTTP 呼叫逾時 (秒)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// 整體列舉時間上限 (分鐘)
pub const DEFAULT_MAX_ENUMERATION_MINUTES: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubdomainRequest {
    // 缺少 domain 時視為空字串，不做預先驗證
    #[serde(default)]
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainResponse {
    pub subdomains: Vec<String>,
}

/// 每次列舉時傳給引擎的設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationOptions {
    pub threads: usize,
    pub timeout: u64,
    pub max_enumeration_time: u64,
    /// 空陣列代表使用全部來源
    pub sources: Vec<String>,
    pub max_results: Option<usize>,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            timeout: DEFAULT_TIMEOUT_SECS,
            max_enumeration_time: DEFAULT_MAX_ENUMERATION_MINUTES,
            sources: Vec::new(),
            max_results: None,
        }
    }
}
