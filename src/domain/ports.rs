use crate::domain::model::EnumerationOptions;
use crate::utils::error::EngineResult;
use async_trait::async_trait;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

/// 子網域列舉引擎：把找到的主機以換行分隔寫入 sink
#[async_trait]
pub trait EnumerationEngine: Send + Sync {
    async fn enumerate_single_domain(
        &self,
        cancel: CancellationToken,
        domain: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> EngineResult<()>;
}

/// 依設定建立新的引擎實例，每次列舉都會呼叫一次
pub trait EngineFactory: Send + Sync {
    fn build(&self, options: &EnumerationOptions) -> EngineResult<Box<dyn EnumerationEngine>>;
}

/// 被動資料來源，回傳原始候選主機名稱 (尚未過濾)
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, client: &reqwest::Client, domain: &str) -> EngineResult<Vec<String>>;
}
