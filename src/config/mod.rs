#[cfg(feature = "cli")]
use crate::adapters::sources::ALL_SOURCES;
#[cfg(feature = "cli")]
use crate::utils::error::ValidationError;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_allowed_values, validate_non_empty_string, validate_positive_number, validate_range,
    Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "subenum-gateway")]
#[command(about = "HTTP gateway for passive subdomain enumeration")]
pub struct ServerConfig {
    #[arg(long, env = "SUBENUM_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "SUBENUM_PORT", default_value = "8080")]
    pub port: u16,

    /// 啟用的來源 (逗號分隔，預設全部)
    #[arg(long, env = "SUBENUM_SOURCES", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// 單次回應最多回傳的子網域數
    #[arg(long, env = "SUBENUM_MAX_RESULTS")]
    pub max_results: Option<usize>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "cli")]
impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_allowed_values("sources", &self.sources, &ALL_SOURCES)?;
        if let Some(max_results) = self.max_results {
            validate_positive_number("max_results", max_results, 1)?;
        }
        Ok(())
    }
}
