pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::ServerConfig;

pub use crate::core::{
    enumerator::SubdomainEnumerator,
    runner::{Runner, RunnerFactory},
};
pub use domain::model::{EnumerationOptions, SubdomainRequest, SubdomainResponse};
pub use utils::error::{AdapterError, EngineError, Result};
