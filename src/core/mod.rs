pub mod enumerator;
pub mod runner;

pub use crate::domain::model::{EnumerationOptions, SubdomainRequest, SubdomainResponse};
pub use crate::domain::ports::{EngineFactory, EnumerationEngine, Source};
pub use crate::utils::error::Result;
