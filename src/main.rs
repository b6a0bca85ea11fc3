use clap::Parser;
use std::sync::Arc;
use subenum_gateway::api::{self, AppState};
use subenum_gateway::utils::{logger, validation::Validate};
use subenum_gateway::{RunnerFactory, ServerConfig, SubdomainEnumerator};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // 日誌只在啟動時設定一次，引擎輸出預設被壓低
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_server_logger(config.verbose);
    }

    tracing::info!("Starting subenum-gateway v{}", env!("CARGO_PKG_VERSION"));
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let enumerator = SubdomainEnumerator::new(Arc::new(RunnerFactory::new()))
        .with_sources(config.sources.clone())
        .with_max_results(config.max_results);
    let state = Arc::new(AppState::new(enumerator));

    let bind_addr = config.bind_addr();
    tracing::info!("Starting server on {}", bind_addr);

    // 無法監聽或伺服器中止時直接結束程序
    if let Err(e) = api::serve(&bind_addr, state).await {
        tracing::error!("❌ Server failed: {:#}", e);
        std::process::exit(1);
    }
}
