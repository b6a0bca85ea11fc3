use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 引擎與來源的 log target，預設壓到 warn 以下不輸出
pub const ENGINE_TARGETS: [&str; 2] = ["subenum_gateway::core::runner", "subenum_gateway::adapters"];

pub fn default_directives(verbose: bool) -> String {
    if verbose {
        "info,subenum_gateway=debug,tower_http=debug".to_string()
    } else {
        let quiet = ENGINE_TARGETS
            .iter()
            .map(|target| format!("{}=warn", target))
            .collect::<Vec<_>>()
            .join(",");
        format!("info,{}", quiet)
    }
}

// 整個程序只初始化一次；RUST_LOG 存在時優先使用，輸出到 stderr
pub fn init_server_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
