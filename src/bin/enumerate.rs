use clap::Parser;
use std::sync::Arc;
use subenum_gateway::utils::logger;
use subenum_gateway::{RunnerFactory, SubdomainEnumerator};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "enumerate")]
#[command(about = "Enumerate subdomains for a single domain and print one per line")]
struct Args {
    /// Target domain
    domain: String,

    /// Comma separated list of sources (default: all)
    #[arg(long, value_delimiter = ',')]
    sources: Vec<String>,

    /// Maximum number of subdomains to print
    #[arg(long)]
    max_results: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_server_logger(args.verbose);

    // Ctrl+C 取消列舉
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, cancelling enumeration");
            ctrl_c_token.cancel();
        }
    });

    let enumerator = SubdomainEnumerator::new(Arc::new(RunnerFactory::new()))
        .with_sources(args.sources)
        .with_max_results(args.max_results);

    match enumerator.enumerate(&args.domain, cancel).await {
        Ok(subdomains) => {
            for subdomain in &subdomains {
                println!("{}", subdomain);
            }
            tracing::info!("📁 {} subdomains found for {:?}", subdomains.len(), args.domain);
        }
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
