#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use clap::Parser;
    use workout_schedule::{AppConfig, WorkoutService, http_api, observability};

    /// Serve today's and tomorrow's workout over HTTP.
    #[derive(Parser)]
    #[command(name = "http")]
    struct Args {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address (overrides config file)
        #[arg(long)]
        addr: Option<SocketAddr>,
    }

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;
    observability::init_tracing(&config.logging);

    let addr: SocketAddr = match args.addr {
        Some(addr) => addr,
        None => config.server.addr.parse()?,
    };
    let service = WorkoutService::from_config(&config)?;
    http_api::serve(addr, service).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
