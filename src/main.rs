use anyhow::Result;
use statboard::{config::Config, serve};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure + serve ────────────────────────────────────────
    let config = Config::from_env();
    info!(
        addr = %config.bind_addr,
        public_dir = %config.public_dir.display(),
        default_csv = %config.default_csv.display(),
        "configured"
    );

    serve::run(config).await
}
