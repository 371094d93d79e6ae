mod engine;

use anyhow::{Context, Result};
use orrery::OrreryConfig;
use std::path::PathBuf;

fn main() -> Result<()> {
    init_tracing();

    // Optional first argument: a RON config file.
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = OrreryConfig::load_or_default(path.as_deref())
        .with_context(|| match &path {
            Some(path) => format!("failed to load config from {}", path.display()),
            None => "failed to load config".to_string(),
        })?;

    tracing::info!(
        target: "engine",
        particles = config.simulation.particle_count,
        step = ?config.simulation.step,
        "orrery starting"
    );
    engine::run(config)
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
