use anyhow::Result;
use tracing_subscriber::EnvFilter;

use passkeep::cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("passkeep=info".parse()?))
        .init();

    cli::run()
}
