//! Generate `nodes.csv` and `edges.csv` for the karate club graph
//!
//! Both tables are printed to stdout first. Set `RUST_LOG=debug` for step
//! logs on stderr.

use karate_dataset::{run, GeneratorConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(&GeneratorConfig::default()).await?;

    Ok(())
}
