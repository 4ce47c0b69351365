use std::{env, fs::File, io};

use tracing_subscriber::EnvFilter;

use save_ether::{
    config::Config, dlq::StdErrDLQ, engine::Engine, ingestion::CsvReader, store::InMemoryStore,
};

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_args(env::args())?;
    let file = File::open(&config.input)?;
    let ingestion = CsvReader::new(file)?;

    let mut engine = Engine::new(ingestion, InMemoryStore::new(), StdErrDLQ::default())?;
    engine.process().await?;
    engine.flush(&mut io::stdout().lock())?;

    Ok(())
}
