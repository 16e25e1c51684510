mod cli;

use crate::cli::app::App;
use clap::Parser;
use formdeck::{FormConfig, FormEngine};
use std::path::PathBuf;
use std::time::Duration;

/// Schema-driven record forms in the terminal
#[derive(Debug, Parser)]
#[command(name = "formdeck", version, about)]
struct Args {
    /// JSON file with form schemas (built-in sample forms when omitted)
    #[arg(long, value_name = "FILE")]
    schemas: Option<PathBuf>,

    /// Seconds a success notice stays on screen
    #[arg(long, default_value_t = 3)]
    notice_secs: u64,

    /// UI poll interval in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the registered form types and exit
    #[arg(long)]
    list_types: bool,
}

impl Args {
    fn config(&self) -> FormConfig {
        let mut config = FormConfig::new()
            .notice_ttl(Duration::from_secs(self.notice_secs))
            .tick_rate(Duration::from_millis(self.tick_ms));
        if let Some(path) = &self.schemas {
            config = config.schema_file(path);
        }
        if let Some(path) = &self.log_file {
            config = config.log_file(path);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();

    if let Some(path) = &config.log_file {
        cli::logging::initialize(path)?;
    }

    let engine = FormEngine::from_config(&config)?;

    if args.list_types {
        for type_name in engine.list_types() {
            println!("{type_name}");
        }
        return Ok(());
    }

    let mut app = App::new(engine, &config);
    app.run().await.map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
