use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::filter::LevelFilter;

use tempo_bot::config::BotConfig;
use tempo_bot::supervisor::Supervisor;
use tempo_engine::{now, Engine, StateStore};

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab")]
struct Opts {
    /// Config file location
    #[structopt(short, long, default_value = "tempo.json")]
    config: PathBuf,

    /// Accelerated-time developer mode: timebox minutes tick in seconds
    #[structopt(long)]
    dev: bool,
}

/// Main entry point.
///
/// Loads the configuration, initialises logging, proves the state file is
/// readable and writable, then hands control to the supervisor, which runs
/// until the process is terminated.
pub fn main() -> Result<(), anyhow::Error> {
    let opts = Opts::from_args();

    let mut config = BotConfig::load_file(&opts.config)?;
    if opts.dev {
        config.timebox.dev_mode = true;
    }

    let default_level = if config.timebox.dev_mode {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let level = config.log_level.map(LevelFilter::from).unwrap_or(default_level);
    tracing_subscriber::fmt().with_max_level(level).init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

async fn run(config: BotConfig) -> Result<(), anyhow::Error> {
    let store = StateStore::new(config.state_file.clone());

    // Load, prune, and rewrite the snapshot before connecting, so a state
    // file we cannot write to fails the process up front
    let snapshot = store.load()?;
    let mut engine = Engine::new(config.timebox.clone(), snapshot);
    engine.sweep_retention(now());
    store.save(engine.snapshot())?;

    let mut supervisor = Supervisor::new(config, engine, store);
    supervisor.run().await
}
