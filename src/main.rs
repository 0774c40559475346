use std::env;
use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use pushgrid::app::{parse_script, App};
use pushgrid::config::EngineConfig;
use pushgrid::formatter::FrameFormatter;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .event_format(FrameFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")
}

/// Reads the move script from the command line, or from stdin when no arguments were given.
fn read_script() -> Result<String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut script = String::new();
    if !io::stdin().is_terminal() {
        io::stdin().read_to_string(&mut script).context("Failed to read script from stdin")?;
    }
    Ok(script)
}

fn main() -> Result<()> {
    init_tracing()?;

    let config = EngineConfig::load()?;
    info!(?config, "Starting");

    let keys = parse_script(&read_script()?)?;
    let mut app = App::new(&config)?;
    let summary = app.run(&keys);

    print!("{}", summary.board);
    println!(
        "frames: {}  moves: {}  blocked: {}  solved: {}",
        summary.frames, summary.moves, summary.blocked, summary.solved
    );

    Ok(())
}
