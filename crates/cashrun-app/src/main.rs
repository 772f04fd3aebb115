use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use cashrun_app::game_loop::LoopOptions;
use cashrun_app::host::Host;
use cashrun_app::logging;
use cashrun_core::commands::PlayerCommand;
use cashrun_sim::config::GameConfig;
use cashrun_sim::persistence::delete_save;

/// Run CASHRUN headless. Reads one JSON command per line from stdin and
/// writes snapshots to stdout as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "cashrun", version, about)]
struct Args {
    /// Game config file. Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override where the save document lives.
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Run as fast as possible instead of at 30Hz.
    #[arg(long)]
    fast: bool,

    /// Print every Nth snapshot, plus any tick that raised notifications.
    #[arg(long, default_value_t = 1)]
    emit_every: u64,

    /// Delete any existing save before starting.
    #[arg(long)]
    fresh: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(path) = args.save_path {
        config.save_path = path;
    }
    if args.fresh {
        delete_save(&config.save_path)?;
        log::info!("removed save at {}", config.save_path.display());
    }

    let options = LoopOptions {
        max_ticks: args.ticks,
        realtime: !args.fast,
    };
    let host = Arc::new(Host::new());
    let snapshots = host.start(config, options)?;

    let reader = Arc::clone(&host);
    std::thread::Builder::new()
        .name("cashrun-stdin".into())
        .spawn(move || read_commands(&reader))?;

    let emit_every = args.emit_every.max(1);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, snapshot) in snapshots.iter().enumerate() {
        // Ticks that published notifications are always printed.
        if (index as u64 + 1) % emit_every == 0 || !snapshot.notifications.is_empty() {
            serde_json::to_writer(&mut out, &snapshot)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    host.stop()?;
    Ok(())
}

/// Forward stdin lines to the game loop until EOF or the loop stops.
fn read_commands(host: &Host) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(line) {
            Ok(command) => {
                if let Err(err) = host.send(command) {
                    log::debug!("command reader stopping: {err}");
                    break;
                }
            }
            Err(err) => log::warn!("ignoring malformed command {line:?}: {err}"),
        }
    }
}
