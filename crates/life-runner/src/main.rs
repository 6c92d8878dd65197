//! Headless driver that advances a universe on a timer.
//!
//! Control lines on stdin steer the run while it is going; see
//! [`command::ControlCommand`] for the syntax.

mod command;
mod session;
mod telemetry;

use anyhow::{bail, Context, Result};
use clap::Parser;
use command::{apply_control_command, CommandOutcome, ControlCommand};
use life_core::RunnerConfig;
use life_world::Pattern;
use session::{RunSummary, Session};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "life-runner",
    version,
    about = "Run a toroidal Game of Life universe on a timer"
)]
struct Cli {
    /// JSON runner configuration; flags below override its values.
    #[arg(short, long, env = "LIFE_CONFIG")]
    config: Option<PathBuf>,

    /// Number of columns.
    #[arg(long)]
    width: Option<u32>,

    /// Number of rows.
    #[arg(long)]
    height: Option<u32>,

    /// Probability that a cell starts alive (0.0 to 1.0).
    #[arg(long)]
    alive_odds: Option<f64>,

    /// Pixel span of one cell.
    #[arg(long)]
    cell_size: Option<f64>,

    /// Fixed seed for a reproducible board.
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between generations in milliseconds.
    #[arg(long)]
    tick_interval_ms: Option<u64>,

    /// Stop after this many generations.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Print a text frame every N generations (0 disables).
    #[arg(long)]
    frame_every: Option<u64>,

    /// Log progress every N generations (0 disables).
    #[arg(long)]
    log_every: Option<u64>,

    /// Stamp a built-in pattern (blinker, block, glider) at the board center.
    #[arg(long)]
    pattern: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Defaults, then the config file, then individual flags
    fn runner_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunnerConfig::default(),
        };

        let universe = &mut config.universe;
        if let Some(width) = self.width {
            universe.width = width;
        }
        if let Some(height) = self.height {
            universe.height = height;
        }
        if let Some(alive_odds) = self.alive_odds {
            universe.alive_odds = alive_odds;
        }
        if let Some(cell_size) = self.cell_size {
            universe.cell_size = cell_size;
        }
        if self.seed.is_some() {
            universe.seed = self.seed;
        }

        if let Some(tick_interval_ms) = self.tick_interval_ms {
            config.tick_interval_ms = tick_interval_ms;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
        if let Some(frame_every) = self.frame_every {
            config.frame_every = frame_every;
        }
        if let Some(log_every) = self.log_every {
            config.log_every = log_every;
        }

        config.validate().context("invalid runner configuration")?;
        Ok(config)
    }

    fn pattern(&self) -> Result<Option<Pattern>> {
        match &self.pattern {
            None => Ok(None),
            Some(name) => match Pattern::named(name) {
                Some(pattern) => Ok(Some(pattern)),
                None => bail!("unknown pattern {:?} (expected blinker, block or glider)", name),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.json_logs)?;

    let config = cli.runner_config()?;
    let pattern = cli.pattern()?;

    info!(
        width = config.universe.width,
        height = config.universe.height,
        alive_odds = config.universe.alive_odds,
        tick_interval_ms = config.tick_interval_ms,
        max_ticks = ?config.max_ticks,
        "Starting Game of Life runner"
    );

    let mut session = Session::new(config)?;
    if let Some(pattern) = pattern {
        let universe = session.universe();
        let col = (universe.width() - pattern.width().min(universe.width())) / 2;
        let row = (universe.height() - pattern.height().min(universe.height())) / 2;
        session.place(&pattern, col, row)?;
    }

    let commands = BufReader::new(tokio::io::stdin());
    let summary = run(session, commands).await;

    info!(
        event = "run_summary",
        generation = summary.generation,
        live_cells = summary.live_cells,
        width = summary.width,
        height = summary.height,
        "Run complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Tick on a fixed interval until `max_ticks` or a shutdown signal, applying
/// control lines from `commands` between ticks.
async fn run<R>(mut session: Session, commands: R) -> RunSummary
where
    R: AsyncBufRead + Unpin,
{
    let mut ticker = pacing_timer(session.tick_interval());

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut lines = commands.lines();
    let mut commands_open = true;

    if session.config().frame_every > 0 {
        print!("{}", session.universe());
    }

    session.set_running(true);
    while !session.finished() {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping before generation {}", session.universe().generation() + 1);
                break;
            }
            line = lines.next_line(), if commands_open => match line {
                Ok(Some(line)) => {
                    if let Some(period) = handle_line(&mut session, &line) {
                        ticker = pacing_timer(period);
                    }
                }
                Ok(None) => {
                    debug!("Command input closed");
                    commands_open = false;
                }
                Err(e) => {
                    warn!("Failed to read command input: {}", e);
                    commands_open = false;
                }
            },
            _ = ticker.tick() => {
                if session.step() {
                    report(&session);
                }
            }
        }
    }

    session.summary()
}

fn pacing_timer(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Parse and apply one control line. Returns a new tick period when the
/// pacing timer must be rebuilt.
fn handle_line(session: &mut Session, line: &str) -> Option<Duration> {
    if line.trim().is_empty() {
        return None;
    }

    let outcome = line
        .parse::<ControlCommand>()
        .and_then(|command| apply_control_command(session, command));

    match outcome {
        Ok(CommandOutcome::Applied) => None,
        Ok(CommandOutcome::IntervalChanged(period)) => Some(period),
        Err(e) => {
            warn!("Ignoring command {:?}: {}", line.trim(), e);
            None
        }
    }
}

fn report(session: &Session) {
    let config = session.config();
    let universe = session.universe();
    let generation = universe.generation();

    if config.log_every > 0 && generation % config.log_every == 0 {
        info!(
            event = "progress",
            generation = generation,
            live_cells = universe.live_count(),
            "Progress"
        );
    }

    if config.frame_every > 0 && generation % config.frame_every == 0 {
        println!("generation {}", generation);
        print!("{}", universe);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
