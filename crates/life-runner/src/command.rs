//! Line commands that steer a running session.

use crate::session::Session;
use life_core::{Error, Result};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// One control line read from the operator.
///
/// `p` pause/resume, `r` reset, `c <col> <row>` toggle a cell,
/// `x <px> <py>` toggle the cell under a pixel, `w`/`h <n>` resize,
/// `o <odds>` reseed with new odds, `t <ms>` change the tick interval,
/// `s` report status.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    TogglePause,
    Reset,
    Click { col: u32, row: u32 },
    ClickPixel { x: f64, y: f64 },
    Width(u32),
    Height(u32),
    AliveOdds(f64),
    TickInterval(u64),
    Status,
}

/// What the caller must do after a command was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The pacing timer has to be rebuilt with the new period
    IntervalChanged(Duration),
}

impl FromStr for ControlCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| Error::Config("empty command".to_string()))?;
        let args: Vec<&str> = parts.collect();

        let command = match (verb, args.as_slice()) {
            ("p", []) => ControlCommand::TogglePause,
            ("r", []) => ControlCommand::Reset,
            ("s", []) => ControlCommand::Status,
            ("c", [col, row]) => ControlCommand::Click {
                col: parse_arg(col)?,
                row: parse_arg(row)?,
            },
            ("x", [x, y]) => ControlCommand::ClickPixel {
                x: parse_arg(x)?,
                y: parse_arg(y)?,
            },
            ("w", [n]) => ControlCommand::Width(parse_arg(n)?),
            ("h", [n]) => ControlCommand::Height(parse_arg(n)?),
            ("o", [odds]) => ControlCommand::AliveOdds(parse_arg(odds)?),
            ("t", [ms]) => ControlCommand::TickInterval(parse_arg(ms)?),
            _ => return Err(Error::Config(format!("unrecognized command {:?}", line.trim()))),
        };
        Ok(command)
    }
}

fn parse_arg<T: FromStr>(arg: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| Error::Config(format!("invalid argument {:?}", arg)))
}

/// Apply one command to the session.
pub fn apply_control_command(
    session: &mut Session,
    command: ControlCommand,
) -> Result<CommandOutcome> {
    debug!(?command, "Applying control command");

    match command {
        ControlCommand::TogglePause => {
            let running = session.toggle_running();
            info!(running, generation = session.universe().generation(), "Run state changed");
        }
        ControlCommand::Reset => session.reset()?,
        ControlCommand::Click { col, row } => session.click(col, row)?,
        ControlCommand::ClickPixel { x, y } => {
            let pos = session.click_pixel(x, y)?;
            debug!(%pos, "Toggled cell under pointer");
        }
        ControlCommand::Width(width) => {
            let mut universe = session.config().universe.clone();
            universe.width = width;
            session.reconfigure(universe)?;
        }
        ControlCommand::Height(height) => {
            let mut universe = session.config().universe.clone();
            universe.height = height;
            session.reconfigure(universe)?;
        }
        ControlCommand::AliveOdds(alive_odds) => {
            let mut universe = session.config().universe.clone();
            universe.alive_odds = alive_odds;
            session.reconfigure(universe)?;
        }
        ControlCommand::TickInterval(millis) => {
            session.set_tick_interval(millis)?;
            return Ok(CommandOutcome::IntervalChanged(session.tick_interval()));
        }
        ControlCommand::Status => {
            let summary = session.summary();
            info!(
                event = "status",
                running = session.is_running(),
                generation = summary.generation,
                live_cells = summary.live_cells,
                width = summary.width,
                height = summary.height,
                tick_interval_ms = session.config().tick_interval_ms,
                "Status"
            );
        }
    }

    Ok(CommandOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::{RunnerConfig, UniverseConfig};

    fn test_session() -> Session {
        Session::new(RunnerConfig {
            universe: UniverseConfig {
                width: 10,
                height: 6,
                alive_odds: 0.0,
                seed: Some(3),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("p".parse::<ControlCommand>().unwrap(), ControlCommand::TogglePause);
        assert_eq!(" r ".parse::<ControlCommand>().unwrap(), ControlCommand::Reset);
        assert_eq!(
            "c 3 4".parse::<ControlCommand>().unwrap(),
            ControlCommand::Click { col: 3, row: 4 }
        );
        assert_eq!(
            "x 12.5 7".parse::<ControlCommand>().unwrap(),
            ControlCommand::ClickPixel { x: 12.5, y: 7.0 }
        );
        assert_eq!("w 64".parse::<ControlCommand>().unwrap(), ControlCommand::Width(64));
        assert_eq!("h 32".parse::<ControlCommand>().unwrap(), ControlCommand::Height(32));
        assert_eq!("o 0.4".parse::<ControlCommand>().unwrap(), ControlCommand::AliveOdds(0.4));
        assert_eq!("t 50".parse::<ControlCommand>().unwrap(), ControlCommand::TickInterval(50));
        assert_eq!("s".parse::<ControlCommand>().unwrap(), ControlCommand::Status);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for line in ["", "q", "c 3", "c 3 four", "w -1", "p now", "t"] {
            assert!(
                matches!(line.parse::<ControlCommand>(), Err(Error::Config(_))),
                "{:?} should not parse",
                line
            );
        }
    }

    #[test]
    fn test_pause_and_resume() {
        let mut session = test_session();
        apply_control_command(&mut session, ControlCommand::TogglePause).unwrap();
        assert!(session.is_running());
        apply_control_command(&mut session, ControlCommand::TogglePause).unwrap();
        assert!(!session.is_running());
    }

    #[test]
    fn test_click_commands_toggle_cells() {
        let mut session = test_session();
        apply_control_command(&mut session, ControlCommand::Click { col: 2, row: 1 }).unwrap();
        apply_control_command(&mut session, ControlCommand::ClickPixel { x: 95.0, y: 59.0 })
            .unwrap();

        assert!(session.universe().cell(2, 1).unwrap().is_alive());
        assert!(session.universe().cell(9, 5).unwrap().is_alive());
        assert_eq!(session.universe().live_count(), 2);

        let result = apply_control_command(&mut session, ControlCommand::Click { col: 10, row: 0 });
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_resize_and_odds_rebuild_universe() {
        let mut session = test_session();
        session.set_running(true);

        apply_control_command(&mut session, ControlCommand::Width(20)).unwrap();
        apply_control_command(&mut session, ControlCommand::Height(4)).unwrap();
        apply_control_command(&mut session, ControlCommand::AliveOdds(1.0)).unwrap();

        assert_eq!(session.universe().width(), 20);
        assert_eq!(session.universe().height(), 4);
        assert_eq!(session.universe().live_count(), 80);
        assert!(session.is_running());

        let result = apply_control_command(&mut session, ControlCommand::Width(0));
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
        assert_eq!(session.universe().width(), 20);
    }

    #[test]
    fn test_reset_pauses() {
        let mut session = test_session();
        session.set_running(true);
        session.step();

        apply_control_command(&mut session, ControlCommand::Reset).unwrap();
        assert!(!session.is_running());
        assert_eq!(session.universe().generation(), 0);
    }

    #[test]
    fn test_tick_interval_command() {
        let mut session = test_session();
        let outcome =
            apply_control_command(&mut session, ControlCommand::TickInterval(40)).unwrap();
        assert_eq!(outcome, CommandOutcome::IntervalChanged(Duration::from_millis(40)));

        assert!(apply_control_command(&mut session, ControlCommand::TickInterval(0)).is_err());
        assert_eq!(session.tick_interval(), Duration::from_millis(40));

        let outcome = apply_control_command(&mut session, ControlCommand::Status).unwrap();
        assert_eq!(outcome, CommandOutcome::Applied);
    }
}
