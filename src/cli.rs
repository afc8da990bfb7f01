//! Command-line interface
//!
//! Subcommands for the scanner workflow: listing ports, querying and
//! homing the stage, interactive jogging, and running a full scan pass.
//! The scan core never touches the serial port, so `scan --dry-run`
//! prints the exact coordinate stream a real pass would drive.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use chipscan_core::Units;
use chipscan_device::{detect_stage_port, list_ports, HomeAxes, SerialTransport, Stage};
use chipscan_pattern::{Region, ScanPattern};

use crate::config::Config;

/// Automated XY surface scanner for G-code positioning stages
#[derive(Debug, Parser)]
#[command(name = "chipscan", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serial port, overriding the configured one
    #[arg(long, global = true)]
    port: Option<String>,

    /// Baud rate, overriding the configured one
    #[arg(long, global = true)]
    baud: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List available serial ports
    Ports,
    /// Query the device-reported position
    Position,
    /// Home the stage (bypasses travel limits)
    Home {
        /// Home Z as well as X and Y
        #[arg(long)]
        all: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Drive the stage interactively with the keyboard
    Jog,
    /// Run one scan pass over a rectangular region
    Scan {
        /// X coordinate of the home corner
        #[arg(long)]
        home_x: f64,
        /// Y coordinate of the home corner
        #[arg(long)]
        home_y: f64,
        /// X coordinate of the opposite corner
        #[arg(long)]
        end_x: f64,
        /// Y coordinate of the opposite corner
        #[arg(long)]
        end_y: f64,
        /// Grid step size (defaults to the configured scan step)
        #[arg(long)]
        step: Option<f64>,
        /// Traversal pattern (defaults to the configured one)
        #[arg(long, value_enum)]
        pattern: Option<PatternArg>,
        /// Seed for the random pattern
        #[arg(long)]
        seed: Option<u64>,
        /// Dwell time at each point in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,
        /// Device units to select before scanning
        #[arg(long)]
        units: Option<Units>,
        /// Print the coordinate stream instead of driving the stage
        #[arg(long)]
        dry_run: bool,
    },
}

/// Traversal pattern selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PatternArg {
    Horizontal,
    Vertical,
    SpiralIn,
    SpiralOut,
    Random,
}

impl PatternArg {
    fn to_pattern(self, seed: Option<u64>) -> ScanPattern {
        match self {
            Self::Horizontal => ScanPattern::Horizontal,
            Self::Vertical => ScanPattern::Vertical,
            Self::SpiralIn => ScanPattern::SpiralIn,
            Self::SpiralOut => ScanPattern::SpiralOut,
            Self::Random => ScanPattern::Random { seed },
        }
    }
}

/// Parse arguments and dispatch the selected subcommand.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Ports => run_ports(),
        Commands::Position => {
            let mut stage = connect(&cli, &config)?;
            let pos = stage.current_position()?;
            println!("{}", pos);
            Ok(())
        }
        Commands::Home { all, yes } => run_home(&cli, &config, all, yes),
        Commands::Jog => run_jog(&cli, &config),
        Commands::Scan {
            home_x,
            home_y,
            end_x,
            end_y,
            step,
            pattern,
            seed,
            settle_ms,
            units,
            dry_run,
        } => {
            let step = step.unwrap_or(config.scan.step);
            let pattern = match pattern {
                Some(arg) => arg.to_pattern(seed),
                None => config.scan.pattern,
            };
            let settle = Duration::from_millis(settle_ms.unwrap_or(config.scan.settle_ms));
            let region = Region::new((home_x, home_y), (end_x, end_y), step)?;
            run_scan(&cli, &config, region, pattern, settle, units, dry_run)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli.config.clone().or_else(Config::default_path);
    match path {
        Some(path) if path.exists() => Config::load_from_file(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        Some(_) | None => Ok(Config::default()),
    }
}

fn connect(cli: &Cli, config: &Config) -> anyhow::Result<Stage> {
    let port = match cli.port.as_deref().unwrap_or(&config.connection.port) {
        "Auto" | "auto" => detect_stage_port()?.port_name,
        name => name.to_string(),
    };
    let baud = cli.baud.unwrap_or(config.connection.baud_rate);
    let transport = SerialTransport::open(&port, baud)?
        .with_timeout(Duration::from_millis(config.connection.timeout_ms));
    Ok(Stage::new(Box::new(transport), config.limits))
}

fn run_ports() -> anyhow::Result<()> {
    let ports = list_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }
    for port in ports {
        let marker = if port.is_stage_bridge() { " (stage)" } else { "" };
        println!("{}  {}{}", port.port_name, port.description, marker);
    }
    Ok(())
}

fn run_home(cli: &Cli, config: &Config, all: bool, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm("Homing bypasses the travel limits. Continue? [y/N] ")? {
        println!("Aborted");
        return Ok(());
    }
    let mut stage = connect(cli, config)?;
    let axes = if all { HomeAxes::Xyz } else { HomeAxes::Xy };
    let pos = stage.home(axes)?;
    println!("Homed, now at {}", pos);
    Ok(())
}

fn run_scan(
    cli: &Cli,
    config: &Config,
    region: Region,
    pattern: ScanPattern,
    settle: Duration,
    units: Option<Units>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let total = region.len();
    info!(%pattern, total, "starting scan pass");

    if dry_run {
        for point in pattern.points(&region) {
            println!("{}", point);
        }
        return Ok(());
    }

    let mut stage = connect(cli, config)?;
    if let Some(units) = units {
        stage.set_units(units)?;
    }
    let z = stage.current_position()?.z;
    for (index, point) in pattern.points(&region).enumerate() {
        let pos = stage.move_to(point.x, point.y, z)?;
        info!(point = index + 1, total, "{}", pos);
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }
    }
    info!("scan pass complete");
    Ok(())
}

fn run_jog(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    use crossterm::terminal;

    let mut stage = connect(cli, config)?;
    println!("Jog mode: arrows move X/Y, u/d move Z, s sets the step, Esc exits");
    println!("{}", stage.current_position()?);

    terminal::enable_raw_mode()?;
    let result = jog_loop(&mut stage);
    terminal::disable_raw_mode()?;
    result
}

fn jog_loop(stage: &mut Stage) -> anyhow::Result<()> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind};
    use crossterm::terminal;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let moved = match key.code {
            KeyCode::Esc => break,
            KeyCode::Left => Some(stage.jog(-1, 0, 0)?),
            KeyCode::Right => Some(stage.jog(1, 0, 0)?),
            KeyCode::Down => Some(stage.jog(0, -1, 0)?),
            KeyCode::Up => Some(stage.jog(0, 1, 0)?),
            KeyCode::Char('u') => Some(stage.jog(0, 0, 1)?),
            KeyCode::Char('d') => Some(stage.jog(0, 0, -1)?),
            KeyCode::Char('s') => {
                // Line input needs the terminal back in cooked mode.
                terminal::disable_raw_mode()?;
                let outcome = prompt_step(stage);
                terminal::enable_raw_mode()?;
                outcome?;
                None
            }
            _ => None,
        };
        if let Some(pos) = moved {
            print!("{}\r\n", pos);
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}

fn prompt_step(stage: &mut Stage) -> anyhow::Result<()> {
    print!("Enter desired step: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    match line.trim().parse::<f64>() {
        Ok(step) => match stage.set_step(step) {
            Ok(()) => println!("Step set to {}", step),
            Err(e) => println!("{}", e),
        },
        Err(_) => println!("Step value must be a number"),
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_scan_command() {
        let cli = Cli::parse_from([
            "chipscan", "scan", "--home-x", "0", "--home-y", "0", "--end-x", "10", "--end-y",
            "5", "--step", "0.5", "--pattern", "spiral-in", "--dry-run",
        ]);
        match cli.command {
            Commands::Scan {
                end_x,
                step,
                pattern,
                dry_run,
                ..
            } => {
                assert_eq!(end_x, 10.0);
                assert_eq!(step, Some(0.5));
                assert_eq!(pattern, Some(PatternArg::SpiralIn));
                assert!(dry_run);
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_pattern_arg_maps_seed_only_to_random() {
        assert_eq!(
            PatternArg::Random.to_pattern(Some(9)),
            ScanPattern::Random { seed: Some(9) }
        );
        assert_eq!(
            PatternArg::Horizontal.to_pattern(Some(9)),
            ScanPattern::Horizontal
        );
    }
}
