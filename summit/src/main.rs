//! summit: watch a breadth-first search climb an elevation map.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use summit::{HikeConfig, HikeModel, MAX_BUDGET, SearchMode, run_headless};
use summit_core::{App, AppConfig};
use summit_crossterm::CrosstermDriver;
use summit_paths::HeightMap;

/// Watch a breadth-first search climb an elevation map
#[derive(Debug, Parser)]
#[command(name = "summit", version)]
struct Cli {
    /// Map file: rows of `a`-`z` with one `S` (start) and one `E` (end)
    map: PathBuf,

    /// Cells visited per tick
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_BUDGET as i64)
    )]
    budget: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Search from every lowest cell instead of `S` only
    #[arg(long)]
    any_low: bool,

    /// Start with the search paused
    #[arg(long)]
    paused: bool,

    /// Run to completion and print a report instead of opening the viewer
    #[arg(long)]
    headless: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> HikeConfig {
        HikeConfig {
            budget: self.budget as usize,
            tick: Duration::from_millis(self.tick_ms),
            mode: if self.any_low {
                SearchMode::AnyLowest
            } else {
                SearchMode::FromStart
            },
            paused: self.paused,
        }
    }
}

/// Log to stderr. The viewer owns the terminal, so it stays quiet unless
/// asked; headless runs report progress at `info`.
fn init_logging(verbose: u8, headless: bool) {
    let default = if headless { "info" } else { "warn" };
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let map = HeightMap::load(&cli.map)?;
    let config = cli.config();

    if cli.headless {
        println!("{}", run_headless(&map, &config));
        return Ok(());
    }

    let model = HikeModel::new(map, &config);
    let (width, height) = model.screen_size();
    let driver = CrosstermDriver::new().with_tick(config.tick);
    let mut app = App::new(AppConfig {
        model,
        driver,
        width,
        height,
    });
    app.run()?;

    let stepper = app.model().stepper();
    log::info!(
        "left the viewer in state '{}' after {} ticks",
        stepper.state().label(),
        app.model().ticks()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.headless);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("summit: {e}");
            ExitCode::FAILURE
        }
    }
}
