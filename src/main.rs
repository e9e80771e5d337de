//! ISS pass tracker binary.
//!
//! ```text
//! iss-matrix [--fixture] [--once] [--list] [--config PATH]
//!            [--display terminal|framebuffer|window] [--device PATH]
//! ```
//!
//! Reads the observer location from `config.json` (or `--config`), picks a
//! pass source and a display sink, and runs the phase machine until an error
//! occurs. The board is cleared on the way out whatever the outcome.
//!
//! Logging goes through `env_logger` at `info` by default; set `RUST_LOG` to
//! change it (for example `RUST_LOG=debug` to see every poll). Ctrl-C stops
//! the tracker at its next tick and blanks the board before exiting.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use iss_matrix::clock::SystemClock;
use iss_matrix::display::{DEFAULT_DEVICE, DisplayGuard, DisplaySink, FramebufferDisplay, Rotation, TerminalDisplay};
use iss_matrix::error::TrackerError;
use iss_matrix::location::Config;
use iss_matrix::source::{FixtureSource, HeavensAbove, PassSource};
use iss_matrix::state::PassTracker;

const DEFAULT_CONFIG: &str = "config.json";

const USAGE: &str = "usage: iss-matrix [--fixture] [--once] [--list] [--config PATH] \
                     [--display terminal|framebuffer|window] [--device PATH]";

// =============================================================================
// Command Line
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Sink {
    #[default]
    Terminal,
    Framebuffer,
    Window,
}

impl Sink {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "terminal" => Ok(Self::Terminal),
            "framebuffer" => Ok(Self::Framebuffer),
            "window" => Ok(Self::Window),
            other => bail!("unknown display {other:?}\n{USAGE}"),
        }
    }
}

#[derive(Debug)]
struct Args {
    fixture: bool,
    once: bool,
    list: bool,
    config: PathBuf,
    sink: Sink,
    device: PathBuf,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self {
            fixture: false,
            once: false,
            list: false,
            config: PathBuf::from(DEFAULT_CONFIG),
            sink: Sink::default(),
            device: PathBuf::from(DEFAULT_DEVICE),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixture" => parsed.fixture = true,
                "--once" => parsed.once = true,
                "--list" => parsed.list = true,
                "--config" => parsed.config = value(&mut args, "--config")?.into(),
                "--display" => parsed.sink = Sink::parse(&value(&mut args, "--display")?)?,
                "--device" => parsed.device = value(&mut args, "--device")?.into(),
                "-h" | "--help" => {
                    println!("{USAGE}");
                    std::process::exit(0);
                }
                other => bail!("unexpected argument {other:?}\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().with_context(|| format!("{flag} needs a value\n{USAGE}"))
}

// =============================================================================
// Setup
// =============================================================================

fn load_config(args: &Args) -> Result<Config> {
    if !args.config.exists() {
        log::warn!("{} not found, using the unspecified location", args.config.display());
        return Ok(Config::unspecified());
    }
    Config::load(&args.config).with_context(|| format!("reading {}", args.config.display()))
}

fn open_source(args: &Args, config: &Config) -> Box<dyn PassSource> {
    if args.fixture {
        Box::new(FixtureSource::new(SystemClock))
    } else {
        Box::new(HeavensAbove::new(config.location.clone(), SystemClock))
    }
}

fn open_sink(args: &Args, rotation: Rotation) -> Result<Box<dyn DisplaySink>> {
    match args.sink {
        Sink::Terminal => Ok(Box::new(TerminalDisplay::stdout(rotation))),
        Sink::Framebuffer => {
            let display = FramebufferDisplay::open(&args.device, rotation)
                .with_context(|| format!("opening {}", args.device.display()))?;
            Ok(Box::new(display))
        }
        #[cfg(feature = "simulator")]
        Sink::Window => Ok(Box::new(iss_matrix::display::WindowDisplay::new(rotation))),
        #[cfg(not(feature = "simulator"))]
        Sink::Window => bail!("window display needs the `simulator` feature"),
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    env_logger::Builder::new().filter_level(log::LevelFilter::Info).parse_default_env().init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = load_config(&args)?;
    let mut source = open_source(&args, &config);
    log::info!(
        "{} passes over {} ({}, {}), board rotated {} degrees",
        source.name(),
        config.location.name,
        config.location.lat,
        config.location.lng,
        config.rotation.degrees()
    );

    if args.list {
        let passes = source.list_visible_passes().context("listing passes")?;
        if passes.is_empty() {
            println!("no visible passes");
        }
        for pass in &passes {
            println!("{pass}");
        }
        return Ok(());
    }

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
        .context("installing Ctrl-C handler")?;

    let sink = DisplayGuard::new(open_sink(&args, config.rotation)?);
    let mut tracker = PassTracker::new(source, sink, SystemClock, config.timing()).with_stop(stop);

    let result = if args.once { tracker.run_cycle() } else { tracker.run() };
    if let Some(event) = tracker.events().last() {
        log::debug!("last event: {event}");
    }
    match result {
        Ok(()) => Ok(()),
        Err(TrackerError::Interrupted) => {
            log::info!("stopped, clearing the board");
            Ok(())
        }
        Err(e) => Err(e).context("tracking passes"),
    }
}
