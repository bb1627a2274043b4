use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::AppConfig;
use crate::runtime::{AtlasEngine, ManualClock};
use crate::view::playback::{DEFAULT_PROGRESS_STEP, DEFAULT_TICK_INTERVAL_MS};
use crate::view::{MapMode, ViewEvent, ViewState};

#[derive(Parser, Debug)]
#[command(
    name = "swiss-dialects",
    version,
    about = "Interactive map of Swiss dialects with sample phrases"
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive map window (default).
    Show(ShowArgs),
    /// Print every dialect in the catalog.
    List(CatalogArgs),
    /// Load and validate a catalog file.
    Validate(CatalogArgs),
    /// Run events against a virtual clock and print the final view state as JSON.
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog JSON file to load instead of the default.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
    /// Optional override for the assets directory holding catalog.json.
    #[arg(long = "assets-path", value_name = "DIR", conflicts_with = "catalog")]
    pub assets_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PlaybackArgs {
    /// Interval between simulated playback ticks in milliseconds.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_ms: u64,
    /// Progress added per tick, in percent (at least 0.01).
    #[arg(long, default_value_t = DEFAULT_PROGRESS_STEP)]
    pub step: f32,
}

impl Default for PlaybackArgs {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_INTERVAL_MS,
            step: DEFAULT_PROGRESS_STEP,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    #[command(flatten)]
    pub playback: PlaybackArgs,
    /// Initial map coloring: administrative or physical.
    #[arg(long = "map-mode", default_value_t = MapMode::Administrative)]
    pub map_mode: MapMode,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    #[command(flatten)]
    pub playback: PlaybackArgs,
    /// Events such as select:zh, category:weather, toggle, tick, wait:500.
    #[arg(value_name = "EVENT", required = true)]
    pub steps: Vec<ReplayStep>,
}

/// One replay instruction: a view event, or a virtual clock advance.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayStep {
    Event(ViewEvent),
    Wait(u64),
}

impl std::str::FromStr for ReplayStep {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(ms) = s.strip_prefix("wait:") {
            return ms
                .trim()
                .parse()
                .map(ReplayStep::Wait)
                .map_err(|err| format!("invalid wait duration '{}': {}", ms, err));
        }
        s.parse::<ViewEvent>()
            .map(ReplayStep::Event)
            .map_err(|err| err.to_string())
    }
}

impl CatalogArgs {
    pub fn app_config(&self) -> Result<AppConfig> {
        AppConfig::resolve(self.catalog.clone(), self.assets_path.clone())
    }
}

impl ShowArgs {
    pub fn app_config(&self) -> Result<AppConfig> {
        Ok(self
            .catalog
            .app_config()?
            .with_playback(self.playback.tick_ms, self.playback.step)?
            .with_map_mode(self.map_mode))
    }
}

impl ReplayArgs {
    pub fn app_config(&self) -> Result<AppConfig> {
        self.catalog
            .app_config()?
            .with_playback(self.playback.tick_ms, self.playback.step)
    }

    /// Replay the steps on a virtual clock and return the final state.
    pub fn run(&self) -> Result<ViewState> {
        let config = self.app_config()?;
        let catalog = Arc::new(config.catalog.load()?);
        let clock = ManualClock::new();
        let mut engine = AtlasEngine::new(catalog, config.playback, clock.clone());
        for step in &self.steps {
            match step {
                ReplayStep::Event(event) => {
                    engine.dispatch(event.clone());
                }
                ReplayStep::Wait(ms) => {
                    clock.advance(Duration::from_millis(*ms));
                    let fired = engine.pump();
                    debug!(ms, fired, "virtual clock advanced");
                }
            }
        }
        Ok(engine.snapshot())
    }
}
