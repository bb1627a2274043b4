use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::view::playback::MIN_PROGRESS_STEP;
use crate::view::{MapMode, PlaybackSettings};

pub const CATALOG_FILE_NAME: &str = "catalog.json";
const ASSETS_DIR_NAME: &str = "assets";

/// Where the dialect table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl CatalogSource {
    pub fn load(&self) -> Result<Catalog> {
        match self {
            CatalogSource::Builtin => Catalog::builtin().context("built-in catalog is invalid"),
            CatalogSource::File(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog from {:?}", path)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogSource,
    pub playback: PlaybackSettings,
    pub map_mode: MapMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::Builtin,
            playback: PlaybackSettings::default(),
            map_mode: MapMode::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the catalog source from an explicit file, an assets directory
    /// override, an `assets/catalog.json` above the binary or working directory,
    /// or the built-in table.
    pub fn resolve(catalog_file: Option<PathBuf>, assets_path: Option<PathBuf>) -> Result<Self> {
        let catalog = match (catalog_file, assets_path) {
            (Some(file), _) => CatalogSource::File(canonicalize_file(&file)?),
            (None, Some(dir)) => {
                ensure!(dir.is_dir(), "assets path {:?} is not a directory", dir);
                CatalogSource::File(canonicalize_file(&dir.join(CATALOG_FILE_NAME))?)
            }
            (None, None) => discover_catalog(),
        };
        info!(?catalog, "catalog source resolved");
        Ok(Self {
            catalog,
            ..Self::default()
        })
    }

    pub fn with_playback(mut self, tick_ms: u64, step: f32) -> Result<Self> {
        ensure!(tick_ms > 0, "tick interval must be positive, got {}", tick_ms);
        ensure!(
            step.is_finite() && step >= MIN_PROGRESS_STEP,
            "progress step must be at least {}, got {}",
            MIN_PROGRESS_STEP,
            step
        );
        self.playback = PlaybackSettings {
            tick_interval: Duration::from_millis(tick_ms),
            step,
        };
        Ok(self)
    }

    pub fn with_map_mode(mut self, mode: MapMode) -> Self {
        self.map_mode = mode;
        self
    }
}

/// First `assets/catalog.json` found walking up from the executable, then from
/// the working directory. Falls back to the compiled-in table.
fn discover_catalog() -> CatalogSource {
    let exe = std::env::current_exe()
        .map_err(|err| warn!(error = %err, "cannot locate executable"))
        .ok();
    let work_dir = std::env::current_dir().ok();
    let found = exe
        .iter()
        .chain(work_dir.iter())
        .flat_map(|start| start.ancestors())
        .map(|dir| dir.join(ASSETS_DIR_NAME).join(CATALOG_FILE_NAME))
        .find(|candidate| candidate.is_file());
    match found {
        Some(path) => CatalogSource::File(path),
        None => {
            debug!("no catalog file on disk; using built-in catalog");
            CatalogSource::Builtin
        }
    }
}

fn canonicalize_file(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve catalog file at {:?}", path))?;
    ensure!(canonical.is_file(), "catalog path {:?} is not a file", canonical);
    Ok(canonical)
}
