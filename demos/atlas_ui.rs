use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use swiss_dialects::catalog::Catalog;
use swiss_dialects::runtime::AtlasRuntime;
use swiss_dialects::ui::launch_ui;
use swiss_dialects::view::{MapMode, PlaybackSettings, ViewEvent};

/// Opens the atlas in physical mode with Bärndütsch already selected and a
/// slower playback so the progress bar is easy to watch.
fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let catalog = Arc::new(Catalog::builtin()?);
    let settings = PlaybackSettings {
        tick_interval: Duration::from_millis(100),
        ..PlaybackSettings::default()
    };
    let runtime = AtlasRuntime::spawn(catalog, settings, MapMode::Physical)?;
    let controller = runtime.controller();
    controller.send(ViewEvent::SelectDialect("be".to_string()))?;
    controller.send(ViewEvent::TogglePlayback)?;

    launch_ui(runtime)
}
