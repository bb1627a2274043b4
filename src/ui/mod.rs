pub mod components;
pub mod screens;

use anyhow::{anyhow, Result};
use eframe::NativeOptions;
use tracing::{info, warn};

use crate::runtime::AtlasRuntime;

const WINDOW_TITLE: &str = "Swiss Dialect Atlas";

pub fn launch_ui(runtime: AtlasRuntime) -> Result<()> {
    info!(
        dialects = runtime.catalog().len(),
        "launching atlas window"
    );
    let options = NativeOptions::default();
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            if let Err(err) = runtime.controller().set_waker(move || ctx.request_repaint()) {
                warn!(error = %err, "runtime gone before the window opened");
            }
            Box::new(screens::atlas::AtlasApp::new(runtime))
        }),
    )
    .map_err(|err| anyhow!("atlas window failed: {}", err))
}
