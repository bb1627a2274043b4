use std::sync::Arc;

use eframe::egui;
use tracing::warn;

use crate::catalog::Catalog;
use crate::runtime::{AtlasController, AtlasRuntime};
use crate::ui::components::control_strip::ControlStrip;
use crate::ui::components::detail_panel::DetailPanel;
use crate::ui::components::dialect_table::DialectTable;
use crate::ui::components::map_view::MapView;
use crate::view::{ViewEvent, ViewState};

pub struct AtlasApp {
    runtime: AtlasRuntime,
    controller: AtlasController,
    catalog: Arc<Catalog>,
    state: ViewState,
    last_hover: Option<String>,
}

impl AtlasApp {
    pub fn new(runtime: AtlasRuntime) -> Self {
        Self {
            controller: runtime.controller(),
            catalog: runtime.catalog().clone(),
            state: runtime.initial_snapshot(),
            last_hover: None,
            runtime,
        }
    }

    fn sync(&mut self) {
        if let Some(latest) = self.runtime.drain_snapshots().pop() {
            self.state = latest;
        }
    }

    fn send(&self, event: ViewEvent) {
        if let Err(err) = self.controller.send(event) {
            warn!(error = %err, "dropping view event");
        }
    }

    fn show_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            let output = ControlStrip {
                mode: self.state.map_mode,
                hovered_region: self.state.hovered_region_label.as_deref(),
            }
            .show(ui);
            if let Some(mode) = output.set_mode {
                self.send(ViewEvent::SetMapMode(mode));
            }
        });
    }

    fn show_dialect_list(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("dialects")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Dialects");
                let clicked = DialectTable {
                    catalog: &self.catalog,
                    active: self.state.active_dialect_id.as_deref(),
                }
                .show(ui);
                if let Some(id) = clicked {
                    self.send(ViewEvent::SelectDialect(id));
                }
            });
    }

    fn show_detail(&mut self, ctx: &egui::Context) {
        let Some(dialect) = self
            .state
            .active_dialect_id
            .as_deref()
            .and_then(|id| self.catalog.get(id))
        else {
            return;
        };
        let mut events = Vec::new();
        egui::SidePanel::right("detail")
            .min_width(280.0)
            .show(ctx, |ui| {
                let output = DetailPanel {
                    dialect,
                    state: &self.state,
                }
                .show(ui);
                if output.close {
                    events.push(ViewEvent::DeselectDialect);
                }
                if let Some(category) = output.category {
                    events.push(ViewEvent::SetCategory(category));
                }
                if output.toggle_playback {
                    events.push(ViewEvent::TogglePlayback);
                }
            });
        for event in events {
            self.send(event);
        }
    }

    fn show_map(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let output = MapView {
                catalog: &self.catalog,
                state: &self.state,
            }
            .show(ui);
            if output.hovered_region != self.last_hover {
                self.last_hover = output.hovered_region.clone();
                self.send(ViewEvent::SetHover(output.hovered_region));
            }
            if let Some(id) = output.clicked_dialect {
                self.send(ViewEvent::SelectDialect(id));
            }
        });
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync();
        self.show_top_panel(ctx);
        self.show_dialect_list(ctx);
        self.show_detail(ctx);
        self.show_map(ctx);
        if self.state.playback.is_playing {
            ctx.request_repaint_after(self.runtime.settings().tick_interval);
        }
    }
}
