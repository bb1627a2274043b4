use eframe::egui;

use super::to_color32;
use crate::catalog::Language;
use crate::view::palette::marker_color;
use crate::view::MapMode;

#[derive(Default, Debug)]
pub struct ControlStripOutput {
    pub set_mode: Option<MapMode>,
}

pub struct ControlStrip<'a> {
    pub mode: MapMode,
    pub hovered_region: Option<&'a str>,
}

impl<'a> ControlStrip<'a> {
    pub fn show(&self, ui: &mut egui::Ui) -> ControlStripOutput {
        let mut output = ControlStripOutput::default();
        ui.horizontal(|ui| {
            output.set_mode = mode_toggle(ui, self.mode);
            ui.separator();
            language_legend(ui);
            ui.separator();
            hovered_badge(ui, self.hovered_region);
        });
        output
    }
}

fn mode_toggle(ui: &mut egui::Ui, current: MapMode) -> Option<MapMode> {
    ui.label("Map:");
    let mut picked = None;
    for mode in MapMode::ALL {
        let response = ui
            .selectable_label(current == mode, mode.label())
            .on_hover_text(match mode {
                MapMode::Administrative => "Color regions by language family.",
                MapMode::Physical => "Color regions by terrain.",
            });
        if response.clicked() && mode != current {
            picked = Some(mode);
        }
    }
    picked
}

fn language_legend(ui: &mut egui::Ui) {
    for language in Language::ALL {
        ui.colored_label(to_color32(marker_color(language)), language.label());
    }
}

fn hovered_badge(ui: &mut egui::Ui, hovered: Option<&str>) {
    match hovered {
        Some(label) => ui.label(format!("Region: {}", label)),
        None => ui.weak("Hover a region"),
    };
}
