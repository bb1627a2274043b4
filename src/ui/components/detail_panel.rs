use eframe::egui;

use crate::catalog::{Category, DialectRecord};
use crate::view::ViewState;

#[derive(Default, Debug)]
pub struct DetailPanelOutput {
    pub category: Option<Category>,
    pub toggle_playback: bool,
    pub close: bool,
}

pub struct DetailPanel<'a> {
    pub dialect: &'a DialectRecord,
    pub state: &'a ViewState,
}

impl<'a> DetailPanel<'a> {
    pub fn show(&self, ui: &mut egui::Ui) -> DetailPanelOutput {
        let mut output = DetailPanelOutput::default();
        ui.horizontal(|ui| {
            ui.heading(self.dialect.name.as_str());
            if ui.button("Close").clicked() {
                output.close = true;
            }
        });
        ui.label(format!(
            "{} · {}",
            self.dialect.region, self.dialect.language
        ));
        ui.add_space(4.0);
        ui.label(self.dialect.description.as_str());
        ui.separator();
        output.category = category_tabs(ui, self.state.active_category);
        ui.add_space(8.0);
        self.show_sample(ui);
        ui.add_space(8.0);
        output.toggle_playback = self.player(ui);
        output
    }

    fn show_sample(&self, ui: &mut egui::Ui) {
        let sample = self.dialect.sample(self.state.active_category);
        ui.label(egui::RichText::new(sample.text.as_str()).size(18.0).strong());
        ui.label(egui::RichText::new(format!("\"{}\"", sample.translation)).italics());
        if let Some(phonetic) = &sample.phonetic {
            ui.weak(format!("[{}]", phonetic));
        }
    }

    fn player(&self, ui: &mut egui::Ui) -> bool {
        let playback = &self.state.playback;
        let mut clicked = false;
        ui.horizontal(|ui| {
            let label = if playback.is_playing {
                "Stop"
            } else {
                "Play sample"
            };
            clicked = ui
                .button(label)
                .on_hover_text("Simulated playback; no audio is produced.")
                .clicked();
            ui.add(egui::ProgressBar::new(playback.fraction()).show_percentage());
        });
        clicked
    }
}

fn category_tabs(ui: &mut egui::Ui, active: Category) -> Option<Category> {
    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for category in Category::ALL {
            if ui
                .selectable_label(active == category, category.label())
                .clicked()
            {
                picked = Some(category);
            }
        }
    });
    picked
}
