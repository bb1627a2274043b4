pub mod control_strip;
pub mod detail_panel;
pub mod dialect_table;
pub mod map_view;

use eframe::egui::Color32;

use crate::view::palette::Rgb;

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}
