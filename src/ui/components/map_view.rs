use eframe::egui::{self, Color32, Stroke};

use super::to_color32;
use crate::catalog::geometry::triangulate;
use crate::catalog::{Catalog, DialectRecord, MarkerPosition};
use crate::view::palette::{marker_color, region_color};
use crate::view::ViewState;

const MARKER_RADIUS: f32 = 8.0;
const SELECTED_SCALE: f32 = 1.4;
/// Width over height of the drawn map.
const MAP_ASPECT: f32 = 1.6;

#[derive(Default, Debug)]
pub struct MapViewOutput {
    pub clicked_dialect: Option<String>,
    pub hovered_region: Option<String>,
}

pub struct MapView<'a> {
    pub catalog: &'a Catalog,
    pub state: &'a ViewState,
}

impl<'a> MapView<'a> {
    pub fn show(&self, ui: &mut egui::Ui) -> MapViewOutput {
        let available = ui.available_size();
        let width = available.x.min(available.y * MAP_ASPECT).max(1.0);
        let size = egui::vec2(width, width / MAP_ASPECT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let rect = response.rect;
        self.draw_regions(&painter, rect);
        self.draw_markers(&painter, rect);

        let mut output = MapViewOutput {
            hovered_region: response
                .hover_pos()
                .and_then(|pos| self.catalog.region_at(to_map(rect, pos)))
                .map(|region| region.label.clone()),
            ..MapViewOutput::default()
        };
        if response.clicked() {
            output.clicked_dialect = response
                .interact_pointer_pos()
                .and_then(|pos| marker_at(self.catalog, rect, pos))
                .map(|dialect| dialect.id.clone());
        }
        output
    }

    fn draw_regions(&self, painter: &egui::Painter, rect: egui::Rect) {
        for region in self.catalog.regions() {
            let fill = to_color32(region_color(&region.id, region.language, self.state.map_mode));
            let points: Vec<egui::Pos2> = region
                .outline
                .iter()
                .map(|point| to_screen(rect, *point))
                .collect();
            painter.add(region_mesh(&region.outline, &points, fill));
            painter.add(egui::Shape::closed_line(
                points,
                Stroke::new(1.5, Color32::WHITE),
            ));
        }
    }

    fn draw_markers(&self, painter: &egui::Painter, rect: egui::Rect) {
        let active = self.state.active_dialect_id.as_deref();
        for dialect in self.catalog.dialects() {
            let selected = active == Some(dialect.id.as_str());
            let center = to_screen(rect, dialect.position);
            let (radius, outline) = if selected {
                (MARKER_RADIUS * SELECTED_SCALE, Color32::BLACK)
            } else {
                (MARKER_RADIUS, Color32::WHITE)
            };
            painter.circle(
                center,
                radius,
                to_color32(marker_color(dialect.language)),
                Stroke::new(2.0, outline),
            );
            painter.text(
                center + egui::vec2(0.0, radius + 3.0),
                egui::Align2::CENTER_TOP,
                dialect.name.as_str(),
                egui::FontId::proportional(12.0),
                Color32::BLACK,
            );
        }
    }
}

/// Filled region; outlines may be concave, so the fill is triangulated.
fn region_mesh(outline: &[MarkerPosition], points: &[egui::Pos2], fill: Color32) -> egui::Shape {
    let mut mesh = egui::Mesh::default();
    for &pos in points {
        mesh.colored_vertex(pos, fill);
    }
    for [a, b, c] in triangulate(outline) {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    egui::Shape::mesh(mesh)
}

pub fn to_screen(rect: egui::Rect, point: MarkerPosition) -> egui::Pos2 {
    egui::pos2(
        rect.left() + point.x / 100.0 * rect.width(),
        rect.top() + point.y / 100.0 * rect.height(),
    )
}

pub fn to_map(rect: egui::Rect, pos: egui::Pos2) -> MarkerPosition {
    let width = rect.width().max(f32::EPSILON);
    let height = rect.height().max(f32::EPSILON);
    MarkerPosition::new(
        (pos.x - rect.left()) / width * 100.0,
        (pos.y - rect.top()) / height * 100.0,
    )
}

/// Closest marker within clicking distance of `pos`.
pub fn marker_at<'c>(
    catalog: &'c Catalog,
    rect: egui::Rect,
    pos: egui::Pos2,
) -> Option<&'c DialectRecord> {
    let reach = MARKER_RADIUS * SELECTED_SCALE;
    catalog
        .dialects()
        .iter()
        .map(|dialect| (dialect, to_screen(rect, dialect.position).distance(pos)))
        .filter(|(_, distance)| *distance <= reach)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(dialect, _)| dialect)
}
