use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::catalog::Catalog;

pub struct DialectTable<'a> {
    pub catalog: &'a Catalog,
    pub active: Option<&'a str>,
}

impl<'a> DialectTable<'a> {
    /// Returns the id of a dialect the user clicked.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<String> {
        let mut clicked = None;
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Dialect");
                });
                header.col(|ui| {
                    ui.strong("Region");
                });
            })
            .body(|mut body| {
                for dialect in self.catalog.dialects() {
                    let selected = self.active == Some(dialect.id.as_str());
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            if ui.selectable_label(selected, dialect.name.as_str()).clicked() {
                                clicked = Some(dialect.id.clone());
                            }
                        });
                        row.col(|ui| {
                            ui.label(format!("{} ({})", dialect.region, dialect.language));
                        });
                    });
                }
            });
        clicked
    }
}
