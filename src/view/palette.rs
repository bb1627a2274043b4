//! Region fill colors for both map modes.
//!
//! Each mode is an independent lookup table. Administrative colors depend on
//! the language only, physical colors on the region id only.

use serde::Serialize;

use super::MapMode;
use crate::catalog::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub trait RegionPalette {
    fn color(&self, region_id: &str, language: Language) -> Rgb;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdministrativePalette;

#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalPalette;

const ADMINISTRATIVE: [(Language, Rgb); 4] = [
    (Language::German, Rgb(0xef, 0x44, 0x44)),
    (Language::French, Rgb(0x3b, 0x82, 0xf6)),
    (Language::Italian, Rgb(0x22, 0xc5, 0x5e)),
    (Language::Romansh, Rgb(0xea, 0xb3, 0x08)),
];

const PHYSICAL: [(&str, Rgb); 4] = [
    // Midway between plateau green and alpine grey; kept as the simplified blend.
    ("deutschschweiz", Rgb(0x9a, 0xa8, 0x7c)),
    ("romandie", Rgb(0x86, 0xb0, 0x6a)),
    ("graubuenden", Rgb(0xa8, 0xa2, 0x9e)),
    ("ticino", Rgb(0xc2, 0xb2, 0x80)),
];

const PHYSICAL_FALLBACK: Rgb = Rgb(0xd6, 0xd3, 0xd1);

impl RegionPalette for AdministrativePalette {
    fn color(&self, _region_id: &str, language: Language) -> Rgb {
        language_color(language)
    }
}

impl RegionPalette for PhysicalPalette {
    fn color(&self, region_id: &str, _language: Language) -> Rgb {
        PHYSICAL
            .iter()
            .find(|(id, _)| *id == region_id)
            .map(|(_, color)| *color)
            .unwrap_or(PHYSICAL_FALLBACK)
    }
}

fn language_color(language: Language) -> Rgb {
    ADMINISTRATIVE
        .iter()
        .find(|(candidate, _)| *candidate == language)
        .map(|(_, color)| *color)
        .unwrap_or(PHYSICAL_FALLBACK)
}

impl MapMode {
    pub fn palette(self) -> &'static dyn RegionPalette {
        match self {
            MapMode::Administrative => &AdministrativePalette,
            MapMode::Physical => &PhysicalPalette,
        }
    }
}

pub fn region_color(region_id: &str, language: Language, mode: MapMode) -> Rgb {
    mode.palette().color(region_id, language)
}

/// Dialect markers keep their language color in both modes.
pub fn marker_color(language: Language) -> Rgb {
    language_color(language)
}
