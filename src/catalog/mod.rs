//! Static dialect catalog: dialect records, sample phrases and map regions.

pub mod geometry;
pub mod loader;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;

pub use geometry::MarkerPosition;

/// Language family a dialect or map region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    German,
    French,
    Italian,
    Romansh,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::German,
        Language::French,
        Language::Italian,
        Language::Romansh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::German => "German",
            Language::French => "French",
            Language::Italian => "Italian",
            Language::Romansh => "Romansh",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError::new("language", s))
    }
}

/// Topic under which every dialect carries exactly one sample phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greeting,
    Weather,
    Numbers,
    Proverb,
    Food,
}

impl Category {
    /// Display order of the category buttons.
    pub const ALL: [Category; 5] = [
        Category::Greeting,
        Category::Weather,
        Category::Numbers,
        Category::Proverb,
        Category::Food,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Greeting => "Greeting",
            Category::Weather => "Weather",
            Category::Numbers => "Numbers",
            Category::Proverb => "Proverb",
            Category::Food => "Food",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError::new("category", s))
    }
}

/// One spoken sample phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub text: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
}

/// Sample phrases of one dialect, one per [`Category`].
///
/// Every category has a field, so lookups cannot miss.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    greeting: Sample,
    weather: Sample,
    numbers: Sample,
    proverb: Sample,
    food: Sample,
}

impl Samples {
    pub fn new(
        greeting: Sample,
        weather: Sample,
        numbers: Sample,
        proverb: Sample,
        food: Sample,
    ) -> Self {
        Self {
            greeting,
            weather,
            numbers,
            proverb,
            food,
        }
    }

    pub fn get(&self, category: Category) -> &Sample {
        match category {
            Category::Greeting => &self.greeting,
            Category::Weather => &self.weather,
            Category::Numbers => &self.numbers,
            Category::Proverb => &self.proverb,
            Category::Food => &self.food,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Sample)> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// A named regional speech variety.
#[derive(Debug, Clone, PartialEq)]
pub struct DialectRecord {
    pub id: String,
    pub name: String,
    pub region: String,
    pub language: Language,
    pub position: MarkerPosition,
    pub description: String,
    pub samples: Samples,
}

impl DialectRecord {
    pub fn sample(&self, category: Category) -> &Sample {
        self.samples.get(category)
    }
}

/// A filled area of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: String,
    pub label: String,
    pub language: Language,
    pub outline: Vec<MarkerPosition>,
}

impl Region {
    pub fn contains(&self, point: MarkerPosition) -> bool {
        geometry::polygon_contains(&self.outline, point)
    }
}

/// Immutable table of dialects and map regions, validated once at load.
#[derive(Debug, Clone)]
pub struct Catalog {
    dialects: Vec<DialectRecord>,
    regions: Vec<Region>,
}

impl Catalog {
    pub(crate) fn from_parts(dialects: Vec<DialectRecord>, regions: Vec<Region>) -> Self {
        Self { dialects, regions }
    }

    pub fn get(&self, id: &str) -> Option<&DialectRecord> {
        self.dialects.iter().find(|dialect| dialect.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn dialects(&self) -> &[DialectRecord] {
        &self.dialects
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// First region whose outline contains `point`.
    pub fn region_at(&self, point: MarkerPosition) -> Option<&Region> {
        self.regions.iter().find(|region| region.contains(point))
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}
