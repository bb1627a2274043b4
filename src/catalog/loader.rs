//! Catalog loading and load-time validation.
//!
//! The JSON asset is deserialized into raw records first, then checked and
//! converted into the immutable [`Catalog`]. Sample coverage is checked
//! here so nothing downstream has to handle a missing category.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{Catalog, Category, DialectRecord, Language, MarkerPosition, Region, Sample, Samples};
use crate::error::{CatalogError, Result};

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Catalog document as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub dialects: Vec<RawDialect>,
    #[serde(default)]
    pub regions: Vec<RawRegion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDialect {
    pub id: String,
    pub name: String,
    pub region: String,
    pub language: Language,
    pub position: MarkerPosition,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub samples: BTreeMap<Category, Sample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRegion {
    pub id: String,
    pub label: String,
    pub language: Language,
    pub outline: Vec<[f32; 2]>,
}

impl RawCatalog {
    pub fn validate(self) -> Result<Catalog> {
        if self.dialects.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        let mut dialects = Vec::with_capacity(self.dialects.len());
        for (index, raw) in self.dialects.into_iter().enumerate() {
            if raw.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(index));
            }
            if !seen.insert(raw.id.clone()) {
                return Err(CatalogError::DuplicateDialect(raw.id));
            }
            dialects.push(raw.into_record()?);
        }

        let mut seen = HashSet::new();
        let mut regions = Vec::with_capacity(self.regions.len());
        for raw in self.regions {
            if !seen.insert(raw.id.clone()) {
                return Err(CatalogError::DuplicateRegion(raw.id));
            }
            regions.push(raw.into_region()?);
        }
        Ok(Catalog::from_parts(dialects, regions))
    }
}

impl RawDialect {
    fn into_record(mut self) -> Result<DialectRecord> {
        if !self.position.in_map_bounds() {
            return Err(CatalogError::MarkerOutOfRange {
                dialect: self.id,
                x: self.position.x,
                y: self.position.y,
            });
        }
        let samples = Samples::new(
            take_sample(&self.id, &mut self.samples, Category::Greeting)?,
            take_sample(&self.id, &mut self.samples, Category::Weather)?,
            take_sample(&self.id, &mut self.samples, Category::Numbers)?,
            take_sample(&self.id, &mut self.samples, Category::Proverb)?,
            take_sample(&self.id, &mut self.samples, Category::Food)?,
        );
        Ok(DialectRecord {
            id: self.id,
            name: self.name,
            region: self.region,
            language: self.language,
            position: self.position,
            description: self.description,
            samples,
        })
    }
}

fn take_sample(
    dialect: &str,
    samples: &mut BTreeMap<Category, Sample>,
    category: Category,
) -> Result<Sample> {
    samples
        .remove(&category)
        .ok_or_else(|| CatalogError::MissingSample {
            dialect: dialect.to_string(),
            category,
        })
}

impl RawRegion {
    fn into_region(self) -> Result<Region> {
        let outline: Vec<MarkerPosition> = self.outline.into_iter().map(Into::into).collect();
        if outline.len() < 3 || !outline.iter().all(MarkerPosition::in_map_bounds) {
            return Err(CatalogError::InvalidOutline(self.id));
        }
        Ok(Region {
            id: self.id,
            label: self.label,
            language: self.language,
            outline,
        })
    }
}

impl Catalog {
    /// Catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        debug!("parsing built-in catalog");
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let document: RawCatalog = serde_json::from_str(raw)?;
        let catalog = document.validate()?;
        info!(
            dialects = catalog.dialects().len(),
            regions = catalog.regions().len(),
            "catalog validated"
        );
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading catalog file");
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}
