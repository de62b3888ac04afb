use crate::domain::model::{parse_food_sources, Species};
use crate::utils::error::{EcoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// One catalog row as stored on disk. Food sources stay `;`-delimited.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    calories_provided: u64,
    calories_needed: u64,
    depth_range: String,
    temperature_range: String,
    #[serde(default)]
    food_sources: Option<String>,
}

impl From<CatalogRow> for Species {
    fn from(row: CatalogRow) -> Self {
        Species {
            name: row.name.trim().to_string(),
            calories_provided: row.calories_provided,
            calories_needed: row.calories_needed,
            depth_range: row.depth_range,
            temperature_range: row.temperature_range,
            food_sources: row
                .food_sources
                .as_deref()
                .map(parse_food_sources)
                .unwrap_or_default(),
        }
    }
}

/// Serializable listing of every species the player may pick from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogListing {
    pub count: usize,
    pub species: Vec<Species>,
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: Vec<Species>,
    by_name: HashMap<String, usize>,
}

impl SpeciesCatalog {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut catalog = Self::default();
        for row in csv_reader.deserialize::<CatalogRow>() {
            let species = Species::from(row?);
            if catalog.by_name.contains_key(&species.name) {
                return Err(EcoError::ProcessingError {
                    message: format!("species '{}' is listed twice in the catalog", species.name),
                });
            }
            catalog
                .by_name
                .insert(species.name.clone(), catalog.species.len());
            catalog.species.push(species);
        }

        tracing::debug!("Loaded {} species into catalog", catalog.species.len());
        Ok(catalog)
    }

    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(data)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.by_name.get(name.trim()).map(|&i| &self.species[i])
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Resolves names to species, keeping the requested order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Species>> {
        names
            .iter()
            .map(|name| {
                self.get(name.as_ref())
                    .cloned()
                    .ok_or_else(|| EcoError::UnknownSpecies {
                        name: name.as_ref().to_string(),
                    })
            })
            .collect()
    }

    pub fn listing(&self) -> CatalogListing {
        CatalogListing {
            count: self.species.len(),
            species: self.species.clone(),
        }
    }
}
