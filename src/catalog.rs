//! Recipe catalog: the immutable table of metals and selectable alloys

use std::collections::HashSet;

use tracing::debug;

use crate::error::{DataLoadError, LoadResult};
use crate::models::{Alloy, Metal, MetalKind};

#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    metals: Vec<Metal>,
    alloys: Vec<Alloy>,
}

impl RecipeCatalog {
    /// Build the catalog from the raw metals table, rejecting malformed recipes.
    ///
    /// Alloys without components are kept in the metals table but are not
    /// selectable.
    pub fn from_metals(metals: Vec<Metal>) -> LoadResult<Self> {
        let mut seen = HashSet::new();
        for metal in &metals {
            if !seen.insert(metal.id.as_str()) {
                return Err(DataLoadError::DuplicateMetal(metal.id.clone()));
            }
        }

        let mut alloys = Vec::new();
        for metal in &metals {
            if metal.kind != MetalKind::Alloy || metal.components.is_empty() {
                continue;
            }

            let mut listed = HashSet::new();
            for comp in &metal.components {
                if !comp.has_valid_range() {
                    return Err(DataLoadError::InvalidRange {
                        alloy: metal.id.clone(),
                        metal: comp.metal_id.clone(),
                        min: comp.min_percent,
                        max: comp.max_percent,
                    });
                }
                if !listed.insert(comp.metal_id.as_str()) {
                    return Err(DataLoadError::RepeatedComponent {
                        alloy: metal.id.clone(),
                        metal: comp.metal_id.clone(),
                    });
                }
            }

            alloys.push(Alloy {
                id: metal.id.clone(),
                name_key: metal.display_key().to_string(),
                components: metal.components.clone(),
            });
        }

        debug!(metals = metals.len(), alloys = alloys.len(), "catalog built");
        Ok(Self { metals, alloys })
    }

    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        let metals: Vec<Metal> = serde_json::from_str(json)?;
        Self::from_metals(metals)
    }

    /// Selectable alloys, in source order
    pub fn alloys(&self) -> &[Alloy] {
        &self.alloys
    }

    pub fn find_alloy(&self, id: &str) -> Option<&Alloy> {
        self.alloys.iter().find(|a| a.id == id)
    }

    pub fn metal(&self, id: &str) -> Option<&Metal> {
        self.metals.iter().find(|m| m.id == id)
    }

    pub fn metals(&self) -> &[Metal] {
        &self.metals
    }
}
