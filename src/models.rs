//! Data models for metals, alloy components and recipes

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalKind {
    Base,
    Alloy,
}

/// One entry of the metals table, as found in `data/metals.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Metal {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MetalKind,
    /// Lookup key under `metals` in the language files; the id when absent
    #[serde(default, rename = "nameKey")]
    pub name_key: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Metal {
    pub fn display_key(&self) -> &str {
        self.name_key.as_deref().unwrap_or(&self.id)
    }
}

/// A base metal's allowed share of an alloy, in inclusive percent bounds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Component {
    #[serde(rename = "metalId")]
    pub metal_id: String,
    #[serde(rename = "minPercent")]
    pub min_percent: f64,
    #[serde(rename = "maxPercent")]
    pub max_percent: f64,
}

impl Component {
    pub fn new(metal_id: impl Into<String>, min_percent: f64, max_percent: f64) -> Self {
        Self {
            metal_id: metal_id.into(),
            min_percent,
            max_percent,
        }
    }

    /// Midpoint of the allowed range, used to spread an unconstrained total
    pub fn default_weight(&self) -> f64 {
        (self.min_percent + self.max_percent) / 2.0
    }

    pub fn admits(&self, percent: f64) -> bool {
        percent >= self.min_percent && percent <= self.max_percent
    }

    pub fn has_valid_range(&self) -> bool {
        self.min_percent.is_finite()
            && self.max_percent.is_finite()
            && 0.0 <= self.min_percent
            && self.min_percent <= self.max_percent
            && self.max_percent <= 100.0
    }
}

/// A selectable alloy: an `alloy` metal with at least one component
#[derive(Debug, Clone, PartialEq)]
pub struct Alloy {
    pub id: String,
    pub name_key: String,
    pub components: Vec<Component>,
}

impl Alloy {
    pub fn new(id: impl Into<String>, components: Vec<Component>) -> Self {
        let id = id.into();
        Self {
            name_key: id.clone(),
            id,
            components,
        }
    }

    pub fn component(&self, metal_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.metal_id == metal_id)
    }

    pub fn contains(&self, metal_id: &str) -> bool {
        self.component(metal_id).is_some()
    }

    /// The component a UI focuses after the quantity is confirmed
    pub fn first_component(&self) -> Option<&Component> {
        self.components.first()
    }
}
