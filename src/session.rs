//! Calculator session: the state a UI keeps between recomputes
//!
//! Holds the selected alloy, the desired quantity and the current value of
//! every component slider, and turns each user action into one recompute.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::debug;

use crate::balancer::{self, ComponentBounds, Nuggets, Outcome};
use crate::catalog::RecipeCatalog;
use crate::error::SessionError;
use crate::models::Alloy;
use crate::units::metal_units_to_nuggets;

/// Result of one user action
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Slider ranges at the current total; empty when nothing was computed
    pub bounds: Vec<ComponentBounds>,
    pub outcome: Outcome,
}

impl Update {
    fn nothing() -> Self {
        Self {
            bounds: Vec::new(),
            outcome: Outcome::NoComputation,
        }
    }
}

/// A slider move: to an absolute value or by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Set(Nuggets),
    Step(Nuggets),
}

/// One component edit, written `metal=N`, `metal+=N` or `metal-=N`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub metal_id: String,
    pub change: Change,
}

impl FromStr for Edit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<Nuggets>()
                .map_err(|e| format!("invalid nugget count '{v}': {e}"))
        };

        let (metal, change) = if let Some((metal, v)) = s.split_once("+=") {
            (metal, Change::Step(parse(v)?))
        } else if let Some((metal, v)) = s.split_once("-=") {
            (
                metal,
                Change::Step(
                    parse(v)?
                        .checked_neg()
                        .ok_or_else(|| format!("nugget step out of range in '{s}'"))?,
                ),
            )
        } else if let Some((metal, v)) = s.split_once('=') {
            (metal, Change::Set(parse(v)?))
        } else {
            return Err(format!("expected METAL=N, METAL+=N or METAL-=N, got '{s}'"));
        };

        let metal = metal.trim();
        if metal.is_empty() {
            return Err(format!("missing metal in '{s}'"));
        }
        Ok(Edit {
            metal_id: metal.to_string(),
            change,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Session<'a> {
    catalog: &'a RecipeCatalog,
    alloy: Option<&'a Alloy>,
    /// Desired quantity in metal units
    quantity: Option<f64>,
    values: HashMap<String, Nuggets>,
}

impl<'a> Session<'a> {
    /// Start with the first selectable alloy and no quantity
    pub fn new(catalog: &'a RecipeCatalog) -> Self {
        Self {
            catalog,
            alloy: catalog.alloys().first(),
            quantity: None,
            values: HashMap::new(),
        }
    }

    pub fn alloy(&self) -> Option<&'a Alloy> {
        self.alloy
    }

    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    pub fn total_nuggets(&self) -> Option<f64> {
        self.quantity.map(metal_units_to_nuggets)
    }

    /// Current slider values
    pub fn values(&self) -> &HashMap<String, Nuggets> {
        &self.values
    }

    pub fn value(&self, metal_id: &str) -> Option<Nuggets> {
        self.values.get(metal_id).copied()
    }

    /// Switch alloys; sliders start over from their defaults
    pub fn select_alloy(&mut self, id: &str) -> Result<Update, SessionError> {
        let alloy = self
            .catalog
            .find_alloy(id)
            .ok_or_else(|| SessionError::UnknownAlloy(id.to_string()))?;
        debug!(alloy = id, "alloy selected");
        self.alloy = Some(alloy);
        self.values.clear();
        Ok(self.run(None))
    }

    /// Set the desired quantity in metal units.
    ///
    /// A negative or non-numeric quantity clears the field and is rejected.
    /// Zero is accepted but computes nothing.
    pub fn set_quantity(&mut self, metal_units: f64) -> Result<Update, SessionError> {
        if metal_units.is_nan() || metal_units < 0.0 {
            self.quantity = None;
            return Err(SessionError::InvalidQuantity(metal_units));
        }
        debug!(metal_units, "quantity changed");
        self.quantity = Some(metal_units);
        Ok(self.run(None))
    }

    /// Move one component's slider to `nuggets`, clamped into its range,
    /// and rebalance the others around it
    pub fn set_component(&mut self, metal_id: &str, nuggets: Nuggets) -> Result<Update, SessionError> {
        let alloy = self.alloy.ok_or(SessionError::NoAlloySelected)?;
        if !alloy.contains(metal_id) {
            return Err(SessionError::UnknownComponent {
                alloy: alloy.id.clone(),
                metal: metal_id.to_string(),
            });
        }

        let clamped = self
            .total_nuggets()
            .and_then(|total| balancer::bounds(alloy, total))
            .and_then(|all| all.into_iter().find(|b| b.metal_id == metal_id))
            .map_or(nuggets, |range| range.clamp(nuggets));

        debug!(metal = metal_id, requested = nuggets, clamped, "component edited");
        self.values.insert(metal_id.to_string(), clamped);
        Ok(self.run(Some(metal_id)))
    }

    /// Step a slider by `delta` nuggets (±1 / ±10 buttons, arrow keys)
    pub fn nudge(&mut self, metal_id: &str, delta: Nuggets) -> Result<Update, SessionError> {
        let current = self.value(metal_id).unwrap_or_default();
        self.set_component(metal_id, current.saturating_add(delta))
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<Update, SessionError> {
        match edit.change {
            Change::Set(nuggets) => self.set_component(&edit.metal_id, nuggets),
            Change::Step(delta) => self.nudge(&edit.metal_id, delta),
        }
    }

    /// Recompute from the current state without an edited component
    pub fn refresh(&mut self) -> Update {
        self.run(None)
    }

    fn run(&mut self, edited: Option<&str>) -> Update {
        let (Some(alloy), Some(total)) = (self.alloy, self.total_nuggets()) else {
            return Update::nothing();
        };
        let Some(bounds) = balancer::bounds(alloy, total) else {
            return Update::nothing();
        };

        self.values = balancer::reconcile(alloy, total, &self.values);
        let outcome = balancer::recompute(alloy, total, edited, &self.values);
        self.values.extend(outcome.values());

        Update { bounds, outcome }
    }
}
