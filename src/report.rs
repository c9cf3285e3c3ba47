//! Text produced from a recompute: results payload, violation messages and
//! valid-range hints, all driven by the localized templates

use std::fmt;

use crate::balancer::{Balanced, ComponentBounds, Violation, ViolationKind};
use crate::catalog::RecipeCatalog;
use crate::i18n::{Text, Translations};
use crate::models::Alloy;
use crate::template::{format_number, format_percent, render};
use crate::units::{approx_ingots, displayed_nuggets, metal_units_to_nuggets};

/// Localized display name of any metal in the catalog
pub fn metal_label<'a>(
    catalog: &'a RecipeCatalog,
    translations: &'a Translations,
    metal_id: &'a str,
) -> &'a str {
    let key = catalog.metal(metal_id).map_or(metal_id, |m| m.display_key());
    translations.metal_name(key)
}

pub fn alloy_label<'a>(translations: &'a Translations, alloy: &'a Alloy) -> &'a str {
    translations.metal_name(&alloy.name_key)
}

/// The message shown for one violation
pub fn violation_message(
    catalog: &RecipeCatalog,
    translations: &Translations,
    violation: &Violation,
) -> String {
    let name = metal_label(catalog, translations, &violation.metal_id).to_string();
    match violation.kind {
        ViolationKind::NotANumber | ViolationKind::Negative { .. } => render(
            translations.get(Text::ErrorInvalidNuggets),
            &[("metalName", name)],
        )
        .into_owned(),
        ViolationKind::OutOfRange { percent, min, max } => render(
            translations.get(Text::PercentageOutOfRange),
            &[
                ("metalName", name),
                ("value", format_percent(percent)),
                ("min", format_number(min)),
                ("max", format_number(max)),
            ],
        )
        .into_owned(),
    }
}

pub fn range_hint(translations: &Translations, bounds: &ComponentBounds) -> String {
    render(
        translations.get(Text::ValidRangeNuggets),
        &[
            ("min", bounds.min_nuggets.to_string()),
            ("max", bounds.max_nuggets.to_string()),
        ],
    )
    .into_owned()
}

/// What a balanced recompute shows: a heading, one line per component and
/// the approximate ingot count
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsReport {
    pub heading: String,
    pub lines: Vec<String>,
    pub ingots: String,
}

impl ResultsReport {
    pub fn build(
        catalog: &RecipeCatalog,
        translations: &Translations,
        alloy: &Alloy,
        balanced: &Balanced,
        quantity_metal_units: f64,
    ) -> Self {
        let total_nuggets = metal_units_to_nuggets(quantity_metal_units);
        let heading = render(
            translations.get(Text::RequiredMaterialsForNuggets),
            &[
                ("totalNuggets", format_number(total_nuggets)),
                ("totalMetalUnits", format_number(quantity_metal_units)),
            ],
        )
        .into_owned();

        let nuggets_short = translations.get(Text::NuggetsShort);
        let lines = alloy
            .components
            .iter()
            .map(|comp| {
                let name = metal_label(catalog, translations, &comp.metal_id);
                match balanced.share(&comp.metal_id) {
                    Some(share) => {
                        let nuggets = displayed_nuggets(balanced.total as f64, share.percent);
                        format!("{name}: {nuggets} {nuggets_short}")
                    }
                    None => format!("{name}: {}", translations.get(Text::ValueNotAvailable)),
                }
            })
            .collect();

        let ingots = format!(
            "{} {} {}.",
            translations.get(Text::EquivalentIngots),
            approx_ingots(total_nuggets),
            translations.get(Text::IngotsShort)
        );

        Self {
            heading,
            lines,
            ingots,
        }
    }
}

impl fmt::Display for ResultsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for line in &self.lines {
            writeln!(f, "  - {line}")?;
        }
        writeln!(f, "{}", self.ingots)
    }
}
