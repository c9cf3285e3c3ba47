//! Localized strings
//!
//! A language file is a flat JSON object of message templates plus a
//! `metals` table of display names:
//!
//! ```json
//! { "nuggets_short": "Nuggets", "metals": { "tin": { "name": "Tin" } } }
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadResult;

/// Used when neither an explicit nor a locale language is available
pub const DEFAULT_LANGUAGE: &str = "fr";

/// Every message the calculator shows, with its key and built-in fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    AppTitle,
    LabelMetalSelect,
    LabelDesiredQuantity,
    OutputUnitText,
    NoAlloysFound,
    SelectValidAlloyAndQuantity,
    ErrorPositiveQuantity,
    ErrorInvalidNuggets,
    PercentageOutOfRange,
    ValidRangeNuggets,
    RequiredMaterialsForNuggets,
    NuggetsShort,
    IngotsShort,
    EquivalentIngots,
    ValueNotAvailable,
    ErrorDataLoading,
}

impl Text {
    pub fn key(self) -> &'static str {
        match self {
            Text::AppTitle => "main_app_title",
            Text::LabelMetalSelect => "label_metal_select",
            Text::LabelDesiredQuantity => "label_desired_quantity",
            Text::OutputUnitText => "output_unit_text",
            Text::NoAlloysFound => "no_alloys_found",
            Text::SelectValidAlloyAndQuantity => "select_valid_alloy_and_quantity",
            Text::ErrorPositiveQuantity => "error_positive_quantity",
            Text::ErrorInvalidNuggets => "error_invalid_nuggets",
            Text::PercentageOutOfRange => "percentage_out_of_range",
            Text::ValidRangeNuggets => "valid_range_nuggets",
            Text::RequiredMaterialsForNuggets => "required_materials_for_nuggets",
            Text::NuggetsShort => "nuggets_short",
            Text::IngotsShort => "ingots_short",
            Text::EquivalentIngots => "equivalent_ingots",
            Text::ValueNotAvailable => "value_not_available",
            Text::ErrorDataLoading => "error_data_loading",
        }
    }

    pub fn fallback(self) -> &'static str {
        match self {
            Text::AppTitle => "Alloy Calculator",
            Text::LabelMetalSelect => "Select an Alloy:",
            Text::LabelDesiredQuantity => "Desired Quantity (in Metal Units):",
            Text::OutputUnitText => "Alloy Composition (in nuggets)",
            Text::NoAlloysFound => "No alloys with components found.",
            Text::SelectValidAlloyAndQuantity => {
                "Please select a valid alloy and enter a positive quantity."
            }
            Text::ErrorPositiveQuantity => "Please enter a positive quantity.",
            Text::ErrorInvalidNuggets => "Invalid nugget quantity for {metalName}.",
            Text::PercentageOutOfRange => {
                "{metalName}: {value}% is outside the allowed range ({min}% - {max}%)."
            }
            Text::ValidRangeNuggets => "Valid range: {min} - {max} nuggets",
            Text::RequiredMaterialsForNuggets => {
                "Required materials for {totalNuggets} nuggets ({totalMetalUnits} metal units):"
            }
            Text::NuggetsShort => "Nuggets",
            Text::IngotsShort => "Ingots",
            Text::EquivalentIngots => "This is approximately",
            Text::ValueNotAvailable => "Value not available (calculation error)",
            Text::ErrorDataLoading => "Error loading data. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MetalStrings {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Translations {
    #[serde(default)]
    metals: HashMap<String, MetalStrings>,
    #[serde(flatten)]
    strings: HashMap<String, Value>,
}

impl Translations {
    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The localized template for `text`, or its built-in fallback
    pub fn get(&self, text: Text) -> &str {
        self.strings
            .get(text.key())
            .and_then(Value::as_str)
            .unwrap_or(text.fallback())
    }

    /// Display name for a metal, falling back to its key
    pub fn metal_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.metals
            .get(key)
            .and_then(|m| m.name.as_deref())
            .unwrap_or(key)
    }
}

/// Pick the language to load.
///
/// An explicit request always wins, even without a matching file (loading
/// then fails). Otherwise the primary subtag of `locale` (`en_GB.UTF-8` →
/// `en`) is used when it is available, else [`DEFAULT_LANGUAGE`].
pub fn resolve_language(
    requested: Option<&str>,
    locale: Option<&str>,
    available: &[String],
) -> String {
    if let Some(lang) = requested.filter(|l| !l.is_empty()) {
        return lang.to_string();
    }

    locale
        .and_then(|l| l.split(['-', '_', '.']).next())
        .map(str::to_lowercase)
        .filter(|primary| available.iter().any(|a| a == primary))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<String> {
        vec!["en".to_string(), "fr".to_string()]
    }

    #[test]
    fn looks_up_templates_with_fallback() {
        let t = Translations::from_json_str(
            r#"{"nuggets_short": "Pépites", "ingots_short": 3, "metals": {"tin": {"name": "Étain"}}}"#,
        )
        .unwrap();
        assert_eq!(t.get(Text::NuggetsShort), "Pépites");
        assert_eq!(t.get(Text::IngotsShort), "Ingots");
        assert_eq!(t.get(Text::EquivalentIngots), "This is approximately");
    }

    #[test]
    fn metal_names_fall_back_to_the_key() {
        let t = Translations::from_json_str(
            r#"{"metals": {"tin": {"name": "Étain"}, "lead": {}}}"#,
        )
        .unwrap();
        assert_eq!(t.metal_name("tin"), "Étain");
        assert_eq!(t.metal_name("lead"), "lead");
        assert_eq!(t.metal_name("zinc"), "zinc");
        assert_eq!(Translations::default().metal_name("zinc"), "zinc");
    }

    #[test]
    fn explicit_language_wins() {
        assert_eq!(resolve_language(Some("de"), Some("en_US.UTF-8"), &available()), "de");
    }

    #[test]
    fn locale_is_used_when_available() {
        assert_eq!(resolve_language(None, Some("en_GB.UTF-8"), &available()), "en");
        assert_eq!(resolve_language(None, Some("en-US"), &available()), "en");
        assert_eq!(resolve_language(Some(""), Some("EN"), &available()), "en");
    }

    #[test]
    fn falls_back_to_default_language() {
        assert_eq!(resolve_language(None, Some("de_DE"), &available()), "fr");
        assert_eq!(resolve_language(None, None, &available()), "fr");
        assert_eq!(resolve_language(None, Some("C"), &[]), "fr");
    }
}
