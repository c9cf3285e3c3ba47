//! Bundled sample data set, usable without any external data files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::loader::{CATALOG_FILE, LANG_DIR};

pub const SAMPLE_METALS: &str = r#"[
  { "id": "copper", "type": "base" },
  { "id": "tin", "type": "base" },
  { "id": "zinc", "type": "base" },
  { "id": "bismuth", "type": "base" },
  { "id": "gold", "type": "base" },
  { "id": "silver", "type": "base" },
  { "id": "lead", "type": "base" },
  { "id": "nickel", "type": "base" },
  { "id": "tinbronze", "type": "alloy", "components": [
      { "metalId": "copper", "minPercent": 88, "maxPercent": 92 },
      { "metalId": "tin", "minPercent": 8, "maxPercent": 12 } ] },
  { "id": "bismuthbronze", "type": "alloy", "components": [
      { "metalId": "copper", "minPercent": 50, "maxPercent": 70 },
      { "metalId": "zinc", "minPercent": 20, "maxPercent": 30 },
      { "metalId": "bismuth", "minPercent": 10, "maxPercent": 20 } ] },
  { "id": "blackbronze", "type": "alloy", "components": [
      { "metalId": "copper", "minPercent": 68, "maxPercent": 84 },
      { "metalId": "silver", "minPercent": 8, "maxPercent": 16 },
      { "metalId": "gold", "minPercent": 8, "maxPercent": 16 } ] },
  { "id": "brass", "type": "alloy", "components": [
      { "metalId": "copper", "minPercent": 60, "maxPercent": 70 },
      { "metalId": "zinc", "minPercent": 30, "maxPercent": 40 } ] },
  { "id": "leadsolder", "type": "alloy", "components": [
      { "metalId": "lead", "minPercent": 45, "maxPercent": 55 },
      { "metalId": "tin", "minPercent": 45, "maxPercent": 55 } ] },
  { "id": "silversolder", "type": "alloy", "components": [
      { "metalId": "silver", "minPercent": 40, "maxPercent": 50 },
      { "metalId": "tin", "minPercent": 50, "maxPercent": 60 } ] },
  { "id": "electrum", "type": "alloy", "components": [
      { "metalId": "gold", "minPercent": 40, "maxPercent": 60 },
      { "metalId": "silver", "minPercent": 40, "maxPercent": 60 } ] },
  { "id": "cupronickel", "type": "alloy", "components": [
      { "metalId": "copper", "minPercent": 65, "maxPercent": 75 },
      { "metalId": "nickel", "minPercent": 25, "maxPercent": 35 } ] }
]
"#;

pub const SAMPLE_LANG_EN: &str = r#"{
  "main_app_title": "Alloy Calculator",
  "label_metal_select": "Select an Alloy:",
  "label_desired_quantity": "Desired Quantity (in Metal Units):",
  "output_unit_text": "Alloy Composition (in nuggets)",
  "no_alloys_found": "No alloys with components found.",
  "select_valid_alloy_and_quantity": "Please select a valid alloy and enter a positive quantity.",
  "error_positive_quantity": "Please enter a positive quantity.",
  "error_invalid_nuggets": "Invalid nugget quantity for {metalName}.",
  "percentage_out_of_range": "{metalName}: {value}% is outside the allowed range ({min}% - {max}%).",
  "valid_range_nuggets": "Valid range: {min} - {max} nuggets",
  "required_materials_for_nuggets": "Required materials for {totalNuggets} nuggets ({totalMetalUnits} metal units):",
  "nuggets_short": "Nuggets",
  "ingots_short": "Ingots",
  "equivalent_ingots": "This is approximately",
  "value_not_available": "Value not available (calculation error)",
  "error_data_loading": "Error loading data. Please try again.",
  "metals": {
    "copper": { "name": "Copper" },
    "tin": { "name": "Tin" },
    "zinc": { "name": "Zinc" },
    "bismuth": { "name": "Bismuth" },
    "gold": { "name": "Gold" },
    "silver": { "name": "Silver" },
    "lead": { "name": "Lead" },
    "nickel": { "name": "Nickel" },
    "tinbronze": { "name": "Tin Bronze" },
    "bismuthbronze": { "name": "Bismuth Bronze" },
    "blackbronze": { "name": "Black Bronze" },
    "brass": { "name": "Brass" },
    "leadsolder": { "name": "Lead Solder" },
    "silversolder": { "name": "Silver Solder" },
    "electrum": { "name": "Electrum" },
    "cupronickel": { "name": "Cupronickel" }
  }
}
"#;

pub const SAMPLE_LANG_FR: &str = r#"{
  "main_app_title": "Calculateur d'alliages",
  "label_metal_select": "Choisissez un alliage :",
  "label_desired_quantity": "Quantité désirée (en unités de métal) :",
  "output_unit_text": "Composition de l'alliage (en pépites)",
  "no_alloys_found": "Aucun alliage avec composants trouvé.",
  "select_valid_alloy_and_quantity": "Veuillez choisir un alliage valide et saisir une quantité positive.",
  "error_positive_quantity": "Veuillez saisir une quantité positive.",
  "error_invalid_nuggets": "Quantité de pépites invalide pour {metalName}.",
  "percentage_out_of_range": "{metalName} : {value} % est hors de la plage autorisée ({min} % - {max} %).",
  "valid_range_nuggets": "Plage valide : {min} - {max} pépites",
  "required_materials_for_nuggets": "Matériaux requis pour {totalNuggets} pépites ({totalMetalUnits} unités de métal) :",
  "nuggets_short": "Pépites",
  "ingots_short": "Lingots",
  "equivalent_ingots": "Cela représente environ",
  "value_not_available": "Valeur indisponible (erreur de calcul)",
  "error_data_loading": "Erreur de chargement des données. Veuillez réessayer.",
  "metals": {
    "copper": { "name": "Cuivre" },
    "tin": { "name": "Étain" },
    "zinc": { "name": "Zinc" },
    "bismuth": { "name": "Bismuth" },
    "gold": { "name": "Or" },
    "silver": { "name": "Argent" },
    "lead": { "name": "Plomb" },
    "nickel": { "name": "Nickel" },
    "tinbronze": { "name": "Bronze à l'étain" },
    "bismuthbronze": { "name": "Bronze au bismuth" },
    "blackbronze": { "name": "Bronze noir" },
    "brass": { "name": "Laiton" },
    "leadsolder": { "name": "Soudure au plomb" },
    "silversolder": { "name": "Soudure à l'argent" },
    "electrum": { "name": "Électrum" },
    "cupronickel": { "name": "Cupronickel" }
  }
}
"#;

/// Write the sample catalog and the `en`/`fr` string tables under `root`
pub fn write_sample(root: &Path) -> Result<()> {
    let lang_dir = root.join(LANG_DIR);
    let catalog_file = root.join(CATALOG_FILE);

    if let Some(parent) = catalog_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::create_dir_all(&lang_dir)
        .with_context(|| format!("Failed to create {}", lang_dir.display()))?;

    let files = [
        (catalog_file, SAMPLE_METALS),
        (lang_dir.join("en.json"), SAMPLE_LANG_EN),
        (lang_dir.join("fr.json"), SAMPLE_LANG_FR),
    ];
    for (path, content) in &files {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    info!(root = %root.display(), "sample data written");
    Ok(())
}
