//! Startup data loading
//!
//! Reads the alloy catalog and one language file from a data directory laid
//! out as:
//!
//! ```text
//! <root>/data/metals.json
//! <root>/lang/<code>.json
//! ```
//!
//! Both must load before anything is computed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::RecipeCatalog;
use crate::error::{DataLoadError, LoadResult};
use crate::i18n::Translations;
use crate::models::Metal;

pub const CATALOG_FILE: &str = "data/metals.json";
pub const LANG_DIR: &str = "lang";

/// Everything the calculator needs from disk
#[derive(Debug, Clone)]
pub struct DataBundle {
    pub catalog: RecipeCatalog,
    pub translations: Translations,
    pub language: String,
}

pub fn catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_FILE)
}

pub fn language_path(root: &Path, language: &str) -> PathBuf {
    root.join(LANG_DIR).join(format!("{language}.json"))
}

fn read(path: &Path) -> LoadResult<String> {
    fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_catalog(path: &Path) -> LoadResult<RecipeCatalog> {
    let content = read(path)?;
    let metals: Vec<Metal> =
        serde_json::from_str(&content).map_err(|source| DataLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    RecipeCatalog::from_metals(metals)
}

pub fn load_translations(path: &Path) -> LoadResult<Translations> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| DataLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Language codes with a file under `<root>/lang`, sorted
pub fn available_languages(root: &Path) -> Vec<String> {
    let mut languages: Vec<String> = WalkDir::new(root.join(LANG_DIR))
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|e| {
            e.path()
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .collect();
    languages.sort();
    languages
}

/// Load the catalog and the strings for `language`; either failing is fatal
pub fn load_bundle(root: &Path, language: &str) -> LoadResult<DataBundle> {
    let lang_path = language_path(root, language);
    if !lang_path.is_file() {
        debug!(path = %lang_path.display(), "language file missing");
        return Err(DataLoadError::UnknownLanguage(language.to_string()));
    }

    let catalog = load_catalog(&catalog_path(root))?;
    let translations = load_translations(&lang_path)?;

    info!(
        root = %root.display(),
        language,
        alloys = catalog.alloys().len(),
        "data loaded"
    );

    Ok(DataBundle {
        catalog,
        translations,
        language: language.to_string(),
    })
}
