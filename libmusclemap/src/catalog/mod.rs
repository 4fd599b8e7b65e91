//! Static reference data: strength levels, muscles and posture rules
//!
//! The catalog is loaded once at startup and passed explicitly to everything
//! that reads it. A copy is embedded in the library; `[catalog]` entries in
//! the config file replace either half with files on disk.

pub mod levels;
pub mod muscles;
pub mod rules;

pub use levels::{LevelDisplay, StrengthLevelCatalog};
pub use muscles::{Muscle, MuscleCatalog};
pub use rules::{PostureRule, RuleCatalog, RuleTriggers};

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::CatalogConfig;
use crate::error::CatalogError;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

const BUILTIN_RULES: &str = include_str!("../../data/posture_rules.json");
const BUILTIN_MUSCLES: &str = include_str!("../../data/muscles.json");

/// On-disk layout of a rule catalog file
#[derive(Debug, Deserialize)]
struct RuleCatalogFile {
    strength_levels: StrengthLevelCatalog,
    rules: Vec<PostureRule>,
}

/// Where a catalog document came from, for error messages
enum Source<'a> {
    Builtin(&'static str),
    File(&'a Path),
}

impl Source<'_> {
    fn read(&self) -> CatalogResult<(String, String)> {
        match self {
            Source::Builtin(content) => Ok(("<builtin>".to_string(), content.to_string())),
            Source::File(path) => {
                let origin = path.display().to_string();
                let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
                    path: origin.clone(),
                    source,
                })?;
                Ok((origin, content))
            }
        }
    }
}

/// Complete, cross-validated reference data
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: StrengthLevelCatalog,
    muscles: MuscleCatalog,
    rules: RuleCatalog,
}

impl Catalog {
    /// Assemble a catalog, checking that every rule trigger names a known muscle
    pub fn new(levels: StrengthLevelCatalog, muscles: MuscleCatalog, rules: RuleCatalog) -> CatalogResult<Self> {
        for rule in rules.iter() {
            if let Some(unknown) = rule.triggers.muscle_ids().find(|id| !muscles.contains(id)) {
                return Err(CatalogError::UnknownMuscle {
                    rule: rule.id.clone(),
                    muscle: unknown.to_string(),
                });
            }
        }
        Ok(Self { levels, muscles, rules })
    }

    /// The catalog embedded in the library
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_RULES, BUILTIN_MUSCLES)
    }

    /// Parse a catalog from a rule document and a muscle document
    pub fn from_json(rules_json: &str, muscles_json: &str) -> CatalogResult<Self> {
        Self::parse("<rules>", rules_json, "<muscles>", muscles_json)
    }

    /// Load a catalog, reading each half from disk when a path is given
    pub fn load(rules_path: Option<&Path>, muscles_path: Option<&Path>) -> CatalogResult<Self> {
        let rules_source = rules_path.map_or(Source::Builtin(BUILTIN_RULES), Source::File);
        let muscles_source = muscles_path.map_or(Source::Builtin(BUILTIN_MUSCLES), Source::File);

        let (rules_origin, rules_json) = rules_source.read()?;
        let (muscles_origin, muscles_json) = muscles_source.read()?;

        let catalog = Self::parse(&rules_origin, &rules_json, &muscles_origin, &muscles_json)?;
        tracing::debug!(
            rules = catalog.rules.len(),
            muscles = catalog.muscles.len(),
            rules_origin = %rules_origin,
            muscles_origin = %muscles_origin,
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Load the catalog selected by the `[catalog]` config section
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let expand = |path: &String| PathBuf::from(shellexpand::tilde(path).to_string());
        let rules_path = config.rules_file.as_ref().map(expand);
        let muscles_path = config.muscles_file.as_ref().map(expand);
        Self::load(rules_path.as_deref(), muscles_path.as_deref())
    }

    fn parse(rules_origin: &str, rules_json: &str, muscles_origin: &str, muscles_json: &str) -> CatalogResult<Self> {
        let file: RuleCatalogFile = serde_json::from_str(rules_json).map_err(|source| CatalogError::Parse {
            origin: rules_origin.to_string(),
            source,
        })?;
        let muscles: Vec<Muscle> = serde_json::from_str(muscles_json).map_err(|source| CatalogError::Parse {
            origin: muscles_origin.to_string(),
            source,
        })?;

        Self::new(
            file.strength_levels,
            MuscleCatalog::new(muscles)?,
            RuleCatalog::new(file.rules)?,
        )
    }

    pub fn levels(&self) -> &StrengthLevelCatalog {
        &self.levels
    }

    pub fn muscles(&self) -> &MuscleCatalog {
        &self.muscles
    }

    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }
}
