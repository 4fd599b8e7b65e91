//! Display metadata for strength levels

use serde::{Deserialize, Serialize};

use crate::types::{Language, StrengthLevel};

/// How a strength level is shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDisplay {
    /// Hex color used on the body diagram
    pub color: String,
    pub label_ko: String,
    pub label_en: String,
}

impl LevelDisplay {
    pub fn label(&self, language: Language) -> &str {
        language.pick(&self.label_ko, &self.label_en)
    }
}

/// One display entry per strength level
///
/// Every level has a named field, so a catalog file missing any level fails
/// to parse and lookups can never miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrengthLevelCatalog {
    very_weak: LevelDisplay,
    weak: LevelDisplay,
    normal: LevelDisplay,
    strong: LevelDisplay,
    very_strong: LevelDisplay,
}

impl StrengthLevelCatalog {
    pub fn display(&self, level: StrengthLevel) -> &LevelDisplay {
        match level {
            StrengthLevel::VeryWeak => &self.very_weak,
            StrengthLevel::Weak => &self.weak,
            StrengthLevel::Normal => &self.normal,
            StrengthLevel::Strong => &self.strong,
            StrengthLevel::VeryStrong => &self.very_strong,
        }
    }

    /// Entries weakest first
    pub fn iter(&self) -> impl Iterator<Item = (StrengthLevel, &LevelDisplay)> {
        StrengthLevel::ALL.into_iter().map(move |level| (level, self.display(level)))
    }
}
