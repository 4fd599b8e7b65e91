//! Severity buckets for display

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Three-tier bucket for a 0-100 severity score
///
/// Low is `[0, 40)`, Medium is `[40, 70)`, High is `[70, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    pub fn from_score(severity: u8) -> Self {
        match severity {
            70.. => Self::High,
            40..=69 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#dc2626",
            Self::Medium => "#f59e0b",
            Self::Low => "#10b981",
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::High, Language::Ko) => "높음",
            (Self::Medium, Language::Ko) => "중간",
            (Self::Low, Language::Ko) => "낮음",
            (Self::High, Language::En) => "High",
            (Self::Medium, Language::En) => "Medium",
            (Self::Low, Language::En) => "Low",
        }
    }
}
