//! Muscle reference data

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::CatalogResult;
use crate::error::CatalogError;
use crate::types::{Language, ViewSide};

/// A muscle that can be marked on the body diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Muscle {
    pub id: String,
    pub label_ko: String,
    pub label_en: String,
    pub side: ViewSide,
    #[serde(default)]
    pub description: String,
}

impl Muscle {
    pub fn label(&self, language: Language) -> &str {
        language.pick(&self.label_ko, &self.label_en)
    }
}

/// Ordered, id-unique list of muscles
#[derive(Debug, Clone)]
pub struct MuscleCatalog {
    muscles: Vec<Muscle>,
}

impl MuscleCatalog {
    pub fn new(muscles: Vec<Muscle>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for (position, muscle) in muscles.iter().enumerate() {
            if muscle.id.trim().is_empty() {
                return Err(CatalogError::EmptyMuscleId(position));
            }
            if !seen.insert(muscle.id.as_str()) {
                return Err(CatalogError::DuplicateMuscle(muscle.id.clone()));
            }
        }
        Ok(Self { muscles })
    }

    pub fn get(&self, id: &str) -> Option<&Muscle> {
        self.muscles.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Muscle> {
        self.muscles.iter()
    }

    /// Muscles drawn on one side of the diagram
    pub fn on_side(&self, side: ViewSide) -> impl Iterator<Item = &Muscle> {
        self.muscles.iter().filter(move |m| m.side == side)
    }

    pub fn len(&self) -> usize {
        self.muscles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.muscles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn muscle(id: &str, side: ViewSide) -> Muscle {
        Muscle {
            id: id.to_string(),
            label_ko: format!("{}-ko", id),
            label_en: format!("{}-en", id),
            side,
            description: String::new(),
        }
    }

    #[test]
    fn test_lookup_and_side_filter() {
        let catalog = MuscleCatalog::new(vec![
            muscle("biceps", ViewSide::Front),
            muscle("hamstrings", ViewSide::Back),
            muscle("quadriceps", ViewSide::Front),
        ])
        .unwrap();

        assert!(catalog.contains("hamstrings"));
        assert!(!catalog.contains("hands"));
        assert_eq!(catalog.get("biceps").unwrap().label(Language::En), "biceps-en");

        let front: Vec<&str> = catalog.on_side(ViewSide::Front).map(|m| m.id.as_str()).collect();
        assert_eq!(front, vec!["biceps", "quadriceps"]);
    }

    #[test]
    fn test_duplicate_muscle_rejected() {
        let result = MuscleCatalog::new(vec![
            muscle("biceps", ViewSide::Front),
            muscle("biceps", ViewSide::Back),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateMuscle(id)) if id == "biceps"));
    }

    #[test]
    fn test_empty_muscle_id_rejected() {
        let result = MuscleCatalog::new(vec![muscle("biceps", ViewSide::Front), muscle(" ", ViewSide::Back)]);
        assert!(matches!(result, Err(CatalogError::EmptyMuscleId(1))));
    }

    #[test]
    fn test_side_deserializes_lowercase() {
        let m: Muscle = serde_json::from_str(
            r#"{"id": "calves", "label_ko": "종아리근", "label_en": "Calves", "side": "back"}"#,
        )
        .unwrap();
        assert_eq!(m.side, ViewSide::Back);
        assert!(m.description.is_empty());
    }
}
