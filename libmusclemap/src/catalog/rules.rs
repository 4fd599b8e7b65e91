//! Posture rule definitions and the validated rule catalog

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::CatalogResult;
use crate::error::CatalogError;
use crate::types::Language;

/// Muscles a rule expects to be weak or strong when its pattern is present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTriggers {
    #[serde(default)]
    pub weak: Vec<String>,
    #[serde(default)]
    pub strong: Vec<String>,
}

impl RuleTriggers {
    pub fn len(&self) -> usize {
        self.weak.len() + self.strong.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weak.is_empty() && self.strong.is_empty()
    }

    /// Every trigger id, weak side first
    pub fn muscle_ids(&self) -> impl Iterator<Item = &str> {
        self.weak.iter().chain(self.strong.iter()).map(String::as_str)
    }
}

/// A postural pattern and the muscle imbalance that indicates it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureRule {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    #[serde(default)]
    pub description_ko: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub recommended_exercises: Vec<String>,
    pub triggers: RuleTriggers,
}

impl PostureRule {
    pub fn name(&self, language: Language) -> &str {
        language.pick(&self.name_ko, &self.name_en)
    }

    pub fn description(&self, language: Language) -> &str {
        language.pick(&self.description_ko, &self.description_en)
    }

    /// Check the rule on its own, without reference to a muscle catalog
    fn validate(&self, position: usize) -> CatalogResult<()> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyRuleId(position));
        }
        if self.triggers.is_empty() {
            return Err(CatalogError::EmptyTriggers(self.id.clone()));
        }

        // A muscle may appear once per rule, on one side only
        let mut seen = HashSet::new();
        for muscle in self.triggers.muscle_ids() {
            if !seen.insert(muscle) {
                return Err(CatalogError::DuplicateTrigger {
                    rule: self.id.clone(),
                    muscle: muscle.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable, ordered set of validated posture rules
///
/// Construction is the only place rules are checked; once a `RuleCatalog`
/// exists every rule in it has at least one trigger, so the engine never
/// divides by zero. Declaration order is kept and used as the tie-break
/// between issues of equal severity.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<PostureRule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<PostureRule>) -> CatalogResult<Self> {
        let mut ids = HashSet::new();
        for (position, rule) in rules.iter().enumerate() {
            rule.validate(position)?;
            if !ids.insert(rule.id.as_str()) {
                return Err(CatalogError::DuplicateRule(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    pub fn get(&self, id: &str) -> Option<&PostureRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostureRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, weak: &[&str], strong: &[&str]) -> PostureRule {
        PostureRule {
            id: id.to_string(),
            name_ko: format!("{} 이름", id),
            name_en: format!("{} name", id),
            description_ko: String::new(),
            description_en: String::new(),
            recommended_exercises: Vec::new(),
            triggers: RuleTriggers {
                weak: weak.iter().map(|s| s.to_string()).collect(),
                strong: strong.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_valid_catalog_preserves_order() {
        let catalog = RuleCatalog::new(vec![
            rule("r2", &["a"], &["b"]),
            rule("r1", &["c"], &[]),
            rule("r3", &[], &["d"]),
        ])
        .unwrap();

        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r1", "r3"]);
        assert_eq!(catalog.get("r1").unwrap().triggers.len(), 1);
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = RuleCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_rule_without_triggers_rejected() {
        let result = RuleCatalog::new(vec![rule("r1", &["a"], &["b"]), rule("hollow", &[], &[])]);
        assert!(matches!(result, Err(CatalogError::EmptyTriggers(id)) if id == "hollow"));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let result = RuleCatalog::new(vec![rule("r1", &["a"], &[]), rule("r1", &["b"], &[])]);
        assert!(matches!(result, Err(CatalogError::DuplicateRule(id)) if id == "r1"));
    }

    #[test]
    fn test_empty_rule_id_rejected() {
        let result = RuleCatalog::new(vec![rule("", &["a"], &[])]);
        assert!(matches!(result, Err(CatalogError::EmptyRuleId(0))));
    }

    #[test]
    fn test_muscle_on_both_sides_rejected() {
        let result = RuleCatalog::new(vec![rule("r1", &["a"], &["a"])]);
        match result {
            Err(CatalogError::DuplicateTrigger { rule, muscle }) => {
                assert_eq!(rule, "r1");
                assert_eq!(muscle, "a");
            }
            other => panic!("Expected DuplicateTrigger, got {:?}", other),
        }
    }

    #[test]
    fn test_triggers_default_when_missing() {
        let parsed: PostureRule = serde_json::from_str(
            r#"{"id": "r1", "name_ko": "규칙", "name_en": "Rule", "triggers": {"weak": ["a"]}}"#,
        )
        .unwrap();
        assert!(parsed.triggers.strong.is_empty());
        assert!(parsed.recommended_exercises.is_empty());
        assert_eq!(parsed.name(Language::En), "Rule");
    }
}
