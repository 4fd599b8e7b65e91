//! Rule-based posture inference
//!
//! Each rule names muscles expected to be weak and muscles expected to be
//! strong when its postural pattern is present. A rule fires when at least
//! one muscle on every non-empty side deviates in the expected direction.
//! Severity is the accumulated deviation normalized against the largest
//! deviation the rule's triggers could produce.

use serde::{Deserialize, Serialize};

use crate::catalog::{PostureRule, RuleCatalog};
use crate::types::{Language, MuscleStateMap, StrengthLevel};

/// Points added per step of deviation from normal
const POINTS_PER_STEP: u32 = 15;

/// Points a single trigger muscle contributes at the extreme levels
const MAX_POINTS_PER_MUSCLE: u32 = POINTS_PER_STEP * 2;

/// A postural issue inferred from the current snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureIssue {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    pub description_ko: String,
    pub description_en: String,
    pub recommended_exercises: Vec<String>,
    /// 0-100
    pub severity: u8,
    pub triggered_by: TriggeredBy,
}

/// The trigger muscles that actually deviated, in rule declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredBy {
    pub weak: Vec<String>,
    pub strong: Vec<String>,
}

impl PostureIssue {
    pub fn name(&self, language: Language) -> &str {
        language.pick(&self.name_ko, &self.name_en)
    }

    pub fn description(&self, language: Language) -> &str {
        language.pick(&self.description_ko, &self.description_en)
    }
}

/// Severity-axis value of a possibly-unassigned muscle
pub fn strength_value(level: Option<StrengthLevel>) -> i32 {
    level.map_or(0, StrengthLevel::value)
}

/// Evaluate every rule against a snapshot
///
/// Returns fired issues ordered by descending severity. Issues with equal
/// severity keep the catalog's declaration order.
pub fn evaluate(snapshot: &MuscleStateMap, rules: &RuleCatalog) -> Vec<PostureIssue> {
    let mut issues: Vec<PostureIssue> = rules
        .iter()
        .filter_map(|rule| evaluate_rule(snapshot, rule))
        .collect();

    // sort_by is stable
    issues.sort_by(|a, b| b.severity.cmp(&a.severity));

    tracing::trace!(
        rules = rules.len(),
        fired = issues.len(),
        "Evaluated posture rules"
    );
    issues
}

/// Evaluate a single rule; `None` when it does not fire
///
/// The rule must come from a [`RuleCatalog`], which guarantees at least one
/// trigger muscle.
pub fn evaluate_rule(snapshot: &MuscleStateMap, rule: &PostureRule) -> Option<PostureIssue> {
    let value_of = |id: &str| strength_value(snapshot.get(id));

    let weak: Vec<String> = rule
        .triggers
        .weak
        .iter()
        .filter(|id| value_of(id.as_str()) < 0)
        .cloned()
        .collect();
    let strong: Vec<String> = rule
        .triggers
        .strong
        .iter()
        .filter(|id| value_of(id.as_str()) > 0)
        .cloned()
        .collect();

    let min_weak_required = rule.triggers.weak.len().min(1);
    let min_strong_required = rule.triggers.strong.len().min(1);
    if weak.len() < min_weak_required || strong.len() < min_strong_required {
        return None;
    }

    let raw: u32 = weak
        .iter()
        .chain(strong.iter())
        .map(|id| value_of(id.as_str()).unsigned_abs() * POINTS_PER_STEP)
        .sum();
    let max_possible = rule.triggers.len() as u32 * MAX_POINTS_PER_MUSCLE;
    let severity = normalize_severity(raw, max_possible);

    tracing::debug!(rule = %rule.id, severity, "Posture rule fired");

    Some(PostureIssue {
        id: rule.id.clone(),
        name_ko: rule.name_ko.clone(),
        name_en: rule.name_en.clone(),
        description_ko: rule.description_ko.clone(),
        description_en: rule.description_en.clone(),
        recommended_exercises: rule.recommended_exercises.clone(),
        severity,
        triggered_by: TriggeredBy { weak, strong },
    })
}

/// `round(min(100, raw / max_possible * 100))`, rounding halves up
fn normalize_severity(raw: u32, max_possible: u32) -> u8 {
    if max_possible == 0 {
        return 0;
    }
    let rounded = (raw * 200 + max_possible) / (2 * max_possible);
    rounded.min(100) as u8
}
