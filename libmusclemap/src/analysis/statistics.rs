//! Aggregate counts over a strength snapshot

use serde::{Deserialize, Serialize};

use crate::types::MuscleStateMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MuscleStatistics {
    /// Muscles with an explicit entry (including ones marked normal)
    pub total: usize,
    pub weak: usize,
    pub normal: usize,
    pub strong: usize,
    /// Mean severity-axis value, 0.0 for an empty snapshot
    pub average: f64,
}

impl MuscleStatistics {
    pub fn from_snapshot(snapshot: &MuscleStateMap) -> Self {
        if snapshot.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total: snapshot.len(),
            ..Self::default()
        };
        let mut sum = 0i64;
        for (_, level) in snapshot.iter() {
            let value = level.value();
            sum += i64::from(value);
            match value {
                v if v < 0 => stats.weak += 1,
                0 => stats.normal += 1,
                _ => stats.strong += 1,
            }
        }
        stats.average = sum as f64 / stats.total as f64;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrengthLevel;

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let stats = MuscleStatistics::from_snapshot(&MuscleStateMap::new());
        assert_eq!(stats, MuscleStatistics::default());
        assert_eq!(stats.average, 0.0);
    }

    #[test]
    fn test_counts_and_average() {
        let snapshot: MuscleStateMap = [
            ("a", StrengthLevel::VeryWeak),
            ("b", StrengthLevel::Weak),
            ("c", StrengthLevel::Normal),
            ("d", StrengthLevel::VeryStrong),
        ]
        .into_iter()
        .collect();

        let stats = MuscleStatistics::from_snapshot(&snapshot);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.weak, 2);
        assert_eq!(stats.normal, 1);
        assert_eq!(stats.strong, 1);
        // (-2 - 1 + 0 + 2) / 4
        assert_eq!(stats.average, -0.25);
    }
}
