//! Core types for MuscleMap

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Perceived strength of a single muscle
///
/// Ordered from weakest to strongest. Each level sits on a signed axis
/// (see [`StrengthLevel::value`]) where `Normal` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Normal,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Every level, weakest first
    pub const ALL: [StrengthLevel; 5] = [
        StrengthLevel::VeryWeak,
        StrengthLevel::Weak,
        StrengthLevel::Normal,
        StrengthLevel::Strong,
        StrengthLevel::VeryStrong,
    ];

    /// Position on the severity axis: -2 (very weak) through 2 (very strong)
    pub fn value(self) -> i32 {
        match self {
            Self::VeryWeak => -2,
            Self::Weak => -1,
            Self::Normal => 0,
            Self::Strong => 1,
            Self::VeryStrong => 2,
        }
    }

    /// Wire name (e.g. "very_weak")
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Normal => "normal",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }

    /// Parse a level from persisted or imported data.
    ///
    /// Only exact wire names are recognized. Anything else, including
    /// case or separator variants, reads as `Normal`.
    pub fn from_lenient(s: &str) -> Self {
        Self::from_wire(s).unwrap_or_else(|| {
            tracing::warn!(level = s, "Unrecognized strength level, treating as normal");
            Self::Normal
        })
    }

    /// Exact match against the snake_case wire names
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }
}

impl FromStr for StrengthLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "very_weak" => Ok(Self::VeryWeak),
            "weak" => Ok(Self::Weak),
            "normal" => Ok(Self::Normal),
            "strong" => Ok(Self::Strong),
            "very_strong" => Ok(Self::VeryStrong),
            _ => Err(format!(
                "Unknown strength level '{}'. Valid options: very_weak, weak, normal, strong, very_strong",
                s
            )),
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the body diagram is being viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSide {
    #[default]
    Front,
    Back,
}

impl FromStr for ViewSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            _ => Err(format!("Invalid side: '{}'. Valid options: front, back", s)),
        }
    }
}

impl std::fmt::Display for ViewSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Display language for catalog labels and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    /// Pick the text matching this language
    pub fn pick<'a>(self, ko: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Ko => ko,
            Self::En => en,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ko" | "kor" | "korean" => Ok(Self::Ko),
            "en" | "eng" | "english" => Ok(Self::En),
            _ => Err(format!("Invalid language: '{}'. Valid options: ko, en", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ko => write!(f, "ko"),
            Self::En => write!(f, "en"),
        }
    }
}

/// Sparse mapping from muscle id to strength level
///
/// A muscle with no entry is equivalent to one marked `Normal`. Entries are
/// kept sorted by id so serialized snapshots are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MuscleStateMap(BTreeMap<String, StrengthLevel>);

impl MuscleStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, muscle_id: &str) -> Option<StrengthLevel> {
        self.0.get(muscle_id).copied()
    }

    pub fn set(&mut self, muscle_id: impl Into<String>, level: StrengthLevel) {
        self.0.insert(muscle_id.into(), level);
    }

    pub fn remove(&mut self, muscle_id: &str) -> Option<StrengthLevel> {
        self.0.remove(muscle_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StrengthLevel)> {
        self.0.iter().map(|(id, level)| (id.as_str(), *level))
    }
}

impl<S: Into<String>> FromIterator<(S, StrengthLevel)> for MuscleStateMap {
    fn from_iter<I: IntoIterator<Item = (S, StrengthLevel)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, level)| (id.into(), level)).collect())
    }
}

impl From<BTreeMap<String, StrengthLevel>> for MuscleStateMap {
    fn from(map: BTreeMap<String, StrengthLevel>) -> Self {
        Self(map)
    }
}

/// Level as it appears on the wire, before lenient interpretation
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Name(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for MuscleStateMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawLevel>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(id, level)| {
                let level = match level {
                    RawLevel::Name(name) => StrengthLevel::from_lenient(&name),
                    RawLevel::Other(_) => {
                        tracing::warn!(muscle = %id, "Non-text strength level, treating as normal");
                        StrengthLevel::Normal
                    }
                };
                (id, level)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_level_values() {
        let values: Vec<i32> = StrengthLevel::ALL.iter().map(|l| l.value()).collect();
        assert_eq!(values, vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    fn test_strength_level_order_matches_values() {
        for pair in StrengthLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn test_strength_level_from_str() {
        assert_eq!("very_weak".parse::<StrengthLevel>().unwrap(), StrengthLevel::VeryWeak);
        assert_eq!("VERY-STRONG".parse::<StrengthLevel>().unwrap(), StrengthLevel::VeryStrong);
        assert_eq!(" weak ".parse::<StrengthLevel>().unwrap(), StrengthLevel::Weak);

        let err = "floppy".parse::<StrengthLevel>().unwrap_err();
        assert!(err.contains("Unknown strength level 'floppy'"));
    }

    #[test]
    fn test_strength_level_lenient_defaults_to_normal() {
        assert_eq!(StrengthLevel::from_lenient("floppy"), StrengthLevel::Normal);
        assert_eq!(StrengthLevel::from_lenient("strong"), StrengthLevel::Strong);
    }

    #[test]
    fn test_strength_level_lenient_requires_wire_names() {
        for variant in ["WEAK", "very-weak", "VERY-WEAK", " Very_Strong ", "Strong"] {
            assert_eq!(StrengthLevel::from_lenient(variant), StrengthLevel::Normal, "{}", variant);
        }
        assert_eq!(StrengthLevel::from_wire("very_strong"), Some(StrengthLevel::VeryStrong));
        assert_eq!(StrengthLevel::from_wire("Weak"), None);
    }

    #[test]
    fn test_strength_level_serde_names() {
        let json = serde_json::to_string(&StrengthLevel::VeryWeak).unwrap();
        assert_eq!(json, "\"very_weak\"");
    }

    #[test]
    fn test_view_side_parse_and_display() {
        assert_eq!("BACK".parse::<ViewSide>().unwrap(), ViewSide::Back);
        assert_eq!(ViewSide::Front.to_string(), "front");
        assert!("side".parse::<ViewSide>().is_err());
        assert_eq!(ViewSide::default(), ViewSide::Front);
    }

    #[test]
    fn test_language_pick() {
        assert_eq!(Language::Ko.pick("승모근", "Trapezius"), "승모근");
        assert_eq!(Language::En.pick("승모근", "Trapezius"), "Trapezius");
        assert_eq!("English".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn test_muscle_state_map_is_sorted_and_sparse() {
        let mut map = MuscleStateMap::new();
        map.set("triceps", StrengthLevel::Weak);
        map.set("biceps", StrengthLevel::Strong);

        let ids: Vec<&str> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["biceps", "triceps"]);
        assert_eq!(map.get("quadriceps"), None);

        assert_eq!(map.remove("biceps"), Some(StrengthLevel::Strong));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_muscle_state_map_deserialize_is_lenient() {
        let map: MuscleStateMap = serde_json::from_str(
            r#"{"biceps": "very_strong", "triceps": "wobbly", "calves": 3, "neck": null}"#,
        )
        .unwrap();

        assert_eq!(map.get("biceps"), Some(StrengthLevel::VeryStrong));
        assert_eq!(map.get("triceps"), Some(StrengthLevel::Normal));
        assert_eq!(map.get("calves"), Some(StrengthLevel::Normal));
        assert_eq!(map.get("neck"), Some(StrengthLevel::Normal));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_muscle_state_map_rejects_non_object() {
        let result: Result<MuscleStateMap, _> = serde_json::from_str(r#"["biceps"]"#);
        assert!(result.is_err());
    }
}
