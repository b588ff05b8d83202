//! Difficulty catalog: the static mapping from a difficulty name to its
//! time limit, allowed operations and operand range.

use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Multiply,
    Divide,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Multiply => "multiply",
            OperationKind::Divide => "divide",
        };
        write!(f, "{}", s)
    }
}

/// Configuration for one difficulty level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub name: String,
    pub time_limit_secs: u32,
    pub operations: Vec<OperationKind>,
    pub min: i64,
    pub max: i64,
}

impl DifficultyProfile {
    pub fn new(
        name: impl Into<String>,
        time_limit_secs: u32,
        operations: Vec<OperationKind>,
        range: RangeInclusive<i64>,
    ) -> Self {
        Self {
            name: name.into(),
            time_limit_secs,
            operations,
            min: *range.start(),
            max: *range.end(),
        }
    }

    pub fn operand_range(&self) -> RangeInclusive<i64> {
        self.min..=self.max
    }

    /// Whether every product of two operands in range fits in an `i64`.
    pub fn products_fit(&self) -> bool {
        let (lo, hi) = (self.min, self.max);
        [(lo, lo), (lo, hi), (hi, hi)]
            .iter()
            .all(|(a, b)| a.checked_mul(*b).is_some())
    }

    fn validate(&self) -> QuizResult<()> {
        let invalid = |reason: String| -> QuizResult<()> { Err(QuizError::InvalidProfile(reason)) };

        if self.name.trim().is_empty() {
            return invalid("profile name must not be empty".to_string());
        }
        if self.time_limit_secs == 0 {
            return invalid(format!("{}: time limit must be positive", self.name));
        }
        if self.operations.is_empty() {
            return invalid(format!("{}: at least one operation is required", self.name));
        }
        if self.min > self.max {
            return invalid(format!(
                "{}: range lower bound {} exceeds upper bound {}",
                self.name, self.min, self.max
            ));
        }
        if !self.products_fit() {
            return invalid(format!(
                "{}: operands {}..={} are too large to multiply",
                self.name, self.min, self.max
            ));
        }
        if self.operations.contains(&OperationKind::Divide) && self.min == 0 && self.max == 0 {
            return invalid(format!(
                "{}: division needs a non-zero value in the operand range",
                self.name
            ));
        }
        Ok(())
    }
}

/// On-disk shape of a profile in a catalog JSON file.
#[derive(Debug, Deserialize)]
struct ProfileEntry {
    name: String,
    time_limit_secs: u32,
    operations: Vec<OperationKind>,
    range: [i64; 2],
}

impl From<ProfileEntry> for DifficultyProfile {
    fn from(entry: ProfileEntry) -> Self {
        let mut operations = Vec::with_capacity(entry.operations.len());
        for op in entry.operations {
            if !operations.contains(&op) {
                operations.push(op);
            }
        }
        DifficultyProfile::new(
            entry.name,
            entry.time_limit_secs,
            operations,
            entry.range[0]..=entry.range[1],
        )
    }
}

static REFERENCE_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    profiles: vec![
        DifficultyProfile::new("easy", 60, vec![OperationKind::Multiply], 1..=10),
        DifficultyProfile::new(
            "medium",
            45,
            vec![OperationKind::Multiply, OperationKind::Divide],
            1..=12,
        ),
        DifficultyProfile::new(
            "hard",
            30,
            vec![OperationKind::Multiply, OperationKind::Divide],
            1..=20,
        ),
    ],
});

/// Ordered, validated set of difficulty profiles.
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<DifficultyProfile>,
}

impl Catalog {
    /// Build a catalog, validating every profile and rejecting duplicate names.
    pub fn new(profiles: Vec<DifficultyProfile>) -> QuizResult<Self> {
        if profiles.is_empty() {
            return Err(QuizError::InvalidProfile(
                "catalog must contain at least one profile".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(QuizError::InvalidProfile(format!(
                    "duplicate difficulty name: {}",
                    profile.name
                )));
            }
        }

        Ok(Self { profiles })
    }

    /// The easy / medium / hard catalog the game ships with.
    pub fn reference() -> Self {
        REFERENCE_CATALOG.clone()
    }

    /// Parse a JSON array of profile entries.
    pub fn from_json(json: &str) -> QuizResult<Self> {
        let entries: Vec<ProfileEntry> = serde_json::from_str(json)
            .map_err(|e| QuizError::InvalidProfile(format!("malformed catalog: {e}")))?;
        Self::new(entries.into_iter().map(DifficultyProfile::from).collect())
    }

    pub fn lookup(&self, name: &str) -> QuizResult<&DifficultyProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| QuizError::UnknownDifficulty(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn profiles(&self) -> &[DifficultyProfile] {
        &self.profiles
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_catalog_matches_table() {
        let catalog = Catalog::reference();
        assert_eq!(catalog.names(), vec!["easy", "medium", "hard"]);

        let easy = catalog.lookup("easy").unwrap();
        assert_eq!(easy.time_limit_secs, 60);
        assert_eq!(easy.operations, vec![OperationKind::Multiply]);
        assert_eq!(easy.operand_range(), 1..=10);

        let medium = catalog.lookup("medium").unwrap();
        assert_eq!(medium.time_limit_secs, 45);
        assert_eq!(
            medium.operations,
            vec![OperationKind::Multiply, OperationKind::Divide]
        );
        assert_eq!(medium.operand_range(), 1..=12);

        let hard = catalog.lookup("hard").unwrap();
        assert_eq!(hard.time_limit_secs, 30);
        assert_eq!(hard.operand_range(), 1..=20);
    }

    #[test]
    fn test_reference_catalog_is_valid() {
        let reference = Catalog::reference();
        assert!(Catalog::new(reference.profiles().to_vec()).is_ok());
    }

    #[test]
    fn test_lookup_unknown_difficulty() {
        let catalog = Catalog::reference();
        let err = catalog.lookup("expert").unwrap_err();
        assert!(matches!(err, QuizError::UnknownDifficulty(name) if name == "expert"));
    }

    #[test]
    fn test_rejects_zero_time_limit() {
        let profile = DifficultyProfile::new("zen", 0, vec![OperationKind::Multiply], 1..=5);
        assert!(matches!(
            Catalog::new(vec![profile]),
            Err(QuizError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_rejects_empty_operations() {
        let profile = DifficultyProfile::new("bare", 10, vec![], 1..=5);
        assert!(matches!(
            Catalog::new(vec![profile]),
            Err(QuizError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let profile = DifficultyProfile::new("upside", 10, vec![OperationKind::Multiply], 9..=3);
        assert!(Catalog::new(vec![profile]).is_err());
    }

    #[test]
    fn test_rejects_zero_only_division_range() {
        let profile = DifficultyProfile::new("void", 10, vec![OperationKind::Divide], 0..=0);
        assert!(Catalog::new(vec![profile]).is_err());

        // Multiplication by zero is fine.
        let profile = DifficultyProfile::new("void", 10, vec![OperationKind::Multiply], 0..=0);
        assert!(Catalog::new(vec![profile]).is_ok());
    }

    #[test]
    fn test_rejects_overflowing_range() {
        let json = r#"[
            {"name": "huge", "time_limit_secs": 30,
             "operations": ["multiply"], "range": [4000000000, 5000000000]}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(QuizError::InvalidProfile(msg)) if msg.contains("too large")
        ));

        let negative = DifficultyProfile::new(
            "deep",
            30,
            vec![OperationKind::Divide],
            -5_000_000_000..=2,
        );
        assert!(Catalog::new(vec![negative]).is_err());

        let wide = DifficultyProfile::new(
            "wide",
            30,
            vec![OperationKind::Multiply],
            -3_000_000_000..=3_000_000_000,
        );
        assert!(Catalog::new(vec![wide]).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let a = DifficultyProfile::new("twin", 10, vec![OperationKind::Multiply], 1..=5);
        let b = a.clone();
        assert!(Catalog::new(vec![a, b]).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "warmup", "time_limit_secs": 90, "operations": ["multiply"], "range": [2, 5]},
            {"name": "sprint", "time_limit_secs": 20,
             "operations": ["divide", "multiply", "divide"], "range": [0, 9]}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.names(), vec!["warmup", "sprint"]);

        let sprint = catalog.lookup("sprint").unwrap();
        assert_eq!(
            sprint.operations,
            vec![OperationKind::Divide, OperationKind::Multiply]
        );
        assert_eq!(sprint.operand_range(), 0..=9);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(QuizError::InvalidProfile(_))
        ));
        assert!(Catalog::from_json("[]").is_err());
    }
}
