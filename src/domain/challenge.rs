use serde::{Deserialize, Serialize};

/// Stable identity key of a challenge
pub type ChallengeId = u32;

/// Topic area a challenge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    HooksAndState,
    Performance,
    Architecture,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::HooksAndState,
        Category::Performance,
        Category::Architecture,
    ];

    /// Identifier used in collection files and filter input
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HooksAndState => "HooksAndState",
            Self::Performance => "Performance",
            Self::Architecture => "Architecture",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::HooksAndState => "Hooks & State",
            Self::Performance => "Performance",
            Self::Architecture => "Architecture",
        }
    }

    /// Parse from either the identifier or the label. Case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.label() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How demanding a challenge is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single catalog entry.
///
/// Only `id`, `category`, `difficulty`, `title` and `description` are read by the
/// engine. Everything else is content for the presentation layer and the code sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: ChallengeId,
    pub category: Category,
    pub difficulty: Difficulty,
    pub title: String,
    pub description: String,

    /// Rough time estimate shown next to the title (e.g. "25 min")
    #[serde(default)]
    pub time_estimate: String,

    #[serde(default)]
    pub starter_code: String,

    #[serde(default)]
    pub solution_code: String,

    /// Test code handed to the sandbox alongside the user's code
    #[serde(default)]
    pub test_code: Option<String>,

    #[serde(default)]
    pub hints: Vec<String>,
}

impl Challenge {
    /// Create a challenge with empty content payload
    pub fn new(
        id: ChallengeId,
        category: Category,
        difficulty: Difficulty,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category,
            difficulty,
            title: title.into(),
            description: description.into(),
            time_estimate: String::new(),
            starter_code: String::new(),
            solution_code: String::new(),
            test_code: None,
            hints: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_accepts_name_and_label() {
        assert_eq!(Category::parse("HooksAndState"), Some(Category::HooksAndState));
        assert_eq!(Category::parse("Hooks & State"), Some(Category::HooksAndState));
        assert_eq!(Category::parse("Performance"), Some(Category::Performance));
        assert_eq!(Category::parse("performance"), None);
        assert_eq!(Category::parse("Networking"), None);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("Expert"), Some(Difficulty::Expert));
        assert_eq!(Difficulty::parse("Easy"), None);
    }

    #[test]
    fn test_challenge_deserializes_with_defaults() {
        let json = r#"{
            "id": 7,
            "category": "Architecture",
            "difficulty": "Hard",
            "title": "Compound components",
            "description": "Share implicit state between components",
            "starterCode": "export function Tabs() {}"
        }"#;
        let challenge: Challenge = serde_json::from_str(json).unwrap();
        assert_eq!(challenge.id, 7);
        assert_eq!(challenge.category, Category::Architecture);
        assert_eq!(challenge.starter_code, "export function Tabs() {}");
        assert!(challenge.test_code.is_none());
        assert!(challenge.hints.is_empty());
    }
}
