//! Project attributes - the immutable input to an evaluation.

use serde::{Deserialize, Serialize};

use super::Platform;

/// Genre used when none is supplied.
pub const DEFAULT_GENRE: &str = "Unknown";

/// Target audience used when none is supplied.
pub const DEFAULT_TARGET_AUDIENCE: &str = "general";

/// A proposed film or TV project.
///
/// Every field except the description is optional on the wire and falls
/// back to a neutral default, so a sparse request still produces a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectAttributes {
    pub description: String,
    /// Production budget in whole currency units.
    pub budget: u64,
    pub genre: String,
    pub platform: Platform,
    pub target_audience: String,
    /// Comparable titles, in the order supplied.
    pub comparables: Vec<String>,
}

impl Default for ProjectAttributes {
    fn default() -> Self {
        Self {
            description: String::new(),
            budget: 0,
            genre: DEFAULT_GENRE.to_string(),
            platform: Platform::default(),
            target_audience: DEFAULT_TARGET_AUDIENCE.to_string(),
            comparables: Vec::new(),
        }
    }
}

impl ProjectAttributes {
    /// Creates a project with the given description and default attributes.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Sets the production budget.
    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the genre. Blank input keeps the default.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        let genre = genre.into();
        if !genre.trim().is_empty() {
            self.genre = genre.trim().to_string();
        }
        self
    }

    /// Sets the distribution platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the target audience.
    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = audience.into();
        self
    }

    /// Sets the comparable titles.
    pub fn with_comparables<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comparables = titles.into_iter().map(Into::into).collect();
        self
    }

    /// True when a positive budget was supplied.
    pub fn has_budget(&self) -> bool {
        self.budget > 0
    }

    /// True when at least one comparable title was supplied.
    pub fn has_comparables(&self) -> bool {
        !self.comparables.is_empty()
    }

    /// True when a real genre (not the placeholder) was supplied.
    pub fn has_known_genre(&self) -> bool {
        self.genre != DEFAULT_GENRE
    }

    /// Short working title: the first five words of the description.
    pub fn working_title(&self) -> String {
        let words: Vec<&str> = self.description.split_whitespace().collect();
        let mut title = words.iter().take(5).copied().collect::<Vec<_>>().join(" ");
        if words.len() > 5 {
            title.push_str("...");
        }
        if title.is_empty() {
            title.push_str("Untitled");
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_missing_field_policy() {
        let project = ProjectAttributes::default();
        assert_eq!(project.budget, 0);
        assert_eq!(project.genre, "Unknown");
        assert_eq!(project.platform, Platform::Theatrical);
        assert_eq!(project.target_audience, "general");
        assert!(project.comparables.is_empty());
    }

    #[test]
    fn sparse_json_deserializes_with_defaults() {
        let project: ProjectAttributes =
            serde_json::from_str(r#"{"description": "A heist in space"}"#).unwrap();

        assert_eq!(project.description, "A heist in space");
        assert_eq!(project.genre, "Unknown");
        assert_eq!(project.platform, Platform::Theatrical);
    }

    #[test]
    fn builder_sets_all_fields() {
        let project = ProjectAttributes::new("Desc")
            .with_budget(20_000_000)
            .with_genre("Horror")
            .with_platform(Platform::Streaming)
            .with_target_audience("18-34")
            .with_comparables(["Get Out", "Us"]);

        assert!(project.has_budget());
        assert!(project.has_comparables());
        assert!(project.has_known_genre());
        assert_eq!(project.comparables, vec!["Get Out", "Us"]);
        assert_eq!(project.target_audience, "18-34");
    }

    #[test]
    fn blank_genre_keeps_default() {
        let project = ProjectAttributes::new("Desc").with_genre("   ");
        assert_eq!(project.genre, "Unknown");
        assert!(!project.has_known_genre());
    }

    #[test]
    fn working_title_truncates_long_descriptions() {
        let project = ProjectAttributes::new("A retired astronaut returns to the moon for one last job");
        assert_eq!(project.working_title(), "A retired astronaut returns to...");

        let short = ProjectAttributes::new("Night Shift");
        assert_eq!(short.working_title(), "Night Shift");

        assert_eq!(ProjectAttributes::default().working_title(), "Untitled");
    }
}
