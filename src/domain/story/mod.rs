pub mod catalog;
pub mod illustration;
pub mod service;
pub mod word_budget;

pub use illustration::compose_illustration_prompt;
pub use service::{StoryService, StoryServiceApi};
pub use word_budget::{resolve_word_budget, StoryDuration, WordCountRange};

use crate::domain::shared::StoryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "English".to_string()
}

/// Everything needed to generate one story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub age: u32,
    pub theme_or_brief: String,
    #[serde(default)]
    pub duration: StoryDuration,
    #[serde(default)]
    pub personalized: bool,
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl StoryRequest {
    pub fn new(age: u32, theme_or_brief: impl Into<String>) -> Self {
        Self {
            age,
            theme_or_brief: theme_or_brief.into(),
            duration: StoryDuration::default(),
            personalized: false,
            child_name: None,
            parent_name: None,
            language: default_language(),
        }
    }

    pub fn with_duration(mut self, duration: StoryDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn personalized_for(
        mut self,
        child_name: impl Into<String>,
        parent_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.personalized = true;
        self.child_name = Some(child_name.into());
        self.parent_name = Some(parent_name.into());
        self.language = language.into();
        self
    }

    /// Check the request before any provider is contacted
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.theme_or_brief.trim().is_empty() {
            return Err(StoryError::Validation(
                "A theme, book or story brief is required.".to_string(),
            ));
        }

        if self.personalized {
            let missing = |value: Option<&str>| value.map_or(true, |v| v.trim().is_empty());
            if missing(self.child_name.as_deref())
                || missing(self.parent_name.as_deref())
                || self.language.trim().is_empty()
            {
                return Err(StoryError::Validation(
                    "Personalization is enabled, but required details (child name, parent name, story language) are missing."
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// A validated story, ready to be persisted by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedStory {
    pub title: String,
    pub content: String,
    pub icon_url: String,
}

impl GeneratedStory {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Where the story idea comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StorySource {
    Theme(String),
    Book(String),
    Custom(String),
}

impl StorySource {
    pub fn as_theme(&self) -> &str {
        match self {
            StorySource::Theme(value) | StorySource::Book(value) | StorySource::Custom(value) => {
                value
            }
        }
    }
}

/// Request for POST /api/stories/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    pub age: u32,
    pub source: StorySource,
    #[serde(default)]
    pub duration: StoryDuration,
    #[serde(default)]
    pub personalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl TryFrom<CreateStoryRequest> for StoryRequest {
    type Error = StoryError;

    fn try_from(request: CreateStoryRequest) -> Result<Self, Self::Error> {
        if request.personalized && matches!(request.source, StorySource::Book(_)) {
            return Err(StoryError::Validation(
                "Book-inspired stories cannot be personalized.".to_string(),
            ));
        }

        Ok(StoryRequest {
            age: request.age,
            theme_or_brief: request.source.as_theme().trim().to_string(),
            duration: request.duration,
            personalized: request.personalized,
            child_name: request.child_name,
            parent_name: request.parent_name,
            language: request.language.unwrap_or_else(default_language),
        })
    }
}

/// Response for POST /api/stories/generate: the story plus the request metadata
/// the caller stores alongside it
#[derive(Debug, Serialize, Deserialize)]
pub struct StoryResponse {
    pub title: String,
    pub content: String,
    pub icon_url: String,
    pub theme: String,
    pub age: u32,
    pub duration: StoryDuration,
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
}

impl StoryResponse {
    pub fn new(story: GeneratedStory, request: &StoryRequest) -> Self {
        let word_count = story.word_count();
        Self {
            title: story.title,
            content: story.content,
            icon_url: story.icon_url,
            theme: request.theme_or_brief.clone(),
            age: request.age,
            duration: request.duration,
            word_count,
            created_at: Utc::now(),
        }
    }
}
