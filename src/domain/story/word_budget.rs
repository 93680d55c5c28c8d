use serde::{Deserialize, Serialize};

/// Coarse story length selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum StoryDuration {
    Short,
    #[default]
    Standard,
    Long,
}

impl StoryDuration {
    pub const ALL: [StoryDuration; 3] = [
        StoryDuration::Short,
        StoryDuration::Standard,
        StoryDuration::Long,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryDuration::Short => "Short",
            StoryDuration::Standard => "Standard",
            StoryDuration::Long => "Long",
        }
    }

    /// Parse a duration label; anything unrecognized is `Standard`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "short" => StoryDuration::Short,
            "long" => StoryDuration::Long,
            _ => StoryDuration::Standard,
        }
    }
}

impl From<String> for StoryDuration {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl std::fmt::Display for StoryDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target/min/max word counts for a duration. Always `min <= target <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordCountRange {
    pub target: usize,
    pub min: usize,
    pub max: usize,
}

impl WordCountRange {
    pub fn contains(&self, word_count: usize) -> bool {
        word_count >= self.min && word_count <= self.max
    }

    /// Advisory message when `word_count` falls outside the range
    pub fn length_diagnostic(&self, word_count: usize) -> Option<String> {
        if self.contains(word_count) {
            None
        } else {
            Some(format!(
                "Story length ({} words) differs from target range ({}-{} words)",
                word_count, self.min, self.max
            ))
        }
    }
}

pub fn resolve_word_budget(duration: StoryDuration) -> WordCountRange {
    match duration {
        StoryDuration::Short => WordCountRange {
            target: 300,
            min: 250,
            max: 350,
        },
        StoryDuration::Standard => WordCountRange {
            target: 600,
            min: 500,
            max: 700,
        },
        StoryDuration::Long => WordCountRange {
            target: 900,
            min: 800,
            max: 1000,
        },
    }
}
