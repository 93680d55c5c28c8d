use super::illustration::compose_illustration_prompt;
use super::word_budget::{resolve_word_budget, WordCountRange};
use super::{GeneratedStory, StoryRequest};
use crate::domain::shared::{with_retry, ProviderOperation, RetryPolicy, StoryError};
use crate::infrastructure::repositories::{CompletionRepository, ImageRepository};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^TITLE:[ \t]*([^\n]+)").expect("valid title pattern"));
static STORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ims)^STORY:\s*(.+)").expect("valid story pattern"));

pub struct StoryService {
    completion_repo: Arc<dyn CompletionRepository>,
    image_repo: Arc<dyn ImageRepository>,
    retry_policy: RetryPolicy,
}

impl StoryService {
    pub fn new(
        completion_repo: Arc<dyn CompletionRepository>,
        image_repo: Arc<dyn ImageRepository>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            completion_repo,
            image_repo,
            retry_policy,
        }
    }
}

#[async_trait]
pub trait StoryServiceApi: Send + Sync {
    /// Generate a titled, illustrated story for `request`
    ///
    /// This operation:
    /// - Validates the request before any provider is contacted
    /// - Asks the completion provider for a `TITLE:` / `STORY:` response sized to the word budget
    /// - Composes an illustration prompt from the parsed story and requests one image
    /// - Logs a warning when the story length falls outside the budget
    ///
    /// Steps run strictly in sequence. A failure at any step fails the whole call.
    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, StoryError>;
}

#[async_trait]
impl StoryServiceApi for StoryService {
    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, StoryError> {
        let start_time = std::time::Instant::now();

        if !self.completion_repo.is_configured() || !self.image_repo.is_configured() {
            return Err(StoryError::Configuration(
                "Story provider is not configured. Please check your API key.".to_string(),
            ));
        }

        request.validate()?;

        let budget = resolve_word_budget(request.duration);
        let system_prompt = build_system_prompt(&budget);
        let user_prompt = build_user_prompt(request, &budget);

        tracing::info!(
            age = request.age,
            theme = %request.theme_or_brief,
            duration = %request.duration,
            personalized = request.personalized,
            language = %request.language,
            target_words = budget.target,
            "Generating story"
        );

        let completion = with_retry(&self.retry_policy, "story_completion", || {
            self.completion_repo.complete(&system_prompt, &user_prompt)
        })
        .await
        .map_err(|e| StoryError::from_provider(e, ProviderOperation::Story))?
        .ok_or_else(|| StoryError::Generation("No story content received from the provider".to_string()))?;

        let (title, content) = parse_story_response(&completion)?;

        let illustration_prompt =
            compose_illustration_prompt(&request.theme_or_brief, request.age, &title, &content);

        tracing::debug!(prompt_length = illustration_prompt.len(), "Requesting illustration");

        let icon_url = with_retry(&self.retry_policy, "story_illustration", || {
            self.image_repo.generate_image(&illustration_prompt)
        })
        .await
        .map_err(|e| StoryError::from_provider(e, ProviderOperation::Story))?
        .ok_or_else(|| StoryError::Generation("No image URL received from the provider".to_string()))?;

        let story = GeneratedStory {
            title,
            content,
            icon_url,
        };

        let word_count = story.word_count();
        if let Some(diagnostic) = budget.length_diagnostic(word_count) {
            tracing::warn!(
                word_count,
                min = budget.min,
                max = budget.max,
                duration = %request.duration,
                "{}",
                diagnostic
            );
        }

        tracing::info!(
            title = %story.title,
            word_count,
            latency_ms = start_time.elapsed().as_millis(),
            "Story generated"
        );

        Ok(story)
    }
}

fn build_system_prompt(budget: &WordCountRange) -> String {
    format!(
        "You are a children's story writer. Your task is to write a story targeting approximately {} words.\n\n\
         Format your response as:\n\
         TITLE: [title]\n\
         STORY: [story]\n\n\
         Focus on natural storytelling and engaging content while aiming for the target length.",
        budget.target
    )
}

fn build_user_prompt(request: &StoryRequest, budget: &WordCountRange) -> String {
    let mut prompt = format!(
        "Write a children's story in {} for age {} about {}.\n\n\
         Aim for approximately {} words, but prioritize natural storytelling and engaging content over exact word count.",
        request.language, request.age, request.theme_or_brief, budget.target
    );

    if request.personalized {
        if let (Some(child), Some(parent)) = (&request.child_name, &request.parent_name) {
            prompt.push_str(&format!(
                "\n\nInclude these names in the story:\n- Child's name: {}\n- Parent's name: {}",
                child.trim(),
                parent.trim()
            ));
        }
    }

    prompt
}

/// Extract the trimmed title and body from a `TITLE:` / `STORY:` completion
fn parse_story_response(completion: &str) -> Result<(String, String), StoryError> {
    let title = TITLE_PATTERN
        .captures(completion)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|title| !title.is_empty());

    let story = STORY_PATTERN
        .captures(completion)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|story| !story.is_empty());

    match (title, story) {
        (Some(title), Some(story)) => Ok((title.to_string(), story.to_string())),
        _ => {
            tracing::warn!(
                response_preview = %completion.chars().take(200).collect::<String>(),
                "Completion did not match TITLE/STORY format"
            );
            Err(StoryError::Format(
                "Invalid story format received from provider".to_string(),
            ))
        }
    }
}
