//! Builds the image-generation prompt for a story's cover illustration.
//!
//! The prompt is assembled from the theme, the reader's age and the generated text.
//! Composition is a pure function: identical inputs always yield the same prompt.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_CHARACTERS: usize = 3;

static CHARACTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*").expect("valid character pattern"));

static THEME_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[&,\s]+").expect("valid theme separator pattern"));

/// Keyword groups and the imagery each one adds to the prompt
const THEME_EMBELLISHMENTS: &[(&[&str], &str)] = &[
    (
        &["adventure", "exploration"],
        "Show a sense of discovery and excitement.",
    ),
    (
        &["fantasy", "magic"],
        "Include magical elements and ethereal lighting.",
    ),
    (
        &["animals", "nature"],
        "Emphasize natural elements and wildlife.",
    ),
    (
        &["friendship", "family"],
        "Highlight warm interactions and emotional connections.",
    ),
];

const CLOSING_DIRECTIVE: &str = "Ensure the illustration is high-quality, well-composed, and suitable for a professional children's book. The style should be clean and polished, avoiding any dark or scary elements.";

/// Compose the illustration prompt for a generated story
pub fn compose_illustration_prompt(theme: &str, age: u32, title: &str, body: &str) -> String {
    let mut sentences = Vec::new();

    sentences.push(format!(
        "Create a story illustration for \"{}\" that captures the essence of {}.",
        title, theme
    ));

    if let Some(scene) = scene_anchor(body) {
        let terminator = if scene.ends_with(['.', '!', '?']) { "" } else { "." };
        sentences.push(format!("The scene should depict: {}{}", scene, terminator));
    }

    let characters = extract_characters(body);
    if !characters.is_empty() {
        sentences.push(format!(
            "Include the main characters: {}.",
            characters.join(", ")
        ));
    }

    sentences.push(format!(
        "Use a {}. The image should be rich in detail and emotion, with vibrant colors and clear focal points. Make it engaging and memorable for {}-year-old readers.",
        art_style_for_age(age),
        age
    ));

    for embellishment in theme_embellishments(&theme_keywords(theme)) {
        sentences.push(embellishment.to_string());
    }

    sentences.push(CLOSING_DIRECTIVE.to_string());

    sentences.join(" ")
}

/// First paragraph of the body, if it has any content
fn scene_anchor(body: &str) -> Option<&str> {
    body.split('\n')
        .next()
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

/// Capitalized word sequences, de-duplicated in order of first appearance, at most three
pub fn extract_characters(body: &str) -> Vec<String> {
    let mut characters: Vec<String> = Vec::new();
    for found in CHARACTER_PATTERN.find_iter(body) {
        let name = found.as_str().to_string();
        if !characters.contains(&name) {
            characters.push(name);
            if characters.len() == MAX_CHARACTERS {
                break;
            }
        }
    }
    characters
}

/// Lowercase keywords of a theme, split on `&`, commas and whitespace
pub fn theme_keywords(theme: &str) -> Vec<String> {
    THEME_SEPARATOR
        .split(&theme.to_lowercase())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn art_style_for_age(age: u32) -> &'static str {
    match age {
        0..=5 => "simple, colorful, and cute illustration style similar to board books",
        6..=8 => "whimsical and engaging illustration style like modern picture books",
        9..=12 => "detailed and imaginative illustration style like middle-grade books",
        _ => "sophisticated yet accessible illustration style for young teens",
    }
}

/// Embellishments triggered by the keywords, each at most once, in keyword order
fn theme_embellishments(keywords: &[String]) -> Vec<&'static str> {
    let mut selected = Vec::new();
    for keyword in keywords {
        let matched = THEME_EMBELLISHMENTS
            .iter()
            .find(|(triggers, _)| triggers.contains(&keyword.as_str()))
            .map(|(_, sentence)| *sentence);
        if let Some(sentence) = matched {
            if !selected.contains(&sentence) {
                selected.push(sentence);
            }
        }
    }
    selected
}
