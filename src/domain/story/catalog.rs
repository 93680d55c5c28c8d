use super::word_budget::{resolve_word_budget, StoryDuration, WordCountRange};
use serde::Serialize;

pub const THEMES: &[&str] = &[
    "Adventure & Exploration",
    "Fantasy & Magic",
    "Animals & Nature",
    "Fairy Tales & Folklore",
    "Friendship & Family",
    "Educational & Moral Lessons",
    "Humor & Fun",
    "Science Fiction & Space",
    "Mystery & Detective",
    "Everyday Life & School",
];

/// Classic books a story can draw inspiration from
pub const BOOKS: &[&str] = &[
    "Treasure Island",
    "Around the World in Eighty Days",
    "Twenty Thousand Leagues Under the Seas",
    "Journey to the Center of the Earth",
    "The Adventures of Tom Sawyer",
    "The Adventures of Huckleberry Finn",
    "Oliver Twist",
    "The Jungle Book",
    "Robinson Crusoe",
    "Gulliver's Travels",
    "Heidi",
    "Peter Pan",
    "Anne of Green Gables",
    "The Call of the Wild",
    "White Fang",
    "Little Lord Fauntleroy",
    "The Merry Adventures of Robin Hood",
    "Swiss Family Robinson",
    "The Secret Garden",
    "Black Beauty",
];

#[derive(Debug, Serialize)]
pub struct DurationOption {
    pub duration: StoryDuration,
    pub words: WordCountRange,
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub themes: Vec<&'static str>,
    pub books: Vec<&'static str>,
    pub durations: Vec<DurationOption>,
}

pub fn catalog() -> Catalog {
    Catalog {
        themes: THEMES.to_vec(),
        books: BOOKS.to_vec(),
        durations: StoryDuration::ALL
            .into_iter()
            .map(|duration| DurationOption {
                duration,
                words: resolve_word_budget(duration),
            })
            .collect(),
    }
}
