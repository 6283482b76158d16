//! Placeholder document text
//!
//! Each load record carries a short lorem-style paragraph as its `content`.

use crate::domain::validation_constants::text;
use nutype::nutype;
use rand::seq::IndexedRandom;
use rand::Rng;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// Number of sentences in a generated paragraph
#[nutype(
    validate(greater = 0, less_or_equal = 100),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Serialize,
        Deserialize,
        Display
    )
)]
pub struct SentenceCount(usize);

impl Default for SentenceCount {
    fn default() -> Self {
        Self::try_new(text::DEFAULT_SENTENCES).expect("default sentence count is valid")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphGenerator {
    sentences: SentenceCount,
}

impl ParagraphGenerator {
    pub fn new(sentences: SentenceCount) -> Self {
        Self { sentences }
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> String {
        (0..self.sentences.into_inner())
            .map(|_| sentence(rng))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn sentence<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(text::MIN_WORDS_PER_SENTENCE..=text::MAX_WORDS_PER_SENTENCE);
    let words: Vec<&str> = (0..len)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect();

    let mut sentence = capitalize(&words.join(" "));
    sentence.push('.');
    sentence
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
