//! Keyword and summary extraction.
//!
//! [`FrequencyNlp`] is a small term-frequency model: keywords are the most
//! frequent non-stopwords, and summary sentences are ranked by title
//! overlap, keyword density, length and position in the text.

pub mod stopwords;

use std::collections::{HashMap, HashSet};

use crate::patterns::NON_WORD;

pub use stopwords::{StopWords, StopwordCache, WordStats};

/// Keywords computed per text when ranking summary sentences.
const SUMMARY_KEYWORDS: usize = 10;

/// Sentence length (in words) that earns the full length score.
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// Sentences this short (in characters) are dropped.
const MIN_SENTENCE_CHARS: usize = 10;

/// Tokens ending in a period that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "gen", "gov", "sen", "rep", "col", "lt", "sgt", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec", "no", "fig", "e.g", "i.e", "u.s", "u.k", "a.m",
    "p.m",
];

/// A ranked keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub word: String,
    pub score: f64,
}

/// Keyword and summary collaborator.
pub trait Nlp: Send + Sync {
    /// Up to `max_keywords` keywords, best first.
    fn keywords(&self, text: &str, stopwords: &StopWords, max_keywords: usize) -> Vec<Keyword>;

    /// Up to `max_sentences` sentences of `text`, in text order.
    fn summarize(
        &self,
        title: &str,
        text: &str,
        max_sentences: usize,
        stopwords: &StopWords,
    ) -> Vec<String>;
}

/// Term-frequency keywords and sentence-scoring summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyNlp;

impl Nlp for FrequencyNlp {
    fn keywords(&self, text: &str, stopwords: &StopWords, max_keywords: usize) -> Vec<Keyword> {
        keywords(text, stopwords, max_keywords)
    }

    fn summarize(
        &self,
        title: &str,
        text: &str,
        max_sentences: usize,
        stopwords: &StopWords,
    ) -> Vec<String> {
        summarize(title, text, max_sentences, stopwords)
    }
}

/// Lowercased words with punctuation removed.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::nlp::split_words;
///
/// assert_eq!(split_words("Hello, World! It's 2024."), vec!["hello", "world", "its", "2024"]);
/// ```
#[must_use]
pub fn split_words(text: &str) -> Vec<String> {
    NON_WORD
        .replace_all(text, "")
        .split_whitespace()
        .map(|w| w.trim_matches('.').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Most frequent non-stopwords, scored `freq / total_words * 1.5 + 1`.
///
/// Ties in frequency are ordered by word, descending.
#[must_use]
pub fn keywords(text: &str, stopwords: &StopWords, max_keywords: usize) -> Vec<Keyword> {
    let words = split_words(text);
    if words.is_empty() {
        return Vec::new();
    }
    let total = words.len();

    let mut freq: HashMap<String, usize> = HashMap::new();
    for word in words.into_iter().filter(|w| !stopwords.contains(w)) {
        *freq.entry(word).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    ranked.truncate(max_keywords);

    ranked
        .into_iter()
        .map(|(word, count)| Keyword {
            word,
            score: count as f64 / total as f64 * 1.5 + 1.0,
        })
        .collect()
}

/// Split text into sentences.
///
/// Blank lines always end a sentence. A `.`, `!` or `?` ends one when it is
/// followed by whitespace and a non-lowercase character, unless the period
/// closes a known abbreviation or a single-letter initial. Sentences of
/// 10 characters or fewer are dropped.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::nlp::split_sentences;
///
/// let text = "Mr. Smith went to Washington. He met Dr. Jones there! Was it fun?";
/// assert_eq!(
///     split_sentences(text),
///     vec!["Mr. Smith went to Washington.", "He met Dr. Jones there!", "Was it fun?"]
/// );
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in text.split("\n\n") {
        split_paragraph(paragraph, &mut sentences);
    }
    sentences
        .into_iter()
        .map(|s| crate::dom::collapse_whitespace(&s))
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

fn split_paragraph(paragraph: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !matches!(chars[i], '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < chars.len()
            && matches!(chars[end], '.' | '!' | '?' | '"' | '\'' | ')' | '\u{201D}' | '\u{2019}')
        {
            end += 1;
        }

        let next = chars[end..].iter().find(|c| !c.is_whitespace());
        let boundary = end == chars.len()
            || (chars[end].is_whitespace() && !next.is_some_and(|c| c.is_lowercase()));
        let abbreviation = chars[i] == '.' && is_abbreviation(&chars[start..i]);

        if boundary && !abbreviation {
            out.push(chars[start..end].iter().collect());
            start = end;
        }
        i = end;
    }

    if start < chars.len() {
        out.push(chars[start..].iter().collect());
    }
}

/// Whether the token right before a period is an abbreviation or initial.
fn is_abbreviation(before: &[char]) -> bool {
    let token: String = before
        .iter()
        .rev()
        .take_while(|c| !c.is_whitespace())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let token = token
        .trim_start_matches(['(', '"', '\'', '\u{201C}'])
        .to_lowercase();

    let mut letters = token.chars();
    let initial = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_alphabetic());
    initial || ABBREVIATIONS.contains(&token.as_str())
}

/// The `max_sentences` best sentences of `text`, in text order.
///
/// Empty when the title or text is empty or `max_sentences` is zero.
#[must_use]
pub fn summarize(title: &str, text: &str, max_sentences: usize, stopwords: &StopWords) -> Vec<String> {
    if text.trim().is_empty() || title.trim().is_empty() || max_sentences == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text);
    let keywords: HashMap<String, f64> = keywords(text, stopwords, SUMMARY_KEYWORDS)
        .into_iter()
        .map(|k| (k.word, k.score))
        .collect();
    let title_words = split_words(title);

    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let words = split_words(sentence);
            let title = title_score(&title_words, &words, stopwords);
            let length = length_score(words.len());
            let position = sentence_position(i + 1, sentences.len());
            let frequency = (sbs(&words, &keywords) + dbs(&words, &keywords)) / 2.0 * 10.0;
            let total = (title * 1.5 + frequency * 2.0 + length + position) / 4.0;
            (i, total)
        })
        .collect();

    // stable: equal scores keep text order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(max_sentences);
    ranked.sort_by_key(|(i, _)| *i);

    ranked
        .into_iter()
        .filter_map(|(i, _)| sentences.get(i).cloned())
        .collect()
}

/// Share of the title's non-stopwords found in the sentence.
fn title_score(title: &[String], sentence: &[String], stopwords: &StopWords) -> f64 {
    if title.is_empty() {
        return 0.0;
    }
    let title: HashSet<&str> = title
        .iter()
        .filter(|w| !stopwords.contains(w))
        .map(String::as_str)
        .collect();
    let hits = sentence
        .iter()
        .filter(|w| !stopwords.contains(w) && title.contains(w.as_str()))
        .count();
    hits as f64 / title.len().max(1) as f64
}

fn length_score(words: usize) -> f64 {
    1.0 - (IDEAL_SENTENCE_WORDS - words as f64).abs() / IDEAL_SENTENCE_WORDS
}

/// Position weight: openings and the closing tenth score highest.
fn sentence_position(index: usize, total: usize) -> f64 {
    let normalized = index as f64 / total.max(1) as f64;
    match normalized {
        n if n > 1.0 => 0.0,
        n if n > 0.9 => 0.15,
        n if n > 0.8 => 0.04,
        n if n > 0.7 => 0.04,
        n if n > 0.6 => 0.06,
        n if n > 0.5 => 0.04,
        n if n > 0.4 => 0.05,
        n if n > 0.3 => 0.08,
        n if n > 0.2 => 0.14,
        n if n > 0.1 => 0.23,
        n if n > 0.0 => 0.17,
        _ => 0.0,
    }
}

/// Summation-based keyword density.
fn sbs(words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let score: f64 = words.iter().filter_map(|w| keywords.get(w)).sum();
    (score / words.len() as f64) / 10.0
}

/// Density-based keyword score: rewards keywords close to each other.
fn dbs(words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    if words.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut previous: Option<(usize, f64)> = None;
    for (i, word) in words.iter().enumerate() {
        let Some(&score) = keywords.get(word) else {
            continue;
        };
        if let Some((j, prev_score)) = previous {
            let distance = (i - j) as f64;
            sum += prev_score * score / (distance * distance);
        }
        previous = Some((i, score));
    }

    let distinct: HashSet<&String> = words.iter().filter(|w| keywords.contains_key(*w)).collect();
    let k = distinct.len() as f64 + 1.0;
    sum / (k * (k + 1.0))
}
