//! Stopword lexicons and the process-wide cache.
//!
//! Lexicons are bundled into the binary and parsed on first use per
//! language. After that a set is shared read-only through an `Arc`.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::patterns::NON_WORD;

/// Bundled lexicons: (language code, one word per line).
const BUNDLED: &[(&str, &str)] = &[
    ("de", include_str!("../../resources/stopwords/de.txt")),
    ("en", include_str!("../../resources/stopwords/en.txt")),
    ("es", include_str!("../../resources/stopwords/es.txt")),
    ("fr", include_str!("../../resources/stopwords/fr.txt")),
];

static SHARED: OnceLock<Arc<StopwordCache>> = OnceLock::new();

/// Word and stopword counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    pub word_count: usize,
    pub stopword_count: usize,
}

/// Stopwords of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    language: String,
    words: HashSet<String>,
}

impl StopWords {
    /// Build a set from a newline-separated word list; blank lines and
    /// `#` comments are ignored.
    #[must_use]
    pub fn from_list(language: &str, list: &str) -> Self {
        let words = list
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self {
            language: language.to_string(),
            words,
        }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether `word` (any case) is a stopword.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Count words and stopwords in `text`, ignoring punctuation.
    #[must_use]
    pub fn stats(&self, text: &str) -> WordStats {
        let cleaned = NON_WORD.replace_all(text, "");
        let mut stats = WordStats::default();
        for word in cleaned.split_whitespace() {
            stats.word_count += 1;
            if self.contains(word) {
                stats.stopword_count += 1;
            }
        }
        stats
    }
}

/// Lazily populated, read-mostly stopword sets keyed by language code.
#[derive(Debug, Default)]
pub struct StopwordCache {
    sets: RwLock<HashMap<String, Arc<StopWords>>>,
}

impl StopwordCache {
    /// Empty cache; sets load on first [`get`](Self::get).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache, created on first call.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Language codes with a bundled lexicon.
    #[must_use]
    pub fn languages() -> Vec<&'static str> {
        BUNDLED.iter().map(|(code, _)| *code).collect()
    }

    /// Whether a lexicon exists for `language`.
    #[must_use]
    pub fn available(&self, language: &str) -> bool {
        self.contains_loaded(language) || bundled(language).is_some()
    }

    /// Stopwords for `language`, loading the bundled lexicon once.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<Arc<StopWords>> {
        let language = language.to_lowercase();
        {
            let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(set) = sets.get(&language) {
                return Some(Arc::clone(set));
            }
        }

        let list = bundled(&language)?;
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        let set = sets.entry(language.clone()).or_insert_with(|| {
            tracing::debug!(language = %language, "loading stopwords");
            Arc::new(StopWords::from_list(&language, list))
        });
        Some(Arc::clone(set))
    }

    /// Register a caller-supplied lexicon, replacing any loaded one.
    pub fn insert(&self, stopwords: StopWords) {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.insert(stopwords.language.clone(), Arc::new(stopwords));
    }

    fn contains_loaded(&self, language: &str) -> bool {
        self.sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&language.to_lowercase())
    }
}

fn bundled(language: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(language))
        .map(|(_, list)| *list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_languages_load() {
        let cache = StopwordCache::new();
        for language in StopwordCache::languages() {
            let set = cache.get(language);
            assert!(set.is_some_and(|s| !s.is_empty()), "missing {language}");
        }
    }

    #[test]
    fn test_unknown_language() {
        let cache = StopwordCache::new();
        assert!(!cache.available("xx"));
        assert!(cache.get("xx").is_none());
    }

    #[test]
    fn test_loaded_once_and_shared() {
        let cache = StopwordCache::new();
        let first = cache.get("en");
        let second = cache.get("EN");
        match (first, second) {
            (Some(a), Some(b)) => assert!(Arc::ptr_eq(&a, &b)),
            other => panic!("expected two sets, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_is_singleton() {
        assert!(Arc::ptr_eq(&StopwordCache::shared(), &StopwordCache::shared()));
    }

    #[test]
    fn test_custom_lexicon() {
        let cache = StopwordCache::new();
        cache.insert(StopWords::from_list("xx", "foo\n# comment\n\nBar\n"));
        assert!(cache.available("xx"));
        let set = cache.get("xx");
        assert!(set.as_ref().is_some_and(|s| s.contains("bar") && s.len() == 2));
    }

    #[test]
    fn test_stats_ignore_punctuation() {
        let set = StopWords::from_list("en", "the\nof\n");
        let stats = set.stats("The end of the line, friends!");
        assert_eq!(stats, WordStats { word_count: 6, stopword_count: 3 });
    }

    #[test]
    fn test_concurrent_reads() {
        let cache = Arc::new(StopwordCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get("en").map(|s| s.len()))
            })
            .collect();
        for handle in handles {
            assert!(matches!(handle.join(), Ok(Some(n)) if n > 0));
        }
    }
}
