//! Keyword matcher for the website chatbot.
//!
//! Picks the canned answer whose keyword is the longest substring of the
//! visitor's message. Matching is plain substring containment, so `"tour"`
//! also matches `"tourist"`.

use serde::{Deserialize, Serialize};

use crate::store::TrainingRow;

/// Category marking the answer used when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "fallback";

/// Answer returned when neither a keyword nor a fallback entry applies.
pub const DEFAULT_RESPONSE: &str =
    "I'm not sure how to help with that. Please email us at hello@slowmorocco.com";

/// One row of the training table, with its keywords already split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingEntry {
    pub category: String,
    /// Display only, never matched against.
    pub question: String,
    pub answer: String,
    /// Lower-cased, trimmed, non-empty.
    pub keywords: Vec<String>,
    pub order: i64,
}

impl TrainingEntry {
    /// Create an entry with the given category and answer.
    #[must_use]
    pub fn new(category: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            answer: answer.into(),
            ..Self::default()
        }
    }

    /// Set keywords from a raw delimited string (builder pattern).
    #[must_use]
    pub fn with_keywords(mut self, raw: &str) -> Self {
        self.keywords = parse_keywords(raw);
        self
    }

    /// Whether this is the designated fallback entry.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.category == FALLBACK_CATEGORY
    }
}

impl From<TrainingRow> for TrainingEntry {
    fn from(row: TrainingRow) -> Self {
        Self {
            keywords: row.keywords.as_deref().map(parse_keywords).unwrap_or_default(),
            category: row.category,
            question: row.question.unwrap_or_default(),
            answer: row.answer.unwrap_or_default(),
            order: row.sort_order,
        }
    }
}

/// Split a comma or pipe delimited keyword string.
#[must_use]
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split([',', '|'])
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// The winning keyword for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    pub entry: &'a TrainingEntry,
    pub keyword: &'a str,
    /// Keyword length in characters.
    pub score: usize,
}

/// Find the longest keyword contained in `message`.
///
/// Entries and keywords are scanned in table order; a later keyword only
/// wins with a strictly higher score.
#[must_use]
pub fn find_best_match<'a>(message: &str, entries: &'a [TrainingEntry]) -> Option<KeywordMatch<'a>> {
    let normalized = message.trim().to_lowercase();
    let mut best: Option<KeywordMatch<'a>> = None;

    for entry in entries {
        for keyword in &entry.keywords {
            // Keywords from the store are normalized already; hand-built ones may not be.
            let needle = keyword.to_lowercase();
            if needle.is_empty() || !normalized.contains(&needle) {
                continue;
            }
            let score = needle.chars().count();
            if best.map_or(true, |b| score > b.score) {
                best = Some(KeywordMatch {
                    entry,
                    keyword,
                    score,
                });
            }
        }
    }

    best
}

/// Pick the answer for `message`.
///
/// Falls back to the first `fallback` entry, then to [`DEFAULT_RESPONSE`].
/// Never returns an empty string.
#[must_use]
pub fn respond<'a>(message: &str, entries: &'a [TrainingEntry]) -> &'a str {
    let winner = find_best_match(message, entries)
        .map(|m| m.entry)
        .or_else(|| entries.iter().find(|e| e.is_fallback()));

    match winner {
        Some(entry) if !entry.answer.is_empty() => &entry.answer,
        _ => DEFAULT_RESPONSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<TrainingEntry> {
        vec![
            TrainingEntry::new("policies", "A").with_keywords("policy"),
            TrainingEntry::new("policies", "B").with_keywords("cancellation policy"),
            TrainingEntry::new("money", "Refunds take 5 days.").with_keywords("refund, money back"),
            TrainingEntry::new(FALLBACK_CATEGORY, "Ask us anything."),
        ]
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_keywords(" Desert , CAMEL|| sahara ,"),
            vec!["desert", "camel", "sahara"]
        );
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , | ").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(respond("I need a REFUND", &table()), "Refunds take 5 days.");
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(respond("what is your cancellation policy?", &table()), "B");
    }

    #[test]
    fn test_first_entry_wins_ties() {
        let entries = vec![
            TrainingEntry::new("a", "first").with_keywords("camel"),
            TrainingEntry::new("b", "second").with_keywords("riads"),
        ];
        assert_eq!(respond("camel or riads?", &entries), "first");
        assert_eq!(respond("riads or camel?", &entries), "first");
    }

    #[test]
    fn test_first_keyword_wins_ties_within_entry() {
        let entries = vec![TrainingEntry::new("a", "x").with_keywords("hotel, riads")];
        let m = find_best_match("riads and hotel", &entries).unwrap();
        assert_eq!(m.keyword, "hotel");
        assert_eq!(m.score, 5);
    }

    #[test]
    fn test_fallback_when_no_match() {
        assert_eq!(respond("asdkjasd", &table()), "Ask us anything.");
    }

    #[test]
    fn test_first_fallback_used() {
        let entries = vec![
            TrainingEntry::new(FALLBACK_CATEGORY, "one"),
            TrainingEntry::new(FALLBACK_CATEGORY, "two"),
        ];
        assert_eq!(respond("hello", &entries), "one");
    }

    #[test]
    fn test_default_without_fallback() {
        assert_eq!(respond("hello", &[]), DEFAULT_RESPONSE);
        assert!(DEFAULT_RESPONSE.contains("hello@slowmorocco.com"));
    }

    #[test]
    fn test_empty_answer_yields_default() {
        let entries = vec![TrainingEntry::new("a", "").with_keywords("camel")];
        assert_eq!(respond("camel", &entries), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_substring_matching() {
        let entries = vec![TrainingEntry::new("tours", "We run tours.").with_keywords("tour")];
        assert_eq!(respond("I am a tourist", &entries), "We run tours.");
    }

    #[test]
    fn test_message_is_trimmed() {
        let entries = vec![TrainingEntry::new("a", "yes").with_keywords("ab")];
        assert!(find_best_match("   ", &entries).is_none());
        assert_eq!(respond("  AB  ", &entries), "yes");
    }

    #[test]
    fn test_score_counts_characters() {
        let entries = vec![
            TrainingEntry::new("a", "ascii").with_keywords("abcd"),
            TrainingEntry::new("b", "accented").with_keywords("été"),
        ];
        let m = find_best_match("abcd été", &entries).unwrap();
        assert_eq!(m.entry.answer, "ascii");
        assert_eq!(find_best_match("été", &entries).unwrap().score, 3);
    }

    #[test]
    fn test_idempotent() {
        let entries = table();
        let first = respond("cancellation policy", &entries).to_string();
        let second = respond("cancellation policy", &entries).to_string();
        assert_eq!(first, second);
        assert_eq!(entries, table());
    }

    #[test]
    fn test_from_training_row() {
        let row = TrainingRow {
            id: 7,
            category: "booking".to_string(),
            question: None,
            answer: Some("Write to us.".to_string()),
            keywords: Some("Book, Reserve".to_string()),
            sort_order: 3,
        };
        let entry = TrainingEntry::from(row);
        assert_eq!(entry.keywords, vec!["book", "reserve"]);
        assert_eq!(entry.question, "");
        assert_eq!(entry.order, 3);
        assert!(!entry.is_fallback());
    }
}
