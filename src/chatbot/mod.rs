//! Keyword-matching chatbot responder.

mod error;
mod matcher;
mod source;

pub use error::ChatbotError;
pub use matcher::{
    find_best_match, parse_keywords, respond, KeywordMatch, TrainingEntry, DEFAULT_RESPONSE,
    FALLBACK_CATEGORY,
};
pub use source::{answer, TrainingSource};
