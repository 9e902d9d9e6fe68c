//! Loading the training table and answering a message.

use async_trait::async_trait;

use super::error::ChatbotError;
use super::matcher::{find_best_match, respond, TrainingEntry};
use crate::store::{ContentStore, StoreError};

/// Where the training table comes from.
#[async_trait]
pub trait TrainingSource: Send + Sync {
    /// Load every training entry in persisted order.
    async fn load_training_table(&self) -> Result<Vec<TrainingEntry>, StoreError>;
}

#[async_trait]
impl TrainingSource for ContentStore {
    async fn load_training_table(&self) -> Result<Vec<TrainingEntry>, StoreError> {
        let rows = self.list_training().await?;
        Ok(rows.into_iter().map(TrainingEntry::from).collect())
    }
}

/// Validate `message`, load a fresh training table and pick the answer.
///
/// # Errors
///
/// Returns `InvalidInput` for a missing or empty message (the table is not
/// loaded in that case) and `StoreUnavailable` if loading fails.
pub async fn answer<S>(source: &S, message: Option<&str>) -> Result<String, ChatbotError>
where
    S: TrainingSource + ?Sized,
{
    let message = message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ChatbotError::InvalidInput("Message is required".to_string()))?;

    let entries = source
        .load_training_table()
        .await
        .map_err(ChatbotError::StoreUnavailable)?;

    match find_best_match(message, &entries) {
        Some(m) => tracing::debug!(
            keyword = m.keyword,
            score = m.score,
            category = %m.entry.category,
            "Chatbot keyword matched"
        ),
        None => tracing::debug!(entries = entries.len(), "No chatbot keyword matched"),
    }

    Ok(respond(message, &entries).to_string())
}
