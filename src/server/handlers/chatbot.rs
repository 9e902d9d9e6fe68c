//! Chatbot endpoints.

use axum::extract::State;
use axum::Json;

use crate::chatbot::{self, ChatbotError, TrainingSource};
use crate::server::api::{ChatResponse, TrainingResponse};
use crate::server::error::{ApiError, OrInternal};
use crate::server::payload::ChatRequest;
use crate::server::state::AppState;

/// GET /api/chatbot - The training table as the widget sees it.
pub async fn get_chatbot_training(
    State(state): State<AppState>,
) -> Result<Json<TrainingResponse>, ApiError> {
    let training = state
        .store
        .load_training_table()
        .await
        .or_internal("Failed to fetch chatbot training")?;

    Ok(Json(TrainingResponse { training }))
}

/// POST /api/chatbot - Answer a visitor's message.
pub async fn post_chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.as_ref().and_then(|m| m.as_str());

    match chatbot::answer(&state.store, message).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(ChatbotError::InvalidInput(msg)) => Err(ApiError::bad_request(msg)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to process message");
            Err(ApiError::internal("Failed to process message"))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::store::ContentStore;

    const TRAINING: &str = "
        INSERT INTO chatbot_training (category, question, answer, keywords, sort_order) VALUES
            ('booking', 'How do I book?', 'Send us the planner form.', 'book, booking, reserve', 2),
            ('policy', 'Cancellation?', 'Full refund up to 30 days out.', 'policy|cancellation policy', 1),
            ('fallback', '', 'Write to hello@example.com.', NULL, 9);
    ";

    async fn state() -> AppState {
        let store = ContentStore::open_in_memory().await.unwrap();
        store.run_script(TRAINING).await.unwrap();
        AppState::new(store)
    }

    fn chat(message: serde_json::Value) -> Json<ChatRequest> {
        Json(serde_json::from_value(message).unwrap())
    }

    #[tokio::test]
    async fn test_get_training_in_sort_order() {
        let Json(response) = get_chatbot_training(State(state().await)).await.unwrap();

        let categories: Vec<&str> = response.training.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["policy", "booking", "fallback"]);
        assert_eq!(
            response.training[0].keywords,
            vec!["policy", "cancellation policy"]
        );
        assert!(response.training[2].keywords.is_empty());
    }

    #[tokio::test]
    async fn test_post_longest_keyword_wins() {
        let Json(response) = post_chatbot(
            State(state().await),
            chat(json!({"message": "What is your CANCELLATION POLICY?"})),
        )
        .await
        .unwrap();

        assert_eq!(response.response, "Full refund up to 30 days out.");
    }

    #[tokio::test]
    async fn test_post_falls_back() {
        let Json(response) = post_chatbot(
            State(state().await),
            chat(json!({"message": "Do you like mint tea?"})),
        )
        .await
        .unwrap();

        assert_eq!(response.response, "Write to hello@example.com.");
    }

    #[tokio::test]
    async fn test_post_rejects_missing_or_non_string_message() {
        for body in [json!({}), json!({"message": ""}), json!({"message": 42})] {
            let error = post_chatbot(State(state().await), chat(body))
                .await
                .unwrap_err();
            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error.message(), "Message is required");
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let state = state().await;
        state.store.run_script("DROP TABLE chatbot_training").await.unwrap();

        let error = post_chatbot(State(state.clone()), chat(json!({"message": "hi"})))
            .await
            .unwrap_err();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Failed to process message");

        let error = get_chatbot_training(State(state)).await.unwrap_err();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Failed to fetch chatbot training");
    }
}
