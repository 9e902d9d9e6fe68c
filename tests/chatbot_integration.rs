//! Integration tests for the chatbot against a real content store.

use tripdesk::chatbot::{answer, respond, ChatbotError, TrainingEntry, TrainingSource, DEFAULT_RESPONSE};
use tripdesk::store::ContentStore;

const SEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/seed.sql");

async fn seeded_store() -> ContentStore {
    let store = ContentStore::open_in_memory()
        .await
        .expect("Failed to open store");
    store
        .run_script_file(SEED)
        .await
        .expect("Failed to apply seed script");
    store
}

#[tokio::test]
async fn test_training_table_loads_in_order() {
    let store = seeded_store().await;

    let entries = store
        .load_training_table()
        .await
        .expect("Failed to load training");

    let categories: Vec<_> = entries.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(categories, vec!["pricing", "policy", "desert", "fallback"]);
    assert_eq!(
        entries[0].keywords,
        vec!["price", "cost", "how much", "budget"]
    );
    assert_eq!(entries[2].keywords, vec!["sahara", "desert", "dunes", "camel"]);
}

#[tokio::test]
async fn test_longest_keyword_beats_shorter_one() {
    let store = seeded_store().await;

    // "cancellation policy" (19 chars) outranks "cancel" and "cancellation".
    let reply = answer(&store, Some("What's your Cancellation Policy for groups?"))
        .await
        .expect("Failed to answer");
    assert!(reply.starts_with("Cancel up to 60 days"));
}

#[tokio::test]
async fn test_substring_match_inside_words() {
    let store = seeded_store().await;

    let reply = answer(&store, Some("are camels comfortable?"))
        .await
        .expect("Failed to answer");
    assert!(reply.starts_with("Yes. Most desert journeys"));
}

#[tokio::test]
async fn test_unmatched_message_uses_fallback() {
    let store = seeded_store().await;

    let reply = answer(&store, Some("Is the mint tea sweet?"))
        .await
        .expect("Failed to answer");
    assert!(reply.starts_with("We would love to help."));
}

#[tokio::test]
async fn test_edits_are_visible_on_next_message() {
    let store = seeded_store().await;

    let before = answer(&store, Some("is there a surf camp?"))
        .await
        .expect("Failed to answer");
    assert!(before.starts_with("We would love to help."));

    store
        .run_script(
            "INSERT INTO chatbot_training (category, answer, keywords, sort_order)
             VALUES ('coast', 'Taghazout has good surf camps.', 'surf', 5)",
        )
        .await
        .expect("Failed to add training row");

    let after = answer(&store, Some("is there a surf camp?"))
        .await
        .expect("Failed to answer");
    assert_eq!(after, "Taghazout has good surf camps.");
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let store = seeded_store().await;

    let error = answer(&store, Some("")).await.unwrap_err();
    assert!(matches!(error, ChatbotError::InvalidInput(_)));
}

#[tokio::test]
async fn test_empty_store_gives_default_response() {
    let store = ContentStore::open_in_memory()
        .await
        .expect("Failed to open store");

    let reply = answer(&store, Some("hello")).await.expect("Failed to answer");
    assert_eq!(reply, DEFAULT_RESPONSE);
}

#[test]
fn test_respond_is_idempotent() {
    let entries = vec![
        TrainingEntry::new("riads", "Our riads have between 4 and 12 rooms.").with_keywords("riad"),
        TrainingEntry::new("fallback", "Ask away."),
    ];

    let first = respond("Tell me about the RIAD", &entries);
    let second = respond("Tell me about the RIAD", &entries);
    assert_eq!(first, second);
    assert_eq!(first, "Our riads have between 4 and 12 rooms.");
}
