//! Public form endpoints: trip planner, overnight bookings, proposals, stories.

use axum::extract::{Query, State};
use axum::Json;

use super::timestamp_id;
use crate::server::api::{
    BookingCreated, EmailExistsResponse, ProposalResponse, QuoteCreated, StoriesAdded,
};
use crate::server::error::{ApiError, OrInternal};
use crate::server::payload::{
    EmailQuery, IdQuery, OvernightBookingRequest, QuoteRequest, StoriesRequest, StoryInput,
};
use crate::server::state::AppState;

const QUOTE_RECEIVED: &str = "Thank you! We'll be in touch within 24 hours.";
const BOOKING_RECEIVED: &str = "Booking request received. We'll confirm within 24 hours.";

/// GET /api/plan-your-trip?email= - Whether this address already asked for a quote.
pub async fn get_plan_your_trip(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Json<EmailExistsResponse> {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return Json(EmailExistsResponse { exists: false });
    };

    let exists = state
        .store
        .quote_email_exists(&email)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to check quote email");
            false
        });
    Json(EmailExistsResponse { exists })
}

/// POST /api/plan-your-trip - Submit the trip planner form.
pub async fn post_plan_your_trip(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteCreated>, ApiError> {
    let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
    if !has(&request.name) || !has(&request.email) {
        return Err(ApiError::bad_request("Name and email are required"));
    }

    let quote_id = timestamp_id("QT");
    let quote = request.into_new_quote(quote_id.clone(), "new".to_string());
    state
        .store
        .create_quote(quote)
        .await
        .or_internal("Failed to submit quote request")?;

    tracing::info!(quote_id = %quote_id, "Quote request received");
    Ok(Json(QuoteCreated {
        success: true,
        quote_id,
        message: Some(QUOTE_RECEIVED.to_string()),
    }))
}

/// POST /api/overnight-booking - Request a riad or camp stay.
pub async fn post_overnight_booking(
    State(state): State<AppState>,
    Json(request): Json<OvernightBookingRequest>,
) -> Result<Json<BookingCreated>, ApiError> {
    let booking_id = timestamp_id("OVN");
    let booking = request
        .into_new_booking(booking_id.clone())
        .ok_or_else(|| ApiError::bad_request("Missing required fields"))?;

    state
        .store
        .create_overnight_booking(booking)
        .await
        .or_internal("Failed to create booking")?;

    tracing::info!(booking_id = %booking_id, "Overnight booking received");
    Ok(Json(BookingCreated {
        success: true,
        booking_id,
        message: BOOKING_RECEIVED.to_string(),
    }))
}

/// GET /api/proposals?id= - A proposal as presented to the client.
pub async fn get_proposal(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<ProposalResponse>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Proposal ID is required"))?;

    let proposal = state
        .store
        .proposal_by_id(&id)
        .await
        .or_internal("Failed to fetch proposal")?
        .ok_or_else(|| ApiError::not_found("Proposal not found"))?;

    Ok(Json(ProposalResponse {
        proposal: proposal.into(),
    }))
}

/// POST /api/stories/add - Bulk import stories, skipping slugs that already exist.
pub async fn post_stories(
    State(state): State<AppState>,
    Json(request): Json<StoriesRequest>,
) -> Result<Json<StoriesAdded>, ApiError> {
    let Some(serde_json::Value::Array(stories)) = request.stories else {
        return Err(ApiError::bad_request("Stories array is required"));
    };

    let mut results = StoriesAdded {
        success: true,
        ..StoriesAdded::default()
    };

    for value in stories {
        let story = match serde_json::from_value::<StoryInput>(value) {
            Ok(story) => story,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed story");
                results.errors.push(format!("Invalid story: {e}"));
                continue;
            }
        };
        let Some(slug) = story.slug().map(String::from) else {
            results.errors.push("Story missing slug".to_string());
            continue;
        };

        if state
            .store
            .story_exists(&slug)
            .await
            .or_internal("Failed to add stories")?
        {
            results.skipped.push(slug);
            continue;
        }

        match state.store.create_story(story.into_new_story(slug.clone())).await {
            Ok(_) => results.added.push(slug),
            Err(e) => {
                tracing::error!(error = %e, slug = %slug, "Failed to add story");
                results.errors.push(slug);
            }
        }
    }

    tracing::info!(
        added = results.added.len(),
        skipped = results.skipped.len(),
        errors = results.errors.len(),
        "Story import finished"
    );
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::store::{ContentStore, NewProposal, QuoteFilter};

    async fn state() -> AppState {
        AppState::new(ContentStore::open_in_memory().await.unwrap())
    }

    fn body<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Json<T> {
        Json(serde_json::from_value(value).unwrap())
    }

    #[tokio::test]
    async fn test_plan_your_trip_creates_quote() {
        let state = state().await;

        let Json(created) = post_plan_your_trip(
            State(state.clone()),
            body(json!({
                "name": "Amina",
                "email": "Amina@Example.com",
                "groupSize": "4",
                "interests": ["Food", "Desert"],
            })),
        )
        .await
        .unwrap();

        assert!(created.success);
        assert!(created.quote_id.starts_with("QT-"));
        assert_eq!(created.message.as_deref(), Some(QUOTE_RECEIVED));

        let quote = state.store.quote_by_id(&created.quote_id).await.unwrap().unwrap();
        assert_eq!(quote.status, "new");
        assert_eq!(quote.group_size, Some(4));
        assert_eq!(quote.interests.as_deref(), Some("Food, Desert"));

        let Json(found) = get_plan_your_trip(
            State(state),
            Query(EmailQuery {
                email: Some("amina@example.com".to_string()),
            }),
        )
        .await;
        assert!(found.exists);
    }

    #[tokio::test]
    async fn test_plan_your_trip_requires_name_and_email() {
        let state = state().await;
        let error = post_plan_your_trip(State(state.clone()), body(json!({"name": "Amina"})))
            .await
            .unwrap_err();

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Name and email are required");
        assert!(state
            .store
            .list_quotes(QuoteFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_email_check_without_email() {
        let Json(found) = get_plan_your_trip(State(state().await), Query(EmailQuery::default())).await;
        assert!(!found.exists);
    }

    #[tokio::test]
    async fn test_overnight_booking() {
        let Json(created) = post_overnight_booking(
            State(state().await),
            body(json!({
                "guestName": "Leo",
                "guestEmail": "leo@example.com",
                "property": "Desert Camp",
                "checkIn": "2026-04-10",
                "checkOut": "2026-04-12",
                "guests": 2,
            })),
        )
        .await
        .unwrap();

        assert!(created.success);
        assert!(created.booking_id.starts_with("OVN-"));
        assert_eq!(created.message, BOOKING_RECEIVED);
    }

    #[tokio::test]
    async fn test_overnight_booking_missing_fields() {
        let error = post_overnight_booking(
            State(state().await),
            body(json!({"guestName": "Leo", "property": "Desert Camp"})),
        )
        .await
        .unwrap_err();

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Missing required fields");
    }

    #[tokio::test]
    async fn test_get_proposal() {
        let state = state().await;
        state
            .store
            .create_proposal(NewProposal {
                proposal_id: "PRP-7".to_string(),
                client_name: Some("Nadia".to_string()),
                route_points: json!([{"city": "Fes"}]),
                ..NewProposal::default()
            })
            .await
            .unwrap();

        let Json(found) = get_proposal(
            State(state.clone()),
            Query(IdQuery {
                id: Some("PRP-7".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(found.proposal.client_name.as_deref(), Some("Nadia"));
        assert_eq!(found.proposal.route_points, json!([{"city": "Fes"}]));

        let missing = get_proposal(State(state.clone()), Query(IdQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.message(), "Proposal ID is required");

        let unknown = get_proposal(
            State(state),
            Query(IdQuery {
                id: Some("PRP-0".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown.message(), "Proposal not found");
    }

    #[tokio::test]
    async fn test_post_stories() {
        let state = state().await;

        let Json(first) = post_stories(
            State(state.clone()),
            body(json!({"stories": [
                {"slug": "blue-city", "title": "The Blue City"},
                {"title": "No slug"},
                {"slug": "henna", "title": "Henna", "published": false},
            ]})),
        )
        .await
        .unwrap();
        assert!(first.success);
        assert_eq!(first.added, vec!["blue-city", "henna"]);
        assert_eq!(first.errors, vec!["Story missing slug"]);
        assert!(first.skipped.is_empty());

        let Json(second) = post_stories(
            State(state),
            body(json!({"stories": [{"slug": "henna"}]})),
        )
        .await
        .unwrap();
        assert_eq!(second.skipped, vec!["henna"]);
        assert!(second.added.is_empty());
    }

    #[tokio::test]
    async fn test_post_stories_requires_array() {
        for request in [json!({}), json!({"stories": "blue-city"})] {
            let error = post_stories(State(state().await), body(request))
                .await
                .unwrap_err();
            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error.message(), "Stories array is required");
        }
    }

    #[tokio::test]
    async fn test_quote_store_failure() {
        let state = state().await;
        state.store.run_script("DROP TABLE quotes").await.unwrap();

        let Json(found) = get_plan_your_trip(
            State(state.clone()),
            Query(EmailQuery {
                email: Some("amina@example.com".to_string()),
            }),
        )
        .await;
        assert!(!found.exists);

        let error = post_plan_your_trip(
            State(state),
            body(json!({"name": "Amina", "email": "amina@example.com"})),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Failed to submit quote request");
    }
}
