//! Admin endpoints for quotes and proposals.

use axum::extract::{Path, State};
use axum::Json;

use super::timestamp_id;
use crate::server::api::{
    ProposalCreated, ProposalsResponse, QuoteCreated, QuoteResponse, QuotesResponse,
    SuccessResponse,
};
use crate::server::error::{ApiError, OrInternal};
use crate::server::payload::{ProposalRequest, QuoteRequest, StatusRequest};
use crate::server::state::AppState;
use crate::store::{QuoteFilter, QuoteUpdate};

/// GET /api/admin/quotes - All quote requests, newest first.
pub async fn get_admin_quotes(
    State(state): State<AppState>,
) -> Result<Json<QuotesResponse>, ApiError> {
    let quotes = state
        .store
        .list_quotes(QuoteFilter::default())
        .await
        .or_internal("Failed to fetch quotes")?;

    Ok(Json(QuotesResponse {
        quotes: quotes.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/admin/quotes - Enter a quote on a client's behalf.
pub async fn post_admin_quote(
    State(state): State<AppState>,
    Json(mut request): Json<QuoteRequest>,
) -> Result<Json<QuoteCreated>, ApiError> {
    let quote_id = timestamp_id("QT");
    let status = request
        .status
        .take()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "new".to_string());

    state
        .store
        .create_quote(request.into_new_quote(quote_id.clone(), status))
        .await
        .or_internal("Failed to create quote")?;

    Ok(Json(QuoteCreated {
        success: true,
        quote_id,
        message: None,
    }))
}

/// GET /api/admin/quotes/:id
pub async fn get_admin_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let quote = state
        .store
        .quote_by_id(&id)
        .await
        .or_internal("Failed to fetch quote")?
        .ok_or_else(|| ApiError::not_found("Quote not found"))?;

    Ok(Json(QuoteResponse {
        quote: quote.into(),
    }))
}

/// PUT /api/admin/quotes/:id - Change only the fields present in the body.
pub async fn put_admin_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    update(&state, &id, request.into_update(), "Failed to update quote").await
}

/// PATCH /api/admin/quotes/:id - Move a quote to a new status.
pub async fn patch_admin_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let status = request
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;

    update(
        &state,
        &id,
        QuoteUpdate::status(status),
        "Failed to update quote status",
    )
    .await
}

async fn update(
    state: &AppState,
    id: &str,
    update: QuoteUpdate,
    failure: &str,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .store
        .update_quote(id, update)
        .await
        .or_internal(failure)?
        .ok_or_else(|| ApiError::not_found("Quote not found"))?;

    tracing::info!(quote_id = %id, "Quote updated");
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/admin/proposals - Proposal summaries, newest first.
pub async fn get_admin_proposals(
    State(state): State<AppState>,
) -> Result<Json<ProposalsResponse>, ApiError> {
    let proposals = state
        .store
        .list_proposals()
        .await
        .or_internal("Failed to fetch proposals")?;

    Ok(Json(ProposalsResponse {
        proposals: proposals.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/admin/proposals
pub async fn post_admin_proposal(
    State(state): State<AppState>,
    Json(request): Json<ProposalRequest>,
) -> Result<Json<ProposalCreated>, ApiError> {
    let proposal_id = timestamp_id("PRP");
    state
        .store
        .create_proposal(request.into_new_proposal(proposal_id.clone()))
        .await
        .or_internal("Failed to create proposal")?;

    tracing::info!(proposal_id = %proposal_id, "Proposal created");
    Ok(Json(ProposalCreated {
        success: true,
        proposal_id,
    }))
}
