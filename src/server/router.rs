//! HTTP server with axum router and graceful shutdown.

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ServerError;
use super::handlers::{
    get_admin_proposals, get_admin_quote, get_admin_quotes, get_chatbot_training, get_day_trips,
    get_footer, get_gentle_journeys, get_guides, get_journey, get_journeys, get_plan_your_trip,
    get_proposal, get_related_journeys, get_testimonials, patch_admin_quote, post_admin_proposal,
    post_admin_quote, post_chatbot, post_overnight_booking, post_plan_your_trip, post_stories,
    put_admin_quote,
};
use super::state::AppState;
use crate::config::ServerConfig;

/// HTTP server for the site API.
pub struct ApiServer {
    /// Server configuration.
    config: ServerConfig,
    /// Application state shared across handlers.
    state: AppState,
}

impl ApiServer {
    /// Create a new server with default configuration.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            config: ServerConfig::default(),
            state,
        }
    }

    /// Set the server configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configured address as a string.
    #[must_use]
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone(), self.config.cors_permissive)
    }

    /// Run the server until `cancel` is triggered, then shut down gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or serve.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), ServerError> {
        let addr = self.address();
        let app = self.build_router();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::BindError {
                address: addr.clone(),
                source,
            })?;

        tracing::info!(address = %addr, "Starting API server");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("API server shutting down gracefully");
            })
            .await
            .map_err(ServerError::ServeError)
    }
}

/// Every route of the site API.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/api/chatbot", get(get_chatbot_training).post(post_chatbot))
        .route("/api/journeys", get(get_journeys))
        .route("/api/journeys/:slug", get(get_journey))
        .route("/api/related-journeys", get(get_related_journeys))
        .route("/api/day-trips", get(get_day_trips))
        .route("/api/guides", get(get_guides))
        .route("/api/testimonials", get(get_testimonials))
        .route("/api/gentle-journeys", get(get_gentle_journeys))
        .route("/api/footer", get(get_footer))
        .route(
            "/api/plan-your-trip",
            get(get_plan_your_trip).post(post_plan_your_trip),
        )
        .route("/api/overnight-booking", post(post_overnight_booking))
        .route("/api/proposals", get(get_proposal))
        .route("/api/stories/add", post(post_stories))
        .route("/api/admin/quotes", get(get_admin_quotes).post(post_admin_quote))
        .route(
            "/api/admin/quotes/:id",
            get(get_admin_quote)
                .put(put_admin_quote)
                .patch(patch_admin_quote),
        )
        .route(
            "/api/admin/proposals",
            get(get_admin_proposals).post(post_admin_proposal),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
