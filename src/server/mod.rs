//! HTTP API for the website: content, forms, admin and the chatbot.

pub mod api;
mod error;
pub mod handlers;
pub mod payload;
mod router;
mod state;

pub use error::{ApiError, ErrorBody, OrInternal, ServerError};
pub use router::{build_router, ApiServer};
pub use state::AppState;
