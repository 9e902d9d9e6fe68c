//! `SQLite`-backed content store for the website.

mod content;
mod error;
mod filters;
mod requests;
mod schema;
mod types;

pub use content::{default_database_path, ContentStore};
pub use error::StoreError;
pub use filters::{JourneyFilter, PublishedFilter, QuoteFilter, TeamFilter};
pub use schema::{SCHEMA, SCHEMA_VERSION};
pub use types::{
    DayTrip, DayTripAddon, FooterLegal, FooterLink, GentleJourney, Guide, Journey, NewOvernightBooking,
    NewProposal, NewQuote, NewStory, OvernightBooking, Proposal, Quote, QuoteUpdate, Setting,
    TeamMember, Testimonial, TrainingRow,
};
