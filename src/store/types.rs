//! Row types for the content store.
//!
//! Field names follow the database columns. Reshaping into the camelCase
//! API shape happens in the server layer.

use serde::{Deserialize, Serialize};

/// A multi-day journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub hero_image_url: Option<String>,
    pub short_description: Option<String>,
    pub arc_description: Option<String>,
    pub duration_days: Option<i64>,
    pub price_eur: Option<f64>,
    pub epic_price_eur: Option<f64>,
    pub start_city: Option<String>,
    pub focus_type: Option<String>,
    pub route_sequence: Option<String>,
    pub category: Option<String>,
    pub destinations: Option<String>,
    pub journey_type: Option<String>,
    pub marketing_priority: Option<String>,
    pub region: Option<String>,
    pub tags: Option<String>,
    pub tagline: Option<String>,
    pub published: bool,
    pub show_on_journeys_page: bool,
    pub featured_on_homepage: bool,
}

/// A single-day excursion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTrip {
    pub slug: String,
    pub route_id: Option<String>,
    pub title: String,
    pub short_description: Option<String>,
    pub duration_hours: Option<f64>,
    pub final_price_mad: Option<f64>,
    pub final_price_eur: Option<f64>,
    pub departure_city: Option<String>,
    pub category: Option<String>,
    pub hero_image_url: Option<String>,
    pub includes: Option<String>,
    pub excludes: Option<String>,
    pub meeting_point: Option<String>,
    pub published: bool,
}

/// Optional per-person extra for day trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTripAddon {
    pub addon_id: String,
    pub addon_name: String,
    pub description: Option<String>,
    pub final_price_mad_pp: Option<f64>,
    pub final_price_eur_pp: Option<f64>,
    /// Pipe-separated list of day trip slugs.
    pub applies_to: Option<String>,
    pub published: bool,
}

impl DayTripAddon {
    /// Whether this add-on is offered for the given trip.
    #[must_use]
    pub fn applies_to_trip(&self, trip_slug: &str) -> bool {
        self.applies_to
            .as_deref()
            .is_some_and(|list| list.split('|').any(|slug| slug == trip_slug))
    }
}

/// A key/value row from `website_settings` or `gentle_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: i64,
    pub column_number: i64,
    pub column_title: String,
    pub link_order: i64,
    pub link_label: String,
    pub link_href: String,
    pub link_type: String,
}

/// Legal links and copyright line for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLegal {
    pub site_id: String,
    /// JSON array of `{label, href}` objects.
    pub legal_links: Option<String>,
    /// May contain a `{year}` placeholder.
    pub copyright_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: String,
    pub name: String,
    pub role: String,
    pub quote: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub sort_order: i64,
    pub show_on_gentle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub guide_id: String,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub published: bool,
    pub sort_order: i64,
}

/// A journey from the accessible-travel collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GentleJourney {
    pub journey_id: String,
    pub title: String,
    pub slug: String,
    pub hero_image_url: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i64>,
    pub price_eur: Option<f64>,
    pub published: bool,
    pub route_cities: Option<String>,
    /// Pipe-separated.
    pub highlights: Option<String>,
    /// Pipe-separated.
    pub accessibility_notes: Option<String>,
    pub sort_order: i64,
}

/// A raw `chatbot_training` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub id: i64,
    pub category: String,
    pub question: Option<String>,
    pub answer: Option<String>,
    /// Comma or pipe delimited keyword list.
    pub keywords: Option<String>,
    pub sort_order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub testimonial_id: String,
    pub quote: Option<String>,
    pub author: Option<String>,
    pub journey_title: Option<String>,
    pub published: bool,
    pub sort_order: i64,
}

/// A "plan your trip" quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub travel_dates: Option<String>,
    pub flexibility: Option<String>,
    pub group_size: Option<i64>,
    pub interests: Option<String>,
    pub accommodation_style: Option<String>,
    pub pace: Option<String>,
    pub budget: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Fields for inserting a quote. `created_at` is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub quote_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub travel_dates: Option<String>,
    pub flexibility: Option<String>,
    pub group_size: Option<i64>,
    pub interests: Option<String>,
    pub accommodation_style: Option<String>,
    pub pace: Option<String>,
    pub budget: Option<String>,
    pub notes: Option<String>,
    pub status: String,
}

/// Partial update of a quote. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub travel_dates: Option<String>,
    pub flexibility: Option<String>,
    pub group_size: Option<i64>,
    pub interests: Option<String>,
    pub accommodation_style: Option<String>,
    pub pace: Option<String>,
    pub budget: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl QuoteUpdate {
    /// Update that only changes the status.
    #[must_use]
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A tailored itinerary proposal sent to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub country: Option<String>,
    pub hero_image_url: Option<String>,
    pub hero_title: Option<String>,
    pub hero_blurb: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days: Option<i64>,
    pub nights: Option<i64>,
    pub num_guests: Option<i64>,
    pub total_price: Option<f64>,
    pub formatted_price: Option<String>,
    pub route_points: Option<serde_json::Value>,
    pub days_list: Option<serde_json::Value>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProposal {
    pub proposal_id: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub country: Option<String>,
    pub hero_image_url: Option<String>,
    pub hero_title: Option<String>,
    pub hero_blurb: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days: Option<i64>,
    pub nights: Option<i64>,
    pub num_guests: Option<i64>,
    pub total_price: Option<f64>,
    pub formatted_price: Option<String>,
    pub route_points: serde_json::Value,
    pub days_list: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvernightBooking {
    pub id: i64,
    pub booking_id: String,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub property: Option<String>,
    pub room_type: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<i64>,
    pub total_price: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOvernightBooking {
    pub booking_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub property: String,
    pub room_type: Option<String>,
    pub check_in: String,
    pub check_out: String,
    pub guests: i64,
    pub total_price: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub status: String,
}

/// Fields for inserting a story. The id and timestamps are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub source_type: Option<String>,
    pub hero_image: Option<String>,
    pub mj_prompt: Option<String>,
    pub hero_caption: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub read_time: Option<i64>,
    pub year: Option<i64>,
    pub text_by: Option<String>,
    pub images_by: Option<String>,
    pub sources: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub sort_order: Option<i64>,
    pub the_facts: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub theme: Option<String>,
    pub era: Option<String>,
    pub era_start: Option<i64>,
    pub era_end: Option<i64>,
    pub related_place_slugs: Option<String>,
    pub related_story_slugs: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}
