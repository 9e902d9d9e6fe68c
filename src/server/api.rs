//! API response types. Database rows are reshaped into camelCase here.

use serde::{Deserialize, Serialize};

use crate::chatbot::TrainingEntry;
use crate::store::{
    DayTrip, DayTripAddon, GentleJourney, Guide, Journey, Proposal, Quote, TeamMember, Testimonial,
};

/// Split a pipe-separated column, dropping empty items.
#[must_use]
pub fn split_pipe(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split('|')
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Response for `GET /api/chatbot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResponse {
    pub training: Vec<TrainingEntry>,
}

/// Response for `POST /api/chatbot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// A journey in API shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyItem {
    pub slug: String,
    pub title: String,
    pub hero_image: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i64>,
    pub price: Option<f64>,
    pub epic_price: Option<f64>,
    pub start_city: Option<String>,
    pub focus: Option<String>,
    pub category: Option<String>,
    pub destinations: Option<String>,
    pub route_sequence: Option<String>,
    pub journey_type: Option<String>,
    pub marketing_priority: Option<String>,
    pub published: bool,
    pub show_on_journeys_page: bool,
    pub featured_on_homepage: bool,
    /// Always the negation of `show_on_journeys_page`.
    pub hidden: bool,
}

impl From<Journey> for JourneyItem {
    fn from(j: Journey) -> Self {
        Self {
            slug: j.slug,
            title: j.title,
            hero_image: j.hero_image_url,
            short_description: j.short_description,
            description: j.arc_description,
            duration_days: j.duration_days,
            price: j.price_eur,
            epic_price: j.epic_price_eur,
            start_city: j.start_city,
            focus: j.focus_type,
            category: j.category,
            destinations: j.destinations,
            route_sequence: j.route_sequence,
            journey_type: j.journey_type,
            marketing_priority: j.marketing_priority,
            published: j.published,
            show_on_journeys_page: j.show_on_journeys_page,
            featured_on_homepage: j.featured_on_homepage,
            hidden: !j.show_on_journeys_page,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneysResponse {
    pub journeys: Vec<JourneyItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyResponse {
    pub journey: JourneyItem,
}

/// A journey suggested alongside another one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedJourney {
    pub slug: String,
    pub title: String,
    pub tagline: String,
    pub hero_image: String,
    pub duration: i64,
    pub region: String,
}

impl From<Journey> for RelatedJourney {
    fn from(j: Journey) -> Self {
        let tagline = j
            .tagline
            .filter(|t| !t.is_empty())
            .or(j.short_description)
            .unwrap_or_default();
        Self {
            slug: j.slug,
            title: j.title,
            tagline,
            hero_image: j.hero_image_url.unwrap_or_default(),
            duration: j.duration_days.unwrap_or_default(),
            region: j.region.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedJourneysResponse {
    pub journeys: Vec<RelatedJourney>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTripItem {
    pub slug: String,
    pub route_id: String,
    pub title: String,
    pub short_description: String,
    pub duration_hours: f64,
    #[serde(rename = "priceMAD")]
    pub price_mad: f64,
    #[serde(rename = "priceEUR")]
    pub price_eur: f64,
    pub departure_city: String,
    pub category: String,
    pub hero_image: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub meeting_point: String,
}

/// Departure city for trips that do not name one.
pub const DEFAULT_DEPARTURE_CITY: &str = "Marrakech";

impl From<DayTrip> for DayTripItem {
    fn from(t: DayTrip) -> Self {
        Self {
            includes: split_pipe(t.includes.as_deref()),
            excludes: split_pipe(t.excludes.as_deref()),
            slug: t.slug,
            route_id: t.route_id.unwrap_or_default(),
            title: t.title,
            short_description: t.short_description.unwrap_or_default(),
            duration_hours: t.duration_hours.unwrap_or_default(),
            price_mad: t.final_price_mad.unwrap_or_default(),
            price_eur: t.final_price_eur.unwrap_or_default(),
            departure_city: t
                .departure_city
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_DEPARTURE_CITY.to_string()),
            category: t.category.unwrap_or_default(),
            hero_image: t.hero_image_url.unwrap_or_default(),
            meeting_point: t.meeting_point.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonItem {
    pub id: String,
    /// Raw pipe-separated list of trip slugs.
    pub trip_slug: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "priceMAD")]
    pub price_mad: f64,
    #[serde(rename = "priceEUR")]
    pub price_eur: f64,
}

impl From<DayTripAddon> for AddonItem {
    fn from(a: DayTripAddon) -> Self {
        Self {
            id: a.addon_id,
            trip_slug: a.applies_to.unwrap_or_default(),
            title: a.addon_name,
            description: a.description.unwrap_or_default(),
            price_mad: a.final_price_mad_pp.unwrap_or_default(),
            price_eur: a.final_price_eur_pp.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTripsResponse {
    pub day_trips: Vec<DayTripItem>,
    pub addons: Vec<AddonItem>,
    pub hero_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub subtitle: String,
    pub image_url: String,
    pub description: String,
}

impl From<Guide> for GuideItem {
    fn from(g: Guide) -> Self {
        Self {
            id: g.guide_id,
            title: g.title,
            slug: g.slug,
            subtitle: g.subtitle.unwrap_or_default(),
            image_url: g.image_url.unwrap_or_default(),
            description: g.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidesResponse {
    pub guides: Vec<GuideItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialItem {
    pub id: String,
    pub quote: String,
    pub author: String,
    pub journey_title: String,
}

impl From<Testimonial> for TestimonialItem {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.testimonial_id,
            quote: t.quote.unwrap_or_default(),
            author: t.author.unwrap_or_default(),
            journey_title: t.journey_title.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialsResponse {
    pub testimonials: Vec<TestimonialItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GentleJourneyItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub hero_image: String,
    pub tagline: String,
    pub description: String,
    pub duration: i64,
    pub price: f64,
    pub cities: String,
    pub highlights: Vec<String>,
    pub accessibility_notes: Vec<String>,
}

impl From<GentleJourney> for GentleJourneyItem {
    fn from(j: GentleJourney) -> Self {
        Self {
            highlights: split_pipe(j.highlights.as_deref()),
            accessibility_notes: split_pipe(j.accessibility_notes.as_deref()),
            id: j.journey_id,
            title: j.title,
            slug: j.slug,
            hero_image: j.hero_image_url.unwrap_or_default(),
            tagline: j.tagline.unwrap_or_default(),
            description: j.description.unwrap_or_default(),
            duration: j.duration_days.unwrap_or_default(),
            price: j.price_eur.unwrap_or_default(),
            cities: j.route_cities.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamItem {
    pub id: String,
    pub name: String,
    pub role: String,
    pub quote: String,
    pub bio: String,
    pub image: String,
}

impl From<TeamMember> for TeamItem {
    fn from(t: TeamMember) -> Self {
        Self {
            id: t.team_id,
            name: t.name,
            role: t.role,
            quote: t.quote.unwrap_or_default(),
            bio: t.bio.unwrap_or_default(),
            image: t.image_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GentleSettings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GentleJourneysResponse {
    pub journeys: Vec<GentleJourneyItem>,
    pub team: Vec<TeamItem>,
    pub settings: GentleSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterConfig {
    pub show: bool,
    pub background_image: String,
    pub title: String,
    pub description: String,
    pub brand_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterColumnLink {
    pub label: String,
    pub href: String,
    #[serde(rename = "type")]
    pub link_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<FooterColumnLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub platform: String,
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalLink {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterResponse {
    pub newsletter: NewsletterConfig,
    pub columns: Vec<FooterColumn>,
    pub contact: Vec<ContactLink>,
    pub legal: Vec<LegalLink>,
    pub copyright: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailExistsResponse {
    pub exists: bool,
}

/// Response for form submissions that create a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCreated {
    pub success: bool,
    pub quote_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub success: bool,
    pub booking_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalCreated {
    pub success: bool,
    pub proposal_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Outcome of a bulk story import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoriesAdded {
    pub success: bool,
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: String,
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

impl From<Quote> for QuoteItem {
    fn from(q: Quote) -> Self {
        Self {
            id: q.quote_id,
            name: q.name,
            email: q.email,
            country: q.country,
            travel_dates: q.travel_dates,
            flexibility: q.flexibility,
            group_size: q.group_size,
            interests: q.interests,
            accommodation_style: q.accommodation_style,
            pace: q.pace,
            budget: q.budget,
            notes: q.notes,
            status: q.status,
            created_at: q.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesResponse {
    pub quotes: Vec<QuoteItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quote: QuoteItem,
}

/// Proposal as listed in the admin area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub id: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub country: Option<String>,
    pub hero_title: Option<String>,
    pub days: Option<i64>,
    pub nights: Option<i64>,
    pub num_guests: Option<i64>,
    pub total_price: Option<f64>,
    pub formatted_price: Option<String>,
    pub created_at: String,
}

impl From<Proposal> for ProposalSummary {
    fn from(p: Proposal) -> Self {
        Self {
            id: p.proposal_id,
            client_id: p.client_id,
            client_name: p.client_name,
            country: p.country,
            hero_title: p.hero_title,
            days: p.days,
            nights: p.nights,
            num_guests: p.num_guests,
            total_price: p.total_price,
            formatted_price: p.formatted_price,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalsResponse {
    pub proposals: Vec<ProposalSummary>,
}

/// Proposal as shown to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDetail {
    pub id: String,
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
    pub created_at: String,
}

impl From<Proposal> for ProposalDetail {
    fn from(p: Proposal) -> Self {
        let or_empty = |v: Option<serde_json::Value>| match v {
            Some(serde_json::Value::Null) | None => serde_json::Value::Array(Vec::new()),
            Some(v) => v,
        };
        Self {
            id: p.proposal_id,
            client_id: p.client_id,
            client_name: p.client_name,
            country: p.country,
            hero_image_url: p.hero_image_url,
            hero_title: p.hero_title,
            hero_blurb: p.hero_blurb,
            start_date: p.start_date,
            end_date: p.end_date,
            days: p.days,
            nights: p.nights,
            num_guests: p.num_guests,
            total_price: p.total_price,
            formatted_price: p.formatted_price,
            route_points: or_empty(p.route_points),
            days_list: or_empty(p.days_list),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub proposal: ProposalDetail,
}
