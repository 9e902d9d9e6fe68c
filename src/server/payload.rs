//! Request bodies and query strings accepted by the API.
//!
//! Form submissions from the website are loosely typed, so a few fields are
//! taken as raw JSON and normalised here.

use serde::Deserialize;
use serde_json::Value;

use crate::store::{NewOvernightBooking, NewProposal, NewQuote, NewStory, QuoteUpdate};

/// Parse the leading integer of a string the way form inputs are read:
/// leading whitespace and a sign are allowed, trailing junk is ignored.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// A count sent either as a number or as a numeric string, such as a group
/// size or a number of guests. Zero and unparsable values count as not given.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn form_int(value: Option<&Value>) -> Option<i64> {
    let size = match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    };
    size.filter(|n| *n != 0)
}

/// A price sent either as a number or as a numeric string.
/// Zero and unparsable values count as not given.
#[must_use]
pub fn form_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite() && *a != 0.0)
}

/// Interests sent either as a list of labels or as a single string.
#[must_use]
pub fn interests(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Body of `POST /api/chatbot`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// Anything other than a JSON string is rejected by the handler.
    pub message: Option<Value>,
}

/// Quote fields shared by the trip planner and the admin endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub travel_dates: Option<String>,
    pub flexibility: Option<String>,
    pub group_size: Option<Value>,
    pub interests: Option<Value>,
    pub accommodation_style: Option<String>,
    pub pace: Option<String>,
    pub budget: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl QuoteRequest {
    /// Build an insert, filling blanks with empty strings.
    #[must_use]
    pub fn into_new_quote(self, quote_id: String, status: String) -> NewQuote {
        NewQuote {
            quote_id,
            group_size: form_int(self.group_size.as_ref()),
            interests: Some(interests(self.interests.as_ref())),
            name: Some(self.name.unwrap_or_default()),
            email: Some(self.email.unwrap_or_default()),
            country: Some(self.country.unwrap_or_default()),
            travel_dates: Some(self.travel_dates.unwrap_or_default()),
            flexibility: Some(self.flexibility.unwrap_or_default()),
            accommodation_style: Some(self.accommodation_style.unwrap_or_default()),
            pace: Some(self.pace.unwrap_or_default()),
            budget: Some(self.budget.unwrap_or_default()),
            notes: Some(self.notes.unwrap_or_default()),
            status,
        }
    }

    /// Only the fields present in the body are changed.
    #[must_use]
    pub fn into_update(self) -> QuoteUpdate {
        QuoteUpdate {
            group_size: form_int(self.group_size.as_ref()),
            interests: self.interests.as_ref().map(|v| interests(Some(v))),
            name: self.name,
            email: self.email,
            country: self.country,
            travel_dates: self.travel_dates,
            flexibility: self.flexibility,
            accommodation_style: self.accommodation_style,
            pace: self.pace,
            budget: self.budget,
            notes: self.notes,
            status: self.status,
        }
    }
}

/// Body of `PATCH /api/admin/quotes/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

/// Body of `POST /api/overnight-booking`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvernightBookingRequest {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub property: Option<String>,
    pub room_type: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<Value>,
    pub total_price: Option<Value>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

impl OvernightBookingRequest {
    /// Returns `None` when a required field is missing or empty.
    #[must_use]
    pub fn into_new_booking(self, booking_id: String) -> Option<NewOvernightBooking> {
        Some(NewOvernightBooking {
            booking_id,
            guest_name: non_empty(self.guest_name)?,
            guest_email: non_empty(self.guest_email)?,
            property: non_empty(self.property)?,
            check_in: non_empty(self.check_in)?,
            check_out: non_empty(self.check_out)?,
            room_type: Some(self.room_type.unwrap_or_default()),
            guests: form_int(self.guests.as_ref()).unwrap_or(1),
            total_price: form_amount(self.total_price.as_ref()),
            currency: non_empty(self.currency).unwrap_or_else(|| "EUR".to_string()),
            notes: Some(self.notes.unwrap_or_default()),
            status: "pending".to_string(),
        })
    }
}

/// Body of `POST /api/admin/proposals`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
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
    pub route_points: Option<Value>,
    pub days_list: Option<Value>,
}

impl ProposalRequest {
    #[must_use]
    pub fn into_new_proposal(self, proposal_id: String) -> NewProposal {
        NewProposal {
            proposal_id,
            client_id: Some(self.client_id.unwrap_or_default()),
            client_name: Some(self.client_name.unwrap_or_default()),
            country: non_empty(self.country),
            hero_image_url: Some(self.hero_image_url.unwrap_or_default()),
            hero_title: Some(self.hero_title.unwrap_or_default()),
            hero_blurb: Some(self.hero_blurb.unwrap_or_default()),
            start_date: non_empty(self.start_date),
            end_date: non_empty(self.end_date),
            days: self.days.filter(|d| *d != 0),
            nights: self.nights.filter(|n| *n != 0),
            num_guests: self.num_guests.filter(|n| *n != 0),
            total_price: self.total_price.filter(|p| *p != 0.0),
            formatted_price: Some(self.formatted_price.unwrap_or_default()),
            route_points: json_list(self.route_points),
            days_list: json_list(self.days_list),
        }
    }
}

fn json_list(value: Option<Value>) -> Value {
    match value {
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(value) => value,
    }
}

/// Body of `POST /api/stories/add`.
#[derive(Debug, Default, Deserialize)]
pub struct StoriesRequest {
    /// Must be a JSON array; checked by the handler.
    pub stories: Option<Value>,
}

/// One story in a bulk import.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryInput {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub source_type: Option<String>,
    pub hero_image: Option<String>,
    pub hero_caption: Option<String>,
    pub mj_prompt: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub read_time: Option<i64>,
    pub year: Option<i64>,
    pub text_by: Option<String>,
    pub images_by: Option<String>,
    pub sources: Option<String>,
    pub tags: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
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

impl StoryInput {
    /// The slug, if present and non-empty.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    /// Build an insert. Stories are published unless explicitly marked otherwise.
    #[must_use]
    pub fn into_new_story(self, slug: String) -> NewStory {
        let text = |v: Option<String>| Some(v.unwrap_or_default());
        let number = |v: Option<i64>| v.filter(|n| *n != 0);
        NewStory {
            slug,
            title: self.title.unwrap_or_default(),
            subtitle: text(self.subtitle),
            category: text(self.category),
            source_type: text(self.source_type),
            hero_image: text(self.hero_image),
            mj_prompt: text(self.mj_prompt),
            hero_caption: text(self.hero_caption),
            excerpt: text(self.excerpt),
            body: text(self.body),
            read_time: number(self.read_time),
            year: number(self.year),
            text_by: text(self.text_by),
            images_by: text(self.images_by),
            sources: text(self.sources),
            tags: text(self.tags),
            published: self.published != Some(false),
            featured: self.featured.unwrap_or(false),
            sort_order: number(self.sort_order),
            the_facts: text(self.the_facts),
            region: text(self.region),
            country: text(self.country),
            theme: text(self.theme),
            era: text(self.era),
            era_start: number(self.era_start),
            era_end: number(self.era_end),
            related_place_slugs: text(self.related_place_slugs),
            related_story_slugs: text(self.related_story_slugs),
            seo_title: text(self.seo_title),
            seo_description: text(self.seo_description),
        }
    }
}

/// Query of `GET /api/journeys`.
#[derive(Debug, Default, Deserialize)]
pub struct JourneysQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Query of `GET /api/related-journeys`.
#[derive(Debug, Default, Deserialize)]
pub struct RelatedQuery {
    pub region: Option<String>,
    /// Comma-separated.
    pub tags: Option<String>,
    pub exclude: Option<String>,
    pub limit: Option<String>,
}

/// Default number of related journeys.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

impl RelatedQuery {
    /// Lower-cased, trimmed, non-empty tags.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(parse_leading_int)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_RELATED_LIMIT)
    }
}

/// Query of `GET /api/plan-your-trip`.
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Query of `GET /api/proposals`.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
