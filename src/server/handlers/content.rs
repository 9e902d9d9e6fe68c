//! Published site content: journeys, day trips, guides, testimonials.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::server::api::{
    DayTripsResponse, GentleJourneysResponse, GentleSettings, GuidesResponse, JourneyResponse,
    JourneysResponse, RelatedJourney, RelatedJourneysResponse, TestimonialsResponse,
};
use crate::server::error::{ApiError, OrInternal};
use crate::server::payload::{JourneysQuery, RelatedQuery};
use crate::server::state::AppState;
use crate::store::{Journey, JourneyFilter, PublishedFilter, TeamFilter};

/// Setting holding the day trips page hero image.
pub const DAY_TRIPS_HERO_KEY: &str = "day_trips_hero_image";

const DEFAULT_GENTLE_TITLE: &str = "Built for you. Not adapted.";
const DEFAULT_GENTLE_SUBTITLE: &str = "Journeys designed around how you actually travel.";

/// GET /api/journeys - Published journeys, optionally by category or homepage flag.
pub async fn get_journeys(
    State(state): State<AppState>,
    Query(query): Query<JourneysQuery>,
) -> Result<Json<JourneysResponse>, ApiError> {
    let filter = JourneyFilter {
        category: query.category,
        featured_on_homepage: query.featured,
        ..JourneyFilter::published()
    };
    let journeys = state
        .store
        .list_journeys(filter)
        .await
        .or_internal("Failed to fetch journeys")?;

    Ok(Json(JourneysResponse {
        journeys: journeys.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/journeys/:slug - A single journey.
pub async fn get_journey(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<JourneyResponse>, ApiError> {
    let journey = state
        .store
        .journey_by_slug(&slug)
        .await
        .or_internal("Failed to fetch journey")?
        .ok_or_else(|| ApiError::not_found("Journey not found"))?;

    Ok(Json(JourneyResponse {
        journey: journey.into(),
    }))
}

/// Pick related journeys by region, then by tag overlap.
#[must_use]
pub fn related_journeys(journeys: Vec<Journey>, query: &RelatedQuery) -> Vec<RelatedJourney> {
    let region = query.region.as_deref().unwrap_or_default().to_lowercase();
    let exclude = query.exclude.as_deref().unwrap_or_default();
    let tags = query.tag_list();

    journeys
        .into_iter()
        .filter(|j| {
            if !exclude.is_empty() && j.slug == exclude {
                return false;
            }
            if !region.is_empty()
                && j.region.as_deref().map(str::to_lowercase).as_deref() == Some(region.as_str())
            {
                return true;
            }
            let journey_tags = j.tags.as_deref().unwrap_or_default().to_lowercase();
            tags.iter().any(|tag| journey_tags.contains(tag.as_str()))
        })
        .take(query.effective_limit())
        .map(Into::into)
        .collect()
}

/// GET /api/related-journeys - Suggestions for a journey page. Never fails.
pub async fn get_related_journeys(
    State(state): State<AppState>,
    Query(query): Query<RelatedQuery>,
) -> Json<RelatedJourneysResponse> {
    let has_region = query.region.as_deref().is_some_and(|r| !r.is_empty());
    let has_tags = query.tags.as_deref().is_some_and(|t| !t.is_empty());
    if !has_region && !has_tags {
        return Json(RelatedJourneysResponse::default());
    }

    match state.store.list_journeys(JourneyFilter::published()).await {
        Ok(journeys) => Json(RelatedJourneysResponse {
            journeys: related_journeys(journeys, &query),
        }),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch related journeys");
            Json(RelatedJourneysResponse::default())
        }
    }
}

/// GET /api/day-trips - Published day trips, all add-ons and the page hero.
pub async fn get_day_trips(
    State(state): State<AppState>,
) -> Result<Json<DayTripsResponse>, ApiError> {
    let (trips, addons, hero) = tokio::try_join!(
        state.store.list_day_trips(PublishedFilter::published()),
        state.store.list_day_trip_addons(None),
        state.store.setting(DAY_TRIPS_HERO_KEY),
    )
    .or_internal("Failed to fetch day trips")?;

    Ok(Json(DayTripsResponse {
        day_trips: trips.into_iter().map(Into::into).collect(),
        addons: addons.into_iter().map(Into::into).collect(),
        hero_image: hero.and_then(|s| s.value).unwrap_or_default(),
    }))
}

/// GET /api/guides
pub async fn get_guides(State(state): State<AppState>) -> Result<Json<GuidesResponse>, ApiError> {
    let guides = state
        .store
        .list_guides(PublishedFilter::published())
        .await
        .or_internal("Failed to fetch guides")?;

    Ok(Json(GuidesResponse {
        guides: guides.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/testimonials
pub async fn get_testimonials(
    State(state): State<AppState>,
) -> Result<Json<TestimonialsResponse>, ApiError> {
    let testimonials = state
        .store
        .list_testimonials(PublishedFilter::published())
        .await
        .or_internal("Failed to fetch testimonials")?;

    Ok(Json(TestimonialsResponse {
        testimonials: testimonials.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/gentle-journeys - The gentle collection with its team and page copy.
pub async fn get_gentle_journeys(
    State(state): State<AppState>,
) -> Result<Json<GentleJourneysResponse>, ApiError> {
    let team_filter = TeamFilter {
        published: Some(true),
        show_on_gentle: Some(true),
    };
    let (journeys, team, settings) = tokio::try_join!(
        state.store.list_gentle_journeys(PublishedFilter::published()),
        state.store.list_team(team_filter),
        state.store.list_gentle_settings(),
    )
    .or_internal("Failed to fetch gentle journeys")?;

    let settings: HashMap<String, String> = settings
        .into_iter()
        .map(|s| (s.key, s.value.unwrap_or_default()))
        .collect();
    let text = |key: &str, default: &str| {
        settings
            .get(key)
            .filter(|v| !v.is_empty())
            .map_or_else(|| default.to_string(), Clone::clone)
    };

    Ok(Json(GentleJourneysResponse {
        journeys: journeys.into_iter().map(Into::into).collect(),
        team: team.into_iter().map(Into::into).collect(),
        settings: GentleSettings {
            hero_title: text("hero_title", DEFAULT_GENTLE_TITLE),
            hero_subtitle: text("hero_subtitle", DEFAULT_GENTLE_SUBTITLE),
            hero_image: text("hero_image", ""),
        },
    }))
}
