//! HTTP handlers for the site API.

mod admin;
mod chatbot;
mod content;
mod footer;
mod forms;

use std::sync::atomic::{AtomicI64, Ordering};

pub use admin::{
    get_admin_proposals, get_admin_quote, get_admin_quotes, patch_admin_quote, post_admin_proposal,
    post_admin_quote, put_admin_quote,
};
pub use chatbot::{get_chatbot_training, post_chatbot};
pub use content::{
    get_day_trips, get_gentle_journeys, get_guides, get_journey, get_journeys,
    get_related_journeys, get_testimonials,
};
pub use footer::{drive_thumbnail_url, get_footer};
pub use forms::{
    get_plan_your_trip, get_proposal, post_overnight_booking, post_plan_your_trip, post_stories,
};

static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Record id of the form `<prefix>-<unix millis>`.
///
/// The numeric part never repeats within a process: two calls in the same
/// millisecond get consecutive values.
#[must_use]
pub fn timestamp_id(prefix: &str) -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_ID_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    format!("{prefix}-{}", now.max(previous + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_id_format() {
        let id = timestamp_id("QT");
        let millis: i64 = id.strip_prefix("QT-").unwrap().parse().unwrap();
        assert!(millis >= chrono::Utc::now().timestamp_millis() - 60_000);
    }

    #[test]
    fn test_timestamp_ids_are_unique() {
        let ids: Vec<String> = (0..50).map(|_| timestamp_id("OVN")).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }
}
