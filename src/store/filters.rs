//! Query filters for listing content.
//!
//! Each filter renders to a list of `WHERE` clauses plus positional values.

use rusqlite::types::Value;

/// Filter for listing journeys.
///
/// `published` unset means `published = true` unless `include_hidden` is
/// set, in which case drafts are returned as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneyFilter {
    pub published: Option<bool>,
    pub show_on_journeys_page: Option<bool>,
    pub featured_on_homepage: Option<bool>,
    pub category: Option<String>,
    pub include_hidden: bool,
}

impl JourneyFilter {
    /// Only published journeys.
    #[must_use]
    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }

    /// The publish-state filter actually applied.
    #[must_use]
    pub fn effective_published(&self) -> Option<bool> {
        match self.published {
            Some(published) => Some(published),
            None if self.include_hidden => None,
            None => Some(true),
        }
    }

    pub(crate) fn clauses(&self) -> Clauses {
        let mut clauses = Clauses::default();
        clauses.push_bool("published", self.effective_published());
        clauses.push_bool("show_on_journeys_page", self.show_on_journeys_page);
        clauses.push_bool("featured_on_homepage", self.featured_on_homepage);
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            clauses.push_text("category", category);
        }
        clauses
    }
}

/// Filter on the `published` flag alone. Unset means no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishedFilter {
    pub published: Option<bool>,
}

impl PublishedFilter {
    #[must_use]
    pub fn published() -> Self {
        Self {
            published: Some(true),
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    pub(crate) fn clauses(self) -> Clauses {
        let mut clauses = Clauses::default();
        clauses.push_bool("published", self.published);
        clauses
    }
}

/// Filter for team members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamFilter {
    pub published: Option<bool>,
    pub show_on_gentle: Option<bool>,
}

impl TeamFilter {
    pub(crate) fn clauses(self) -> Clauses {
        let mut clauses = Clauses::default();
        clauses.push_bool("published", self.published);
        clauses.push_bool("show_on_gentle", self.show_on_gentle);
        clauses
    }
}

/// Filter for quote requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    pub status: Option<String>,
}

impl QuoteFilter {
    pub(crate) fn clauses(&self) -> Clauses {
        let mut clauses = Clauses::default();
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            clauses.push_text("status", status);
        }
        clauses
    }
}

/// Equality clauses joined with `AND`.
#[derive(Debug, Default)]
pub(crate) struct Clauses {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl Clauses {
    fn push_bool(&mut self, column: &'static str, value: Option<bool>) {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(Value::Integer(i64::from(value)));
        }
    }

    fn push_text(&mut self, column: &'static str, value: &str) {
        self.columns.push(column);
        self.values.push(Value::Text(value.to_string()));
    }

    /// Render as ` WHERE a = ?1 AND b = ?2`, or an empty string.
    pub(crate) fn where_sql(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect();
        format!(" WHERE {}", parts.join(" AND "))
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journey_filter_defaults_to_published() {
        let filter = JourneyFilter::default();
        assert_eq!(filter.effective_published(), Some(true));
        assert_eq!(filter.clauses().where_sql(), " WHERE published = ?1");
    }

    #[test]
    fn test_journey_filter_include_hidden() {
        let filter = JourneyFilter {
            include_hidden: true,
            ..JourneyFilter::default()
        };
        assert_eq!(filter.effective_published(), None);
        assert_eq!(filter.clauses().where_sql(), "");
    }

    #[test]
    fn test_journey_filter_explicit_published_wins() {
        let filter = JourneyFilter {
            published: Some(false),
            include_hidden: true,
            ..JourneyFilter::default()
        };
        assert_eq!(filter.effective_published(), Some(false));
    }

    #[test]
    fn test_journey_filter_all_clauses() {
        let filter = JourneyFilter {
            published: Some(true),
            show_on_journeys_page: Some(true),
            featured_on_homepage: Some(false),
            category: Some("desert".to_string()),
            include_hidden: false,
        };
        let clauses = filter.clauses();
        assert_eq!(
            clauses.where_sql(),
            " WHERE published = ?1 AND show_on_journeys_page = ?2 AND featured_on_homepage = ?3 AND category = ?4"
        );
        let values = clauses.into_values();
        assert_eq!(values[2], Value::Integer(0));
        assert_eq!(values[3], Value::Text("desert".to_string()));
    }

    #[test]
    fn test_published_filter_all_is_unfiltered() {
        assert_eq!(PublishedFilter::all().clauses().where_sql(), "");
        assert_eq!(
            PublishedFilter::published().clauses().where_sql(),
            " WHERE published = ?1"
        );
    }

    #[test]
    fn test_quote_filter_ignores_empty_status() {
        let filter = QuoteFilter {
            status: Some(String::new()),
        };
        assert_eq!(filter.clauses().where_sql(), "");
    }
}
