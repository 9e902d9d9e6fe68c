//! Content store with async `SQLite` operations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use super::error::StoreError;
use super::filters::{JourneyFilter, PublishedFilter, TeamFilter};
use super::schema;
use super::types::{
    DayTrip, DayTripAddon, FooterLegal, FooterLink, GentleJourney, Guide, Journey, Setting,
    TeamMember, Testimonial, TrainingRow,
};

/// Returns the default path for the content database.
///
/// This is `~/.local/share/tripdesk/content.db` on Unix systems.
#[must_use]
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripdesk")
        .join("content.db")
}

/// Handle to the site's content database.
///
/// A single `SQLite` connection guarded by an async mutex; every query runs
/// on the blocking thread pool. Cloning is cheap and shares the connection.
#[derive(Debug, Clone)]
pub struct ContentStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl ContentStore {
    /// Open a content store at the specified path.
    ///
    /// Creates parent directories if they don't exist and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot be applied.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|source| {
                    StoreError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let path_clone = path.clone();
        let conn = tokio::task::spawn_blocking(move || -> Result<Connection, StoreError> {
            let conn =
                Connection::open(&path_clone).map_err(|source| StoreError::DatabaseOpen {
                    path: path_clone,
                    source,
                })?;
            schema::apply(&conn)?;
            Ok(conn)
        })
        .await
        .map_err(|_| StoreError::TaskCancelled)??;

        tracing::info!(path = %path.display(), "Opened content store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path),
        })
    }

    /// Open an in-memory content store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or the schema cannot be applied.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = tokio::task::spawn_blocking(|| -> Result<Connection, StoreError> {
            let conn = Connection::open_in_memory()?;
            schema::apply(&conn)?;
            Ok(conn)
        })
        .await
        .map_err(|_| StoreError::TaskCancelled)??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Returns the path to the database, if opened from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Schema version recorded when the store was opened.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn schema_version(&self) -> Result<Option<u32>, StoreError> {
        self.with_conn(|conn| Ok(schema::recorded_version(conn)?))
            .await
    }

    /// Run `f` against the connection on the blocking pool.
    pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            f(&conn)
        })
        .await
        .map_err(|_| StoreError::TaskCancelled)?
    }

    /// Execute a batch of SQL statements, e.g. a content fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub async fn run_script(&self, sql: impl Into<String>) -> Result<(), StoreError> {
        let sql = sql.into();
        self.with_conn(move |conn| {
            conn.execute_batch(&sql)?;
            Ok(())
        })
        .await
    }

    /// Read a SQL file from disk and execute it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a statement fails.
    pub async fn run_script_file(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let sql = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::ReadScript {
                path: path.to_path_buf(),
                source,
            })?;
        self.run_script(sql).await
    }

    /// List journeys ordered by duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_journeys(&self, filter: JourneyFilter) -> Result<Vec<Journey>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM journeys{} ORDER BY duration_days ASC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), journey_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Look up a journey by slug, regardless of publish state.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn journey_by_slug(&self, slug: &str) -> Result<Option<Journey>, StoreError> {
        let slug = slug.to_string();
        self.with_conn(move |conn| {
            let journey = conn
                .query_row(
                    "SELECT * FROM journeys WHERE slug = ?1",
                    params![slug],
                    journey_from_row,
                )
                .optional()?;
            Ok(journey)
        })
        .await
    }

    /// List day trips ordered by duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_day_trips(&self, filter: PublishedFilter) -> Result<Vec<DayTrip>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM day_trips{} ORDER BY duration_hours ASC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), |row| {
                    Ok(DayTrip {
                        slug: row.get("slug")?,
                        route_id: row.get("route_id")?,
                        title: row.get("title")?,
                        short_description: row.get("short_description")?,
                        duration_hours: row.get("duration_hours")?,
                        final_price_mad: row.get("final_price_mad")?,
                        final_price_eur: row.get("final_price_eur")?,
                        departure_city: row.get("departure_city")?,
                        category: row.get("category")?,
                        hero_image_url: row.get("hero_image_url")?,
                        includes: row.get("includes")?,
                        excludes: row.get("excludes")?,
                        meeting_point: row.get("meeting_point")?,
                        published: row.get("published")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// List published day trip add-ons, optionally only those offered for one trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_day_trip_addons(
        &self,
        trip_slug: Option<&str>,
    ) -> Result<Vec<DayTripAddon>, StoreError> {
        let addons = self
            .with_conn(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT * FROM day_trip_addons WHERE published = 1 ORDER BY rowid ASC",
                )?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok(DayTripAddon {
                            addon_id: row.get("addon_id")?,
                            addon_name: row.get("addon_name")?,
                            description: row.get("description")?,
                            final_price_mad_pp: row.get("final_price_mad_pp")?,
                            final_price_eur_pp: row.get("final_price_eur_pp")?,
                            applies_to: row.get("applies_to")?,
                            published: row.get("published")?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        Ok(match trip_slug {
            Some(slug) => addons
                .into_iter()
                .filter(|addon| addon.applies_to_trip(slug))
                .collect(),
            None => addons,
        })
    }

    /// All website settings rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_settings(&self) -> Result<Vec<Setting>, StoreError> {
        self.list_key_values("website_settings").await
    }

    /// A single website setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn setting(&self, key: &str) -> Result<Option<Setting>, StoreError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let setting = conn
                .query_row(
                    "SELECT key, value FROM website_settings WHERE key = ?1",
                    params![key],
                    |row| {
                        Ok(Setting {
                            key: row.get(0)?,
                            value: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(setting)
        })
        .await
    }

    /// All settings for the accessible-travel pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_gentle_settings(&self) -> Result<Vec<Setting>, StoreError> {
        self.list_key_values("gentle_settings").await
    }

    async fn list_key_values(&self, table: &'static str) -> Result<Vec<Setting>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!("SELECT key, value FROM {table}"))?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Setting {
                        key: row.get(0)?,
                        value: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Footer links ordered by column, then position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_footer_links(&self) -> Result<Vec<FooterLink>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, column_number, column_title, link_order, link_label, link_href, link_type
                 FROM footer_links ORDER BY column_number ASC, link_order ASC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(FooterLink {
                        id: row.get(0)?,
                        column_number: row.get(1)?,
                        column_title: row.get(2)?,
                        link_order: row.get(3)?,
                        link_label: row.get(4)?,
                        link_href: row.get(5)?,
                        link_type: row.get(6)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Legal footer data for a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn footer_legal(&self, site_id: &str) -> Result<Option<FooterLegal>, StoreError> {
        let site_id = site_id.to_string();
        self.with_conn(move |conn| {
            let legal = conn
                .query_row(
                    "SELECT site_id, legal_links, copyright_text FROM footer_legal WHERE site_id = ?1",
                    params![site_id],
                    |row| {
                        Ok(FooterLegal {
                            site_id: row.get(0)?,
                            legal_links: row.get(1)?,
                            copyright_text: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(legal)
        })
        .await
    }

    /// Team members ordered by `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_team(&self, filter: TeamFilter) -> Result<Vec<TeamMember>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM website_team{} ORDER BY sort_order ASC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), |row| {
                    Ok(TeamMember {
                        team_id: row.get("team_id")?,
                        name: row.get("name")?,
                        role: row.get("role")?,
                        quote: row.get("quote")?,
                        bio: row.get("bio")?,
                        image_url: row.get("image_url")?,
                        published: row.get("published")?,
                        sort_order: row.get("sort_order")?,
                        show_on_gentle: row.get("show_on_gentle")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Travel guides ordered by `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_guides(&self, filter: PublishedFilter) -> Result<Vec<Guide>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM website_guides{} ORDER BY sort_order ASC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), |row| {
                    Ok(Guide {
                        guide_id: row.get("guide_id")?,
                        title: row.get("title")?,
                        slug: row.get("slug")?,
                        subtitle: row.get("subtitle")?,
                        image_url: row.get("image_url")?,
                        description: row.get("description")?,
                        published: row.get("published")?,
                        sort_order: row.get("sort_order")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Accessible-travel journeys ordered by `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_gentle_journeys(
        &self,
        filter: PublishedFilter,
    ) -> Result<Vec<GentleJourney>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM gentle_journeys{} ORDER BY sort_order ASC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), |row| {
                    Ok(GentleJourney {
                        journey_id: row.get("journey_id")?,
                        title: row.get("title")?,
                        slug: row.get("slug")?,
                        hero_image_url: row.get("hero_image_url")?,
                        tagline: row.get("tagline")?,
                        description: row.get("description")?,
                        duration_days: row.get("duration_days")?,
                        price_eur: row.get("price_eur")?,
                        published: row.get("published")?,
                        route_cities: row.get("route_cities")?,
                        highlights: row.get("highlights")?,
                        accessibility_notes: row.get("accessibility_notes")?,
                        sort_order: row.get("sort_order")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Testimonials ordered by `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_testimonials(
        &self,
        filter: PublishedFilter,
    ) -> Result<Vec<Testimonial>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM testimonials{} ORDER BY sort_order ASC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), |row| {
                    Ok(Testimonial {
                        testimonial_id: row.get("testimonial_id")?,
                        quote: row.get("quote")?,
                        author: row.get("author")?,
                        journey_title: row.get("journey_title")?,
                        published: row.get("published")?,
                        sort_order: row.get("sort_order")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// The chatbot keyword table in `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_training(&self) -> Result<Vec<TrainingRow>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, category, question, answer, keywords, sort_order
                 FROM chatbot_training ORDER BY sort_order ASC, id ASC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(TrainingRow {
                        id: row.get(0)?,
                        category: row.get(1)?,
                        question: row.get(2)?,
                        answer: row.get(3)?,
                        keywords: row.get(4)?,
                        sort_order: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }
}

fn journey_from_row(row: &Row<'_>) -> rusqlite::Result<Journey> {
    Ok(Journey {
        id: row.get("id")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        hero_image_url: row.get("hero_image_url")?,
        short_description: row.get("short_description")?,
        arc_description: row.get("arc_description")?,
        duration_days: row.get("duration_days")?,
        price_eur: row.get("price_eur")?,
        epic_price_eur: row.get("epic_price_eur")?,
        start_city: row.get("start_city")?,
        focus_type: row.get("focus_type")?,
        route_sequence: row.get("route_sequence")?,
        category: row.get("category")?,
        destinations: row.get("destinations")?,
        journey_type: row.get("journey_type")?,
        marketing_priority: row.get("marketing_priority")?,
        region: row.get("region")?,
        tags: row.get("tags")?,
        tagline: row.get("tagline")?,
        published: row.get("published")?,
        show_on_journeys_page: row.get("show_on_journeys_page")?,
        featured_on_homepage: row.get("featured_on_homepage")?,
    })
}
