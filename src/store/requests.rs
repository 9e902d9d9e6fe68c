//! Inbound requests: quotes, proposals, overnight bookings and stories.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::content::ContentStore;
use super::error::StoreError;
use super::filters::QuoteFilter;
use super::types::{
    NewOvernightBooking, NewProposal, NewQuote, NewStory, OvernightBooking, Proposal, Quote,
    QuoteUpdate,
};

/// Fixed-width UTC timestamp so `ORDER BY created_at` sorts chronologically.
fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

impl ContentStore {
    /// List quote requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_quotes(&self, filter: QuoteFilter) -> Result<Vec<Quote>, StoreError> {
        self.with_conn(move |conn| {
            let clauses = filter.clauses();
            let sql = format!(
                "SELECT * FROM quotes{} ORDER BY created_at DESC, rowid DESC",
                clauses.where_sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(clauses.into_values()), quote_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Look up a quote by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn quote_by_id(&self, quote_id: &str) -> Result<Option<Quote>, StoreError> {
        let quote_id = quote_id.to_string();
        self.with_conn(move |conn| select_quote(conn, &quote_id)).await
    }

    /// Whether any quote was submitted from this email address (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn quote_email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let email = email.to_lowercase();
        self.with_conn(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM quotes WHERE lower(email) = ?1)",
                params![email],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    /// Insert a quote and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, e.g. on a duplicate id.
    pub async fn create_quote(&self, quote: NewQuote) -> Result<Quote, StoreError> {
        let created_at = now();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO quotes (quote_id, name, email, country, travel_dates, flexibility, group_size,
                                     interests, accommodation_style, pace, budget, notes, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    quote.quote_id,
                    quote.name,
                    quote.email,
                    quote.country,
                    quote.travel_dates,
                    quote.flexibility,
                    quote.group_size,
                    quote.interests,
                    quote.accommodation_style,
                    quote.pace,
                    quote.budget,
                    quote.notes,
                    quote.status,
                    created_at,
                ],
            )?;
            select_quote(conn, &quote.quote_id)?
                .ok_or_else(|| StoreError::Query(rusqlite::Error::QueryReturnedNoRows))
        })
        .await
    }

    /// Apply a partial update. Returns `None` if the quote does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_quote(
        &self,
        quote_id: &str,
        update: QuoteUpdate,
    ) -> Result<Option<Quote>, StoreError> {
        let quote_id = quote_id.to_string();
        self.with_conn(move |conn| {
            let mut assignments: Vec<String> = Vec::new();
            let mut values: Vec<Value> = Vec::new();
            let text_fields = [
                ("name", update.name),
                ("email", update.email),
                ("country", update.country),
                ("travel_dates", update.travel_dates),
                ("flexibility", update.flexibility),
                ("interests", update.interests),
                ("accommodation_style", update.accommodation_style),
                ("pace", update.pace),
                ("budget", update.budget),
                ("notes", update.notes),
                ("status", update.status),
            ];
            for (column, value) in text_fields {
                if let Some(value) = value {
                    values.push(Value::Text(value));
                    assignments.push(format!("{column} = ?{}", values.len()));
                }
            }
            if let Some(group_size) = update.group_size {
                values.push(Value::Integer(group_size));
                assignments.push(format!("group_size = ?{}", values.len()));
            }

            if !assignments.is_empty() {
                values.push(Value::Text(quote_id.clone()));
                let sql = format!(
                    "UPDATE quotes SET {} WHERE quote_id = ?{}",
                    assignments.join(", "),
                    values.len()
                );
                conn.execute(&sql, params_from_iter(values))?;
            }

            select_quote(conn, &quote_id)
        })
        .await
    }

    /// List proposals, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM proposals ORDER BY created_at DESC, rowid DESC")?;
            let rows = stmt
                .query_map([], proposal_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Look up a proposal by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn proposal_by_id(&self, proposal_id: &str) -> Result<Option<Proposal>, StoreError> {
        let proposal_id = proposal_id.to_string();
        self.with_conn(move |conn| select_proposal(conn, &proposal_id))
            .await
    }

    /// Insert a proposal and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON columns cannot be serialized or the insert fails.
    pub async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal, StoreError> {
        let created_at = now();
        let route_points = serde_json::to_string(&proposal.route_points)?;
        let days_list = serde_json::to_string(&proposal.days_list)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO proposals (proposal_id, client_id, client_name, country, hero_image_url, hero_title,
                                        hero_blurb, start_date, end_date, days, nights, num_guests, total_price,
                                        formatted_price, route_points, days_list, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                params![
                    proposal.proposal_id,
                    proposal.client_id,
                    proposal.client_name,
                    proposal.country,
                    proposal.hero_image_url,
                    proposal.hero_title,
                    proposal.hero_blurb,
                    proposal.start_date,
                    proposal.end_date,
                    proposal.days,
                    proposal.nights,
                    proposal.num_guests,
                    proposal.total_price,
                    proposal.formatted_price,
                    route_points,
                    days_list,
                    created_at,
                ],
            )?;
            select_proposal(conn, &proposal.proposal_id)?
                .ok_or_else(|| StoreError::Query(rusqlite::Error::QueryReturnedNoRows))
        })
        .await
    }

    /// Record an overnight stay request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_overnight_booking(
        &self,
        booking: NewOvernightBooking,
    ) -> Result<OvernightBooking, StoreError> {
        let created_at = now();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO overnight_bookings (booking_id, guest_name, guest_email, property, room_type,
                                                 check_in, check_out, guests, total_price, currency, notes,
                                                 status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    booking.booking_id,
                    booking.guest_name,
                    booking.guest_email,
                    booking.property,
                    booking.room_type,
                    booking.check_in,
                    booking.check_out,
                    booking.guests,
                    booking.total_price,
                    booking.currency,
                    booking.notes,
                    booking.status,
                    created_at,
                ],
            )?;
            let booking = conn.query_row(
                "SELECT * FROM overnight_bookings WHERE id = ?1",
                params![conn.last_insert_rowid()],
                |row| {
                    Ok(OvernightBooking {
                        id: row.get("id")?,
                        booking_id: row.get("booking_id")?,
                        guest_name: row.get("guest_name")?,
                        guest_email: row.get("guest_email")?,
                        property: row.get("property")?,
                        room_type: row.get("room_type")?,
                        check_in: row.get("check_in")?,
                        check_out: row.get("check_out")?,
                        guests: row.get("guests")?,
                        total_price: row.get("total_price")?,
                        currency: row.get("currency")?,
                        notes: row.get("notes")?,
                        status: row.get("status")?,
                        created_at: row.get("created_at")?,
                    })
                },
            )?;
            Ok(booking)
        })
        .await
    }

    /// Whether a story with this slug already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn story_exists(&self, slug: &str) -> Result<bool, StoreError> {
        let slug = slug.to_string();
        self.with_conn(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM stories WHERE slug = ?1)",
                params![slug],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    /// Insert a story and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, e.g. on a duplicate slug.
    pub async fn create_story(&self, story: NewStory) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let timestamp = now();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO stories (id, slug, title, subtitle, category, source_type, hero_image, mj_prompt,
                                      hero_caption, excerpt, body, read_time, year, text_by, images_by, sources,
                                      tags, published, featured, sort_order, the_facts, region, country, theme,
                                      era, era_start, era_end, related_place_slugs, related_story_slugs,
                                      seo_title, seo_description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
                         ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, ?32)",
                params![
                    id_str,
                    story.slug,
                    story.title,
                    story.subtitle,
                    story.category,
                    story.source_type,
                    story.hero_image,
                    story.mj_prompt,
                    story.hero_caption,
                    story.excerpt,
                    story.body,
                    story.read_time,
                    story.year,
                    story.text_by,
                    story.images_by,
                    story.sources,
                    story.tags,
                    story.published,
                    story.featured,
                    story.sort_order,
                    story.the_facts,
                    story.region,
                    story.country,
                    story.theme,
                    story.era,
                    story.era_start,
                    story.era_end,
                    story.related_place_slugs,
                    story.related_story_slugs,
                    story.seo_title,
                    story.seo_description,
                    timestamp,
                ],
            )?;
            Ok(())
        })
        .await?;
        Ok(id)
    }
}

fn select_quote(conn: &Connection, quote_id: &str) -> Result<Option<Quote>, StoreError> {
    let quote = conn
        .query_row(
            "SELECT * FROM quotes WHERE quote_id = ?1",
            params![quote_id],
            quote_from_row,
        )
        .optional()?;
    Ok(quote)
}

fn select_proposal(conn: &Connection, proposal_id: &str) -> Result<Option<Proposal>, StoreError> {
    let proposal = conn
        .query_row(
            "SELECT * FROM proposals WHERE proposal_id = ?1",
            params![proposal_id],
            proposal_from_row,
        )
        .optional()?;
    Ok(proposal)
}

fn quote_from_row(row: &Row<'_>) -> rusqlite::Result<Quote> {
    Ok(Quote {
        quote_id: row.get("quote_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        country: row.get("country")?,
        travel_dates: row.get("travel_dates")?,
        flexibility: row.get("flexibility")?,
        group_size: row.get("group_size")?,
        interests: row.get("interests")?,
        accommodation_style: row.get("accommodation_style")?,
        pace: row.get("pace")?,
        budget: row.get("budget")?,
        notes: row.get("notes")?,
        status: row.get("status")?,
        created_at: row.get("created_at")?,
    })
}

fn proposal_from_row(row: &Row<'_>) -> rusqlite::Result<Proposal> {
    let route_points: Option<String> = row.get("route_points")?;
    let days_list: Option<String> = row.get("days_list")?;
    Ok(Proposal {
        proposal_id: row.get("proposal_id")?,
        client_id: row.get("client_id")?,
        client_name: row.get("client_name")?,
        country: row.get("country")?,
        hero_image_url: row.get("hero_image_url")?,
        hero_title: row.get("hero_title")?,
        hero_blurb: row.get("hero_blurb")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        days: row.get("days")?,
        nights: row.get("nights")?,
        num_guests: row.get("num_guests")?,
        total_price: row.get("total_price")?,
        formatted_price: row.get("formatted_price")?,
        route_points: parse_json_column("route_points", route_points.as_deref()),
        days_list: parse_json_column("days_list", days_list.as_deref()),
        created_at: row.get("created_at")?,
    })
}

fn parse_json_column(column: &str, raw: Option<&str>) -> Option<serde_json::Value> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(column, error = %e, "Ignoring unparsable JSON column");
            None
        }
    }
}
