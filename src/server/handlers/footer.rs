//! Site footer assembled from settings, footer links and legal data.
//!
//! Each part loads independently. A failing part is logged and replaced by
//! its defaults so the footer always renders.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use axum::extract::State;
use axum::Json;
use chrono::Datelike;
use regex::Regex;

use crate::config::SiteConfig;
use crate::server::api::{
    ContactLink, FooterColumn, FooterColumnLink, FooterResponse, LegalLink, NewsletterConfig,
};
use crate::server::state::AppState;
use crate::store::{FooterLegal, FooterLink};

const DEFAULT_NEWSLETTER_TITLE: &str = "Notes from Morocco";
const DEFAULT_NEWSLETTER_DESCRIPTION: &str = "Quiet. Irregular. Real.";

static DRIVE_FILE_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").ok());
static DRIVE_OPEN_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").ok());

/// Rewrite a Google Drive share link into a direct thumbnail URL.
/// Other URLs are returned unchanged.
#[must_use]
pub fn drive_thumbnail_url(url: &str) -> String {
    if !url.contains("drive.google.com") {
        return url.to_string();
    }

    let capture = |re: Option<&Regex>| {
        re.and_then(|re| re.captures(url))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };
    // `?id=` wins over `/file/d/` when both are present.
    match capture(DRIVE_OPEN_ID.as_ref()).or_else(|| capture(DRIVE_FILE_ID.as_ref())) {
        Some(id) => format!("https://drive.google.com/thumbnail?id={id}&sz=w1920"),
        None => url.to_string(),
    }
}

fn newsletter(settings: &HashMap<String, String>, site: &SiteConfig) -> NewsletterConfig {
    let text = |key: &str, default: &str| {
        settings
            .get(key)
            .filter(|v| !v.is_empty())
            .map_or_else(|| default.to_string(), Clone::clone)
    };
    NewsletterConfig {
        show: settings.get("newsletter_show").map(String::as_str) != Some("false"),
        background_image: settings
            .get("newsletter_background_image")
            .map(|url| drive_thumbnail_url(url))
            .unwrap_or_default(),
        title: text("newsletter_title", DEFAULT_NEWSLETTER_TITLE),
        description: text("newsletter_description", DEFAULT_NEWSLETTER_DESCRIPTION),
        brand_name: text("brand_name", &site.brand_name),
    }
}

fn contact_links(settings: &HashMap<String, String>) -> Vec<ContactLink> {
    let value = |key: &str| settings.get(key).filter(|v| !v.is_empty());
    let mut links = Vec::new();

    if let Some(email) = value("contact_email") {
        links.push(ContactLink {
            platform: "email".to_string(),
            url: format!("mailto:{email}"),
            label: email.clone(),
        });
    }
    if let Some(number) = value("contact_whatsapp") {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        links.push(ContactLink {
            platform: "whatsapp".to_string(),
            url: format!("https://wa.me/{digits}"),
            label: number.clone(),
        });
    }
    if let Some(handle) = value("contact_instagram") {
        let url = if handle.starts_with("http") {
            handle.clone()
        } else {
            format!("https://instagram.com/{}", handle.replacen('@', "", 1))
        };
        links.push(ContactLink {
            platform: "instagram".to_string(),
            url,
            label: handle.clone(),
        });
    }
    links
}

/// Group links into columns ordered by column number. A column takes the
/// title of its first link.
fn columns(links: Vec<FooterLink>) -> Vec<FooterColumn> {
    let mut grouped: BTreeMap<i64, FooterColumn> = BTreeMap::new();
    for link in links {
        let number = if link.column_number == 0 {
            1
        } else {
            link.column_number
        };
        let column = grouped.entry(number).or_insert_with(|| FooterColumn {
            title: link.column_title.clone(),
            links: Vec::new(),
        });
        column.links.push(FooterColumnLink {
            label: link.link_label,
            href: link.link_href,
            link_type: if link.link_type.is_empty() {
                "link".to_string()
            } else {
                link.link_type
            },
        });
    }
    grouped.into_values().collect()
}

/// Legal links and copyright line, with `{year}` replaced by the current year.
fn legal(row: Option<FooterLegal>, site: &SiteConfig, year: i32) -> (Vec<LegalLink>, String) {
    let default_copyright = format!("© {year} {}", site.brand_name);
    let Some(row) = row else {
        return (Vec::new(), default_copyright);
    };

    let links: Vec<LegalLink> = match row.legal_links.as_deref().filter(|l| !l.is_empty()) {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::warn!(site_id = %row.site_id, error = %e, "Invalid legal_links JSON");
            Vec::new()
        }),
        None => Vec::new(),
    };
    let copyright = row
        .copyright_text
        .filter(|t| !t.is_empty())
        .map_or(default_copyright, |t| t.replacen("{year}", &year.to_string(), 1));
    (links, copyright)
}

/// GET /api/footer - Newsletter block, link columns, contact and legal links.
pub async fn get_footer(State(state): State<AppState>) -> Json<FooterResponse> {
    let site = state.site.as_ref();

    let settings: HashMap<String, String> = match state.store.list_settings().await {
        Ok(rows) => rows
            .into_iter()
            .map(|s| (s.key, s.value.unwrap_or_default()))
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch footer settings");
            HashMap::new()
        }
    };

    let links = state.store.list_footer_links().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to fetch footer links");
        Vec::new()
    });

    let legal_row = state
        .store
        .footer_legal(&site.site_id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, site_id = %site.site_id, "Failed to fetch footer legal data");
            None
        });
    let (legal, copyright) = legal(legal_row, site, chrono::Utc::now().year());

    Json(FooterResponse {
        newsletter: newsletter(&settings, site),
        columns: columns(links),
        contact: contact_links(&settings),
        legal,
        copyright,
    })
}
