//! Listing session state
//!
//! The listing page is an ordered list of post summaries plus the current
//! pagination cursor. The state lives in an explicit session object; "load
//! more" is its only mutation and appends one fetched page at a time.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cms::DocumentService;
use crate::content::PostSummary;
use crate::helpers;

/// Document type used for listing queries
pub const LISTING_TYPE: &str = "posts";

/// Fields requested for listing queries; post content is deliberately
/// omitted since the listing never shows it.
pub const LISTING_FIELDS: &[&str] = &["posts.title", "posts.subtitle", "posts.author"];

/// A post summary with its display-formatted date
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Localized display date; absent when the post has no timestamp
    pub date: Option<String>,
}

impl ListingEntry {
    /// Format a summary for display. A missing timestamp is allowed, an
    /// unparseable one is not.
    fn from_summary(summary: PostSummary, locale: &str) -> Result<Self> {
        let date = summary
            .first_publication_date
            .as_deref()
            .map(|iso| helpers::format_date(iso, locale))
            .transpose()
            .with_context(|| format!("post {}", summary.uid))?;

        Ok(Self {
            uid: summary.uid,
            title: summary.title,
            subtitle: summary.subtitle,
            author: summary.author,
            date,
        })
    }
}

/// Session-scoped listing state
#[derive(Debug, Clone, Serialize)]
pub struct ListingSession {
    locale: String,
    entries: Vec<ListingEntry>,
    next_page: Option<String>,
}

impl ListingSession {
    /// Start a session from the first page of the listing query
    pub fn start(service: &dyn DocumentService, locale: &str) -> Result<Self> {
        let page = service
            .query_by_type(LISTING_TYPE, LISTING_FIELDS, None)
            .context("fetching first listing page")?;

        let entries = page
            .results
            .into_iter()
            .map(|raw| ListingEntry::from_summary(PostSummary::from_raw(raw), locale))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            locale: locale.to_string(),
            entries,
            next_page: page.next_page,
        })
    }

    /// Entries accumulated so far, in fetch order
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    /// Current pagination cursor
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Whether the "load more" control should be offered
    pub fn can_load_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Fetch the page at the current cursor and append its results.
    ///
    /// Results are appended in fetch order without de-duplication and the
    /// cursor is replaced by the new value, which may be empty and thereby
    /// disable further loads. On failure the error propagates and the
    /// session is left unchanged. Overlapping invocations are ruled out by
    /// the `&mut self` receiver; async callers must serialize access.
    ///
    /// Returns the newly appended entries.
    pub fn load_more(&mut self, service: &dyn DocumentService) -> Result<&[ListingEntry]> {
        let Some(cursor) = self.next_page.clone() else {
            tracing::debug!("load_more called with exhausted cursor");
            return Ok(&[]);
        };

        let page = service
            .query_by_type(LISTING_TYPE, LISTING_FIELDS, Some(&cursor))
            .context("fetching next listing page")?;

        let new_entries = page
            .results
            .into_iter()
            .map(|raw| ListingEntry::from_summary(PostSummary::from_raw(raw), &self.locale))
            .collect::<Result<Vec<_>>>()?;

        // Only mutate once the whole page has been fetched and formatted.
        let appended_at = self.entries.len();
        self.entries.extend(new_entries);
        self.next_page = page.next_page;

        Ok(&self.entries[appended_at..])
    }
}
