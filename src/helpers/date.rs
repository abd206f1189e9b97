//! Date helper functions

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, NaiveDate};

use crate::i18n;

/// Format an ISO timestamp as a localized calendar date
///
/// The pattern is fixed: zero-padded day, abbreviated month in the given
/// locale, full year — e.g. "19 abr 2021" for pt-BR. An empty or
/// unparseable timestamp is a hard error; callers decide what to do with
/// posts that have no timestamp at all.
pub fn format_date(iso: &str, locale: &str) -> Result<String> {
    if iso.trim().is_empty() {
        bail!("empty timestamp");
    }

    let date = parse_iso_date(iso).with_context(|| format!("unparseable timestamp: {}", iso))?;
    let month = i18n::month_abbrev(locale, date.month());
    Ok(format!("{:02} {} {}", date.day(), month, date.year()))
}

/// Parse the calendar-date part of an ISO timestamp.
///
/// The service emits RFC 3339 timestamps but with a colon-less offset
/// ("+0000"), so both spellings are accepted, as is a bare date.
fn parse_iso_date(iso: &str) -> Result<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(dt.date_naive());
    }
    Ok(NaiveDate::parse_from_str(iso, "%Y-%m-%d")?)
}
