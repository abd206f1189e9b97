//! Locale tables for date formatting
//!
//! Month abbreviations as they appear in localized dates ("abr" for April
//! in pt-BR). Unknown locales fall back to English.

/// Abbreviated month names, January first.
type MonthTable = [&'static str; 12];

const MONTHS_EN: MonthTable = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_PT: MonthTable = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const MONTHS_ES: MonthTable = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Abbreviated month name for a 1-based month number in the given locale.
///
/// The locale tag is matched on its primary subtag, so "pt-BR" and "pt"
/// share a table.
pub fn month_abbrev(locale: &str, month: u32) -> &'static str {
    let subtag = primary_subtag(locale);
    let table = if subtag.eq_ignore_ascii_case("pt") {
        &MONTHS_PT
    } else if subtag.eq_ignore_ascii_case("es") {
        &MONTHS_ES
    } else {
        &MONTHS_EN
    };

    // chrono months are 1-based and always in range
    table[(month.saturating_sub(1) as usize).min(11)]
}

/// Primary language subtag ("pt-BR" -> "pt").
fn primary_subtag(locale: &str) -> &str {
    let end = locale
        .find(['-', '_'])
        .unwrap_or(locale.len());
    &locale[..end]
}
