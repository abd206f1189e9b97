//! List posts known to the content service

use anyhow::Result;

use crate::cms::DocumentService;
use crate::content::PostSummary;
use crate::helpers;
use crate::listing::{LISTING_FIELDS, LISTING_TYPE};
use crate::Blog;

/// Print every post summary, following pagination to exhaustion
pub fn run(blog: &Blog, service: &dyn DocumentService) -> Result<()> {
    let locale = &blog.config.language;
    let mut cursor: Option<String> = None;
    let mut total = 0usize;

    loop {
        let page = service.query_by_type(LISTING_TYPE, LISTING_FIELDS, cursor.as_deref())?;

        for raw in page.results {
            let summary = PostSummary::from_raw(raw);
            let date = match summary.first_publication_date.as_deref() {
                Some(iso) => helpers::format_date(iso, locale)?,
                None => "-".to_string(),
            };
            println!("{:<12} {:<30} {}", date, summary.uid, summary.title);
            total += 1;
        }

        match page.next_page {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    println!("\n{} posts", total);
    Ok(())
}
