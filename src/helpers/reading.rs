//! Reading-time estimation

use crate::content::Section;

/// Assumed reading speed in words per minute
const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time in minutes for a post's content sections.
///
/// Each section is rounded up to whole minutes on its own and the rounded
/// values are summed. Rounding per section (instead of once over the total
/// word count) overestimates slightly but is the published behavior of the
/// blog and is kept as-is.
pub fn reading_time(sections: &[Section]) -> usize {
    sections.iter().map(section_minutes).sum()
}

/// Whole minutes for a single section.
fn section_minutes(section: &Section) -> usize {
    let text = section
        .body
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    // Words are approximated by splitting on single spaces, so an empty
    // section still counts one "word".
    let words = text.split(' ').count();
    words.div_ceil(WORDS_PER_MINUTE)
}
