//! Typed content model
//!
//! Post summaries and details as the rest of the crate sees them, built
//! from raw service responses at the boundary.

mod post;

pub use post::{BodyBlock, PostDetail, PostSummary, Section, SpanAnnotation};
