//! Content service integration
//!
//! The blog is backed by a hosted headless content service reached through
//! two read operations: a paginated query by document type and a single
//! document lookup by uid. Raw response shapes live in [`types`] and are
//! transformed into the typed content model at the boundary.

mod client;
mod error;
pub mod types;

pub use client::{DocumentService, HttpDocumentService};
pub use error::CmsError;
