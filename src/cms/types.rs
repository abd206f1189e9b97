//! Raw response shapes of the content service.
//!
//! These structs mirror the service JSON exactly. Nothing outside the
//! service boundary consumes them; the generator and listing session map
//! them into the typed content model first.

use serde::Deserialize;

/// One page of a paginated query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Opaque URL of the next page; `None` when this is the last page.
    #[serde(default)]
    pub next_page: Option<String>,
    /// Documents in this page, in service order.
    #[serde(default)]
    pub results: Vec<RawDocument>,
}

/// A single document as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub data: RawData,
}

/// The `data` payload of a document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Option<RawImage>,
    pub content: Vec<RawSection>,
}

/// An image reference.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub url: String,
}

/// A content section: heading plus ordered body blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSection {
    pub heading: String,
    pub body: Vec<RawBlock>,
}

/// A body block with its type tag and inline span annotations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawBlock {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub spans: Vec<RawSpan>,
}

impl Default for RawBlock {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: "paragraph".to_string(),
            spans: Vec::new(),
        }
    }
}

/// An inline text-span annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
}
