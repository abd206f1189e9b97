//! Post models
//!
//! The summary form drives the listing page; the detail form drives the
//! per-post pages. Both are produced from raw service documents here and
//! nowhere else.

use serde::{Deserialize, Serialize};

use crate::cms::types::{RawDocument, RawSection};

/// A post as it appears in the listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique identifier within the service
    pub uid: String,

    /// First publication timestamp (ISO string), absent for unpublished previews
    pub first_publication_date: Option<String>,

    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Post author
    pub author: String,
}

impl PostSummary {
    /// Build a summary from a raw service document
    pub fn from_raw(raw: RawDocument) -> Self {
        Self {
            uid: raw.uid.unwrap_or_default(),
            first_publication_date: raw.first_publication_date,
            title: raw.data.title,
            subtitle: raw.data.subtitle,
            author: raw.data.author,
        }
    }
}

/// A full post with banner and content sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    /// Unique identifier within the service
    pub uid: String,

    /// First publication timestamp (ISO string)
    pub first_publication_date: Option<String>,

    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Post author
    pub author: String,

    /// Banner image, reduced to its URL
    pub banner_url: String,

    /// Content sections in source order
    pub sections: Vec<Section>,
}

impl PostDetail {
    /// Build a detail from a raw service document.
    ///
    /// The banner is reduced to its URL and every section body is copied
    /// into owned blocks, so nothing here aliases the raw response.
    pub fn from_raw(raw: RawDocument) -> Self {
        Self {
            uid: raw.uid.unwrap_or_default(),
            first_publication_date: raw.first_publication_date,
            title: raw.data.title,
            subtitle: raw.data.subtitle,
            author: raw.data.author,
            banner_url: raw.data.banner.map(|b| b.url).unwrap_or_default(),
            sections: raw.data.content.into_iter().map(Section::from_raw).collect(),
        }
    }
}

/// A content section: heading plus ordered body blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub heading: String,

    /// Body blocks in source order
    pub body: Vec<BodyBlock>,
}

impl Section {
    fn from_raw(raw: RawSection) -> Self {
        Self {
            heading: raw.heading,
            body: raw
                .body
                .into_iter()
                .map(|b| BodyBlock {
                    text: b.text,
                    kind: b.kind,
                    spans: b
                        .spans
                        .into_iter()
                        .map(|s| SpanAnnotation {
                            start: s.start,
                            end: s.end,
                            kind: s.kind,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// A body block: plain text plus a type tag and inline annotations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyBlock {
    /// Block text
    pub text: String,

    /// Type tag ("list-item" renders as a list, anything else as a paragraph)
    pub kind: String,

    /// Inline span annotations, order-preserved and independently owned
    pub spans: Vec<SpanAnnotation>,
}

/// An inline text-span annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanAnnotation {
    pub start: usize,
    pub end: usize,
    pub kind: String,
}
