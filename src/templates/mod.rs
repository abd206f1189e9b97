//! Built-in theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; the generated site
//! needs no template files on disk.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::listing::ListingEntry;

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("loading.html", include_str!("theme/loading.html")),
            ("not_found.html", include_str!("theme/not_found.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("theme/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("theme/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("theme/partials/footer.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub root: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingData {
    /// Posts fetched so far, in fetch order
    pub posts: Vec<ListingEntry>,
    /// Next-page cursor; the "load more" control renders only when present
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Localized display date, absent when the post has no timestamp
    pub date: Option<String>,
    pub banner_url: String,
    /// Estimated reading time in minutes
    pub reading_minutes: usize,
    pub sections: Vec<SectionData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    /// Pre-rendered, pre-escaped body HTML
    pub body_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_index_renders_load_more_only_with_cursor() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert("page_title", "spacetraveling");
        context.insert(
            "site",
            &SiteData {
                title: "spacetraveling".to_string(),
                description: String::new(),
                root: "/".to_string(),
            },
        );
        context.insert(
            "listing",
            &ListingData {
                posts: Vec::new(),
                next_page: Some("https://api.example.com/page/2".to_string()),
            },
        );

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("Carregar mais posts"));

        context.insert(
            "listing",
            &ListingData {
                posts: Vec::new(),
                next_page: None,
            },
        );
        let html = renderer.render("index.html", &context).unwrap();
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_post_renders_sections_and_reading_time() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert("page_title", "First post | spacetraveling");
        context.insert(
            "site",
            &SiteData {
                title: "spacetraveling".to_string(),
                description: String::new(),
                root: "/".to_string(),
            },
        );
        context.insert(
            "post",
            &PostPageData {
                uid: "first-post".to_string(),
                title: "First post".to_string(),
                subtitle: "sub".to_string(),
                author: "Ana".to_string(),
                date: Some("19 abr 2021".to_string()),
                banner_url: "https://images.example.com/banner.png".to_string(),
                reading_minutes: 4,
                sections: vec![SectionData {
                    heading: "Intro".to_string(),
                    body_html: "<p>hello</p><ul><li>item</li></ul>".to_string(),
                }],
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("4 min"));
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains("<ul><li>item</li></ul>"));
        assert!(html.contains("19 abr 2021"));
    }
}
