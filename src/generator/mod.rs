//! Generator module - renders the listing and post pages to static HTML

use anyhow::{bail, Context as _, Result};
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::cms::DocumentService;
use crate::content::PostDetail;
use crate::helpers;
use crate::listing::{ListingSession, LISTING_FIELDS};
use crate::templates::{ListingData, PostPageData, SectionData, SiteData, TemplateRenderer};
use crate::Blog;

/// Document type used when enumerating posts for detail pages.
/// The hosted schema names the type "post" in bulk queries and "posts" in
/// single-document lookups.
const ENUMERATE_TYPE: &str = "post";

/// Document type used for single-document lookups
const DETAIL_TYPE: &str = "posts";

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, service: &dyn DocumentService) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.blog.public_dir)?;

        // Copy assets (logo, stylesheets)
        self.copy_assets()?;

        // Listing page: first page of summaries plus the next-page cursor
        let session = ListingSession::start(service, &self.blog.config.language)?;
        self.generate_listing_page(&session)?;

        // Detail pages: one per document uid
        let uids = self.enumerate_uids(service)?;
        tracing::info!("Generating {} post pages", uids.len());

        let mut failed = 0usize;
        for uid in &uids {
            if let Err(e) = self.generate_post_page(service, uid) {
                // A failed page aborts only that page; the rest continue.
                tracing::error!("Failed to generate post {}: {:#}", uid, e);
                failed += 1;
            }
        }

        if failed > 0 {
            bail!("{} of {} post pages failed to generate", failed, uids.len());
        }

        Ok(())
    }

    /// Create a base context with common variables
    fn base_context(&self, page_title: &str) -> Context {
        let mut context = Context::new();
        context.insert("page_title", page_title);
        context.insert(
            "site",
            &SiteData {
                title: self.blog.config.title.clone(),
                description: self.blog.config.description.clone(),
                root: self.blog.config.root.clone(),
            },
        );
        context
    }

    /// Generate the listing page from a session's current state
    pub fn generate_listing_page(&self, session: &ListingSession) -> Result<()> {
        let mut context = self.base_context(&self.blog.config.title);
        context.insert(
            "listing",
            &ListingData {
                posts: session.entries().to_vec(),
                next_page: session.next_page().map(str::to_owned),
            },
        );

        let html = self.renderer.render("index.html", &context)?;

        let output_path = self.blog.public_dir.join("index.html");
        fs::write(&output_path, html)
            .with_context(|| format!("writing {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Enumerate every post uid, following pagination cursors to exhaustion
    pub fn enumerate_uids(&self, service: &dyn DocumentService) -> Result<Vec<String>> {
        let mut uids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = service
                .query_by_type(ENUMERATE_TYPE, LISTING_FIELDS, cursor.as_deref())
                .context("enumerating post uids")?;

            uids.extend(
                page.results
                    .into_iter()
                    .filter_map(|doc| doc.uid)
                    .filter(|uid| !uid.is_empty()),
            );

            match page.next_page {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(uids)
    }

    /// Fetch one post and generate its detail page
    pub fn generate_post_page(&self, service: &dyn DocumentService, uid: &str) -> Result<()> {
        let raw = service.get_by_uid(DETAIL_TYPE, uid)?;
        let detail = PostDetail::from_raw(raw);
        let html = self.render_post(&detail)?;

        let output_path = self
            .blog
            .public_dir
            .join("post")
            .join(uid)
            .join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {:?}", parent))?;
        }
        fs::write(&output_path, &html)
            .with_context(|| format!("writing {:?}", output_path))?;
        tracing::debug!("Generated post: {:?}", output_path);

        Ok(())
    }

    /// Render a post detail page to HTML
    pub fn render_post(&self, detail: &PostDetail) -> Result<String> {
        let locale = &self.blog.config.language;

        let date = detail
            .first_publication_date
            .as_deref()
            .map(|iso| helpers::format_date(iso, locale))
            .transpose()
            .with_context(|| format!("post {}", detail.uid))?;

        let sections = detail
            .sections
            .iter()
            .map(|section| SectionData {
                // Tera autoescapes the heading; only body_html is
                // pre-rendered and marked safe.
                heading: section.heading.clone(),
                body_html: section
                    .body
                    .iter()
                    .map(helpers::render_body_block)
                    .collect::<Vec<_>>()
                    .concat(),
            })
            .collect();

        let page_title = format!("{} | {}", detail.title, self.blog.config.title);
        let mut context = self.base_context(&page_title);
        context.insert(
            "post",
            &PostPageData {
                uid: detail.uid.clone(),
                title: detail.title.clone(),
                subtitle: detail.subtitle.clone(),
                author: detail.author.clone(),
                date,
                banner_url: detail.banner_url.clone(),
                reading_minutes: helpers::reading_time(&detail.sections),
                sections,
            },
        );

        self.renderer.render("post.html", &context)
    }

    /// Render the transient placeholder shown while a page is generated
    pub fn render_loading(&self) -> Result<String> {
        let context = self.base_context(&self.blog.config.title);
        self.renderer.render("loading.html", &context)
    }

    /// Render the not-found page
    pub fn render_not_found(&self) -> Result<String> {
        let context = self.base_context(&self.blog.config.title);
        self.renderer.render("not_found.html", &context)
    }

    /// Copy assets (logo, stylesheets) to the public directory
    fn copy_assets(&self) -> Result<()> {
        let assets_dir = &self.blog.assets_dir;
        if !assets_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(assets_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(assets_dir)?;
                let dest = self.blog.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}
