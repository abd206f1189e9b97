//! End-to-end generation tests against an in-memory content service

use spaceblog::cms::types::{QueryResponse, RawBlock, RawData, RawDocument, RawImage, RawSection};
use spaceblog::cms::{CmsError, DocumentService};
use spaceblog::generator::Generator;
use spaceblog::Blog;

/// In-memory content service with a fixed set of posts, split into pages
/// of two. Cursors are "page:<n>" tokens.
struct FakeService {
    posts: Vec<RawDocument>,
    /// Uids that fail with a non-404 error on lookup
    broken: Vec<String>,
}

impl FakeService {
    fn new(posts: Vec<RawDocument>) -> Self {
        Self {
            posts,
            broken: Vec::new(),
        }
    }
}

impl DocumentService for FakeService {
    fn query_by_type(
        &self,
        _doc_type: &str,
        _fields: &[&str],
        cursor: Option<&str>,
    ) -> Result<QueryResponse, CmsError> {
        let index: usize = match cursor {
            Some(token) => token.trim_start_matches("page:").parse().unwrap(),
            None => 0,
        };

        let pages: Vec<&[RawDocument]> = self.posts.chunks(2).collect();
        let results = pages.get(index).copied().unwrap_or(&[]).to_vec();
        let next_page = if index + 1 < pages.len() {
            Some(format!("page:{}", index + 1))
        } else {
            None
        };

        Ok(QueryResponse { next_page, results })
    }

    fn get_by_uid(&self, _doc_type: &str, uid: &str) -> Result<RawDocument, CmsError> {
        if self.broken.iter().any(|b| b == uid) {
            return Err(CmsError::HttpResponse {
                status: 500,
                body: "boom".to_string(),
            });
        }
        self.posts
            .iter()
            .find(|p| p.uid.as_deref() == Some(uid))
            .cloned()
            .ok_or_else(|| CmsError::NotFound {
                uid: uid.to_string(),
            })
    }
}

fn paragraph(words: usize) -> RawBlock {
    RawBlock {
        text: vec!["palavra"; words].join(" "),
        kind: "paragraph".to_string(),
        spans: Vec::new(),
    }
}

fn post(uid: &str, title: &str, section_words: &[usize]) -> RawDocument {
    RawDocument {
        uid: Some(uid.to_string()),
        first_publication_date: Some("2021-04-19T10:30:00+0000".to_string()),
        data: RawData {
            title: title.to_string(),
            subtitle: "subtitle".to_string(),
            author: "Ana".to_string(),
            banner: Some(RawImage {
                url: "https://images.example.com/banner.png".to_string(),
            }),
            content: section_words
                .iter()
                .map(|words| RawSection {
                    heading: "Heading".to_string(),
                    body: vec![paragraph(*words)],
                })
                .collect(),
        },
    }
}

fn blog_in(dir: &std::path::Path) -> Blog {
    Blog::new(dir).unwrap()
}

#[test]
fn test_generate_writes_listing_and_post_pages() {
    let dir = tempfile::tempdir().unwrap();
    let blog = blog_in(dir.path());

    let service = FakeService::new(vec![
        post("first", "First post", &[10]),
        post("second", "Second post", &[200, 1, 1]),
        post("third", "Third post", &[]),
    ]);

    Generator::new(&blog).unwrap().generate(&service).unwrap();

    let index = std::fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
    // First page only (page size 2), with the load-more control since a
    // cursor remains.
    assert!(index.contains("First post"));
    assert!(index.contains("Second post"));
    assert!(!index.contains("Third post"));
    assert!(index.contains("Carregar mais posts"));
    assert!(index.contains("19 abr 2021"));

    for uid in ["first", "second", "third"] {
        assert!(blog
            .public_dir
            .join("post")
            .join(uid)
            .join("index.html")
            .exists());
    }

    // Per-section rounding: 200 + 1 + 1 words is three minutes.
    let second = std::fs::read_to_string(
        blog.public_dir.join("post").join("second").join("index.html"),
    )
    .unwrap();
    assert!(second.contains("3 min"));
    assert!(second.contains("https://images.example.com/banner.png"));

    // Zero sections still renders, with zero minutes.
    let third =
        std::fs::read_to_string(blog.public_dir.join("post").join("third").join("index.html"))
            .unwrap();
    assert!(third.contains("0 min"));
}

#[test]
fn test_listing_without_cursor_has_no_load_more() {
    let dir = tempfile::tempdir().unwrap();
    let blog = blog_in(dir.path());

    let service = FakeService::new(vec![post("only", "Only post", &[10])]);
    Generator::new(&blog).unwrap().generate(&service).unwrap();

    let index = std::fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
    assert!(index.contains("Only post"));
    assert!(!index.contains("Carregar mais posts"));
}

#[test]
fn test_failed_post_aborts_only_that_page() {
    let dir = tempfile::tempdir().unwrap();
    let blog = blog_in(dir.path());

    let mut service = FakeService::new(vec![
        post("good", "Good post", &[10]),
        post("bad", "Bad post", &[10]),
    ]);
    service.broken.push("bad".to_string());

    let err = Generator::new(&blog)
        .unwrap()
        .generate(&service)
        .unwrap_err();
    assert!(err.to_string().contains("1 of 2"));

    // The healthy page was still generated; the broken one was not.
    assert!(blog
        .public_dir
        .join("post")
        .join("good")
        .join("index.html")
        .exists());
    assert!(!blog.public_dir.join("post").join("bad").exists());
}

#[test]
fn test_get_by_uid_not_found() {
    let service = FakeService::new(vec![post("only", "Only post", &[1])]);
    let err = service.get_by_uid("posts", "missing").unwrap_err();
    assert!(matches!(err, CmsError::NotFound { ref uid } if uid == "missing"));
}

#[test]
fn test_list_items_render_in_own_containers() {
    let dir = tempfile::tempdir().unwrap();
    let blog = blog_in(dir.path());

    let mut doc = post("lists", "List post", &[]);
    doc.data.content = vec![RawSection {
        heading: "Items".to_string(),
        body: vec![
            RawBlock {
                text: "um".to_string(),
                kind: "list-item".to_string(),
                spans: Vec::new(),
            },
            RawBlock {
                text: "dois".to_string(),
                kind: "list-item".to_string(),
                spans: Vec::new(),
            },
            RawBlock {
                text: "texto".to_string(),
                kind: "paragraph".to_string(),
                spans: Vec::new(),
            },
        ],
    }];
    let service = FakeService::new(vec![doc]);

    Generator::new(&blog).unwrap().generate(&service).unwrap();

    let html = std::fs::read_to_string(
        blog.public_dir.join("post").join("lists").join("index.html"),
    )
    .unwrap();

    // Consecutive list items are deliberately not grouped: each one keeps
    // its own list container.
    assert!(html.contains("<ul><li>um</li></ul>"));
    assert!(html.contains("<ul><li>dois</li></ul>"));
    assert!(html.contains("<p>texto</p>"));
}

#[test]
fn test_enumerate_uids_follows_cursors() {
    let dir = tempfile::tempdir().unwrap();
    let blog = blog_in(dir.path());

    let service = FakeService::new(vec![
        post("a", "A", &[1]),
        post("b", "B", &[1]),
        post("c", "C", &[1]),
        post("d", "D", &[1]),
        post("e", "E", &[1]),
    ]);

    let uids = Generator::new(&blog)
        .unwrap()
        .enumerate_uids(&service)
        .unwrap();
    assert_eq!(uids, ["a", "b", "c", "d", "e"]);
}

#[test]
fn test_assets_are_copied() {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("assets").join("images");
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("logo.svg"), "<svg></svg>").unwrap();

    let blog = blog_in(dir.path());
    let service = FakeService::new(Vec::new());
    Generator::new(&blog).unwrap().generate(&service).unwrap();

    assert!(blog
        .public_dir
        .join("images")
        .join("logo.svg")
        .exists());
}

#[test]
fn test_unparseable_timestamp_fails_generation() {
    let dir = tempfile::tempdir().unwrap();
    let blog = blog_in(dir.path());

    let mut doc = post("weird", "Weird post", &[1]);
    doc.first_publication_date = Some("not-a-date".to_string());
    let service = FakeService::new(vec![doc]);

    // The listing formats dates too, so the build fails loudly instead of
    // emitting "Invalid Date".
    assert!(Generator::new(&blog).unwrap().generate(&service).is_err());
}
