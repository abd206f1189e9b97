//! Local server with view-time behaviors
//!
//! Serves the generated site and implements the two dynamic pieces the
//! static output cannot cover: the listing's "load more" action and
//! on-demand generation of post pages that were not pre-built.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

use crate::cms::{CmsError, DocumentService};
use crate::generator::Generator;
use crate::listing::{ListingEntry, ListingSession};
use crate::Blog;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    generator: Generator,
    service: Arc<dyn DocumentService>,
    /// View-time listing state; the mutex serializes "load more" so pages
    /// cannot be appended out of order.
    session: Mutex<ListingSession>,
    /// Uids currently being regenerated
    in_flight: StdMutex<HashSet<String>>,
    /// Uids the service reported as not found
    missing: StdMutex<HashSet<String>>,
}

/// Start the local server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let service: Arc<dyn DocumentService> = Arc::new(blog.service());
    let generator = Generator::new(blog)?;
    let session = ListingSession::start(service.as_ref(), &blog.config.language)?;

    let state = Arc::new(ServerState {
        public_dir: blog.public_dir.clone(),
        generator,
        service,
        session: Mutex::new(session),
        in_flight: StdMutex::new(HashSet::new()),
        missing: StdMutex::new(HashSet::new()),
    });

    let app = Router::new()
        .route("/api/load-more", post(load_more_handler))
        .route("/post/:uid", get(post_handler))
        .route("/post/:uid/", get(post_handler))
        .fallback(fallback_handler)
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Response body of the load-more endpoint
#[derive(Serialize)]
struct LoadMoreResponse {
    /// Newly appended posts, in fetch order
    posts: Vec<ListingEntry>,
    /// Whether another page remains
    has_more: bool,
}

/// Fetch the next listing page into the shared session
async fn load_more_handler(State(state): State<Arc<ServerState>>) -> Response {
    let mut session = state.session.lock().await;

    let result =
        tokio::task::block_in_place(|| session.load_more(state.service.as_ref()).map(Vec::from));

    match result {
        Ok(posts) => {
            let has_more = session.can_load_more();
            Json(LoadMoreResponse { posts, has_more }).into_response()
        }
        Err(e) => {
            tracing::error!("load more failed: {:#}", e);
            (StatusCode::BAD_GATEWAY, format!("{:#}", e)).into_response()
        }
    }
}

/// Serve a post page, generating it on demand when missing
async fn post_handler(
    Path(uid): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    if uid.contains('/') || uid.contains('\\') || uid.contains("..") {
        return not_found_response(&state);
    }

    // Already generated: serve from disk.
    let file_path = state
        .public_dir
        .join("post")
        .join(&uid)
        .join("index.html");
    if let Ok(content) = tokio::fs::read_to_string(&file_path).await {
        return Html(content).into_response();
    }

    // Known to be absent from the service: a real 404, not a placeholder.
    if state.missing.lock().unwrap().contains(&uid) {
        return not_found_response(&state);
    }

    // Not yet generated: kick off regeneration unless one is already
    // running for this uid, and answer with the transient placeholder.
    let started = state.in_flight.lock().unwrap().insert(uid.clone());
    if started {
        let state = Arc::clone(&state);
        let uid = uid.clone();
        tokio::task::spawn_blocking(move || {
            let result = state
                .generator
                .generate_post_page(state.service.as_ref(), &uid);
            match result {
                Ok(()) => tracing::info!("Generated post {} on demand", uid),
                Err(e) => {
                    if matches!(
                        e.downcast_ref::<CmsError>(),
                        Some(CmsError::NotFound { .. })
                    ) {
                        tracing::warn!("Post {} not found in content service", uid);
                        state.missing.lock().unwrap().insert(uid.clone());
                    } else {
                        tracing::error!("On-demand generation of {} failed: {:#}", uid, e);
                    }
                }
            }
            state.in_flight.lock().unwrap().remove(&uid);
        });
    }

    match state.generator.render_loading() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render placeholder: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Build the not-found response
fn not_found_response(state: &ServerState) -> Response {
    match state.generator.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Serve static files from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}
