//! HTTP server
//!
//! Well-known endpoints are routed explicitly. Everything else goes through
//! the page handler: public assets first, then the trailing-slash redirect,
//! then the content resolver.

mod well_known;

pub use well_known::{ai_txt_body, devtools_body, AI_TXT_PATH, DEVTOOLS_PATH};

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::PageMapEntry;
use crate::render::{render_document, render_not_found};
use crate::resolver::{ContentResolver, ResolutionOutcome, RoutePath};
use crate::Site;

/// Shared server state
pub struct AppState {
    pub site: Site,
    pub resolver: ContentResolver,
}

/// Build the application router for a site
pub fn router(site: Site) -> Router {
    let state = Arc::new(AppState {
        resolver: site.resolver(),
        site,
    });

    Router::new()
        .route(AI_TXT_PATH, get(well_known::ai_txt))
        .route(DEVTOOLS_PATH, get(well_known::devtools))
        .fallback(page_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(site: Site, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let app = router(site);

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn page_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response();
    }

    let route = RoutePath::from_uri_path(request.uri().path());

    if let Some(file) = public_file(&state.site.public_dir, &route).await {
        tracing::debug!("Serving static file {:?}", file);
        let mut service = ServeDir::new(&state.site.public_dir);
        return match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(e) => {
                tracing::error!("Failed to serve {:?}: {}", file, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        };
    }

    if let Some(target) = trailing_slash_target(state.site.config.trailing_slash, &request) {
        return Redirect::permanent(&target).into_response();
    }

    render_route(&state, &route).await
}

/// Resolve a route and render the matching view
async fn render_route(state: &AppState, route: &RoutePath) -> Response {
    let config = &state.site.config;
    let resolution = state.resolver.resolve(route).await;

    match resolution.outcome {
        ResolutionOutcome::Found {
            document,
            toc,
            metadata,
        } => {
            let nav = navigation(&state.resolver).await;
            Html(render_document(config, &document, &toc, &metadata, &nav)).into_response()
        }
        ResolutionOutcome::NotFound { metadata } => (
            StatusCode::NOT_FOUND,
            Html(render_not_found(config, &metadata)),
        )
            .into_response(),
    }
}

/// Sidebar entries; a failed scan leaves the sidebar empty
async fn navigation(resolver: &ContentResolver) -> Vec<PageMapEntry> {
    match resolver.store().page_map().await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!("Failed to build navigation: {}", e);
            Vec::new()
        }
    }
}

/// Path of an existing file under `public_dir` matching the route
async fn public_file(public_dir: &std::path::Path, route: &RoutePath) -> Option<PathBuf> {
    if route.is_root() || !route.is_well_formed() {
        return None;
    }

    let path = route
        .segments()
        .iter()
        .fold(public_dir.to_path_buf(), |path, segment| path.join(segment));

    match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Some(path),
        _ => None,
    }
}

/// Redirect target adding the missing trailing slash, query preserved
///
/// Paths whose last segment looks like a file name are left alone. The
/// target is rebuilt from the non-empty segments so it is always a
/// same-origin path starting with a single `/`.
fn trailing_slash_target(trailing_slash: bool, request: &Request<Body>) -> Option<String> {
    let path = request.uri().path();
    if !trailing_slash || path.ends_with('/') {
        return None;
    }

    let last = path.rsplit('/').next().unwrap_or_default();
    if last.contains('.') {
        return None;
    }

    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace('\\', "%5C"))
        .collect();
    let target = format!("/{}/", segments.join("/"));

    Some(match request.uri().query() {
        Some(query) => format!("{}?{}", target, query),
        None => target,
    })
}
