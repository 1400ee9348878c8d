//! Local HTTP server
//!
//! Serves the generated public directory plus a JSON API over the content
//! index. Every API request re-reads the content directory; there is no
//! cache, so responses always reflect the files on disk.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{search, IndexError};
use crate::helpers::url;
use crate::Blog;

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(blog.clone());

    let serve_dir = ServeDir::new(&blog.public_dir).append_index_html_on_directories(true);

    let app = Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/drafts", get(list_drafts))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:slug", get(get_category))
        .route("/api/stats", get(get_stats))
        .route("/api/search", get(search_posts))
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Map index errors onto HTTP: missing content is a 404, everything else
/// surfaces as a 500
fn error_response(err: IndexError) -> Response {
    match err {
        IndexError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found").into_response(),
        other => {
            tracing::error!("content index error: {}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn list_posts(State(blog): State<Arc<Blog>>) -> Response {
    match blog.index().all_posts(false) {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_post(State(blog): State<Arc<Blog>>, Path(slug): Path<String>) -> Response {
    match blog.index().get(&slug) {
        Ok(post) => Json(post).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_drafts(State(blog): State<Arc<Blog>>) -> Response {
    match blog.index().drafts() {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_categories(State(blog): State<Arc<Blog>>) -> Response {
    match blog.index().categories() {
        Ok(categories) => {
            let body: Vec<serde_json::Value> = categories
                .iter()
                .map(|name| {
                    serde_json::json!({
                        "name": name,
                        "slug": url::category_slug(name),
                        "path": url::category_path(&blog.config, name),
                    })
                })
                .collect();
            Json(body).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Posts of one category, addressed by URL slug. The slug is mapped back
/// to the exact category name before matching; an unknown slug is a 404.
async fn get_category(State(blog): State<Arc<Blog>>, Path(slug): Path<String>) -> Response {
    let index = blog.index();
    let categories = match index.categories() {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    let Some(name) = url::find_category(&categories, &slug) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    match index.by_category(name) {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_stats(State(blog): State<Arc<Blog>>) -> Response {
    match blog.index().category_stats(chrono::Utc::now()) {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_posts(
    State(blog): State<Arc<Blog>>,
    Query(params): Query<SearchParams>,
) -> Response {
    match blog.index().all_posts(false) {
        Ok(posts) => {
            let hits: Vec<_> = search::search(&posts, &params.q)
                .into_iter()
                .cloned()
                .collect();
            Json(hits).into_response()
        }
        Err(e) => error_response(e),
    }
}
