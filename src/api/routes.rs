//! Read-only article endpoints.
//!
//! | Route | Source |
//! |-------|--------|
//! | `GET /` | Service index |
//! | `GET /api/articles` | Startup snapshot of every category |
//! | `GET /api/articles/{category}` | The category file, re-read per request |

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use super::AppState;
use crate::config::artifact_path;
use crate::models::Category;
use crate::outputs::json::{self as artifacts, ReadError};

/// Service index response
#[derive(Debug, Serialize)]
struct IndexResponse {
    message: &'static str,
    routes: [&'static str; 2],
    categories: Vec<&'static str>,
    cache_loaded_at: String,
}

/// Create article routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/articles", get(all_articles))
        .route("/api/articles/{category}", get(category_articles))
}

/// GET / - what this service exposes
async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "AzerNews API is running",
        routes: ["/api/articles", "/api/articles/{category}"],
        categories: Category::ALL.iter().map(|c| c.key()).collect(),
        cache_loaded_at: state.cache.loaded_at().to_rfc3339(),
    })
}

/// GET /api/articles - every category, from the startup snapshot
async fn all_articles(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.cache.all().clone())
}

/// GET /api/articles/{category} - one category, read from disk
async fn category_articles(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Response {
    let Ok(parsed) = category.parse::<Category>() else {
        return not_found(format!("No data found for category: {}", category.to_lowercase()));
    };

    let path = artifact_path(&state.data_dir, parsed);
    match artifacts::read_category(&path).await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(ReadError::Missing) => {
            warn!(category = %parsed, path = %path.display(), "Artifact requested but not on disk");
            not_found("File not found".to_string())
        }
        Err(e) => {
            error!(category = %parsed, path = %path.display(), error = %e, "Failed to read artifact");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Failed to read articles: {e}") })),
            )
                .into_response()
        }
    }
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cache::ArticleCache;
    use crate::models::{ArticleDetail, ArticleStub, EnrichedArticle};
    use crate::outputs::json::write_category;
    use axum::body::to_bytes;
    use serde_json::Value;
    use std::sync::Arc;

    async fn state_for(dir: &std::path::Path) -> AppState {
        AppState {
            data_dir: Arc::new(dir.to_path_buf()),
            cache: Arc::new(ArticleCache::load(dir).await),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn world_articles() -> Vec<EnrichedArticle> {
        vec![EnrichedArticle::new(
            ArticleStub {
                title: Some("T1".to_string()),
                link: "https://www.azernews.az/world/250001.html".to_string(),
                thumbnail: Some("I1".to_string()),
                summary: Some(Some("S1".to_string())),
            },
            ArticleDetail {
                author: Some("Laman Ismayilova".to_string()),
                author_img: None,
                publish_date: Some("12 March 2025".to_string()),
                content: vec!["Bakı.".to_string()],
            },
        )]
    }

    #[tokio::test]
    async fn test_category_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let articles = world_articles();
        write_category(&artifact_path(tmp.path(), Category::World), &articles)
            .await
            .unwrap();
        let state = state_for(tmp.path()).await;

        let response = category_articles(State(state), Path("World".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::to_value(&articles).unwrap());
        let back: Vec<EnrichedArticle> = serde_json::from_value(body).unwrap();
        assert_eq!(back, articles);
    }

    #[tokio::test]
    async fn test_unknown_category_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let response = category_articles(State(state_for(tmp.path()).await), Path("Sports".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "No data found for category: sports" })
        );
    }

    #[tokio::test]
    async fn test_padded_category_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        write_category(&artifact_path(tmp.path(), Category::World), &world_articles())
            .await
            .unwrap();
        let response = category_articles(State(state_for(tmp.path()).await), Path(" World".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "No data found for category:  world" })
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let response = category_articles(State(state_for(tmp.path()).await), Path("culture".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "File not found" }));
    }

    #[tokio::test]
    async fn test_malformed_file_is_500() {
        let tmp = tempfile::tempdir().unwrap();
        tokio::fs::write(artifact_path(tmp.path(), Category::Analysis), "[")
            .await
            .unwrap();
        let response = category_articles(State(state_for(tmp.path()).await), Path("analysis".to_string())).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_single_route_rereads_while_all_route_is_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let state = state_for(tmp.path()).await;
        write_category(&artifact_path(tmp.path(), Category::World), &world_articles())
            .await
            .unwrap();

        let single = category_articles(State(state.clone()), Path("world".to_string())).await;
        assert_eq!(body_json(single).await.as_array().unwrap().len(), 1);

        let all = all_articles(State(state)).await.into_response();
        let body = body_json(all).await;
        assert_eq!(body["world"], json!([]));
        assert_eq!(body.as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_index_lists_categories() {
        let tmp = tempfile::tempdir().unwrap();
        let Json(body) = index(State(state_for(tmp.path()).await)).await;
        assert_eq!(body.categories.len(), 6);
        assert!(body.categories.contains(&"armenian-azerbaijan-conflict"));
        assert!(!body.cache_loaded_at.is_empty());
    }
}
