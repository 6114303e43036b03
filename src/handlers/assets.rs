use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use crate::config::AssetsConfig;

/// `/` serves the index document, `/src/*` and `/static/*` their subtrees.
/// Missing files answer 404 and paths escaping a subtree are refused.
pub fn asset_routes<S>(assets: &AssetsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route_service("/", ServeFile::new(&assets.index))
        .nest_service("/src", ServeDir::new(&assets.src_dir))
        .nest_service("/static", ServeDir::new(&assets.static_dir))
}
