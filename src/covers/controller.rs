use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use crate::core::controller::{AppState, ServerError};
use crate::covers::domain::model::CoverFetchFailure;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CoverQuery {
    #[serde(default)]
    pub(crate) fault: bool,
}

// Serves simulated covers so that the http cover provider has a slow
// backend to talk to.
pub(crate) async fn get_book_cover(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CoverQuery>) -> Result<Vec<u8>, ServerError> {
    if query.fault {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, format!("fault requested for {}", name)));
    }
    tracing::debug!(branch = state.config.branch_id.as_str(), cover = name.as_str(), "serving cover");
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    match state.cover_source.fetch(name.as_str(), &cancel).await {
        Ok(cover) => Ok(cover.bytes),
        Err(CoverFetchFailure::NotFound) => Err((StatusCode::NOT_FOUND, format!("cover {} not found", name))),
        Err(err) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))),
    }
}
