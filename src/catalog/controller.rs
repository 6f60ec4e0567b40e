use axum::{
    body::{HttpBody, StreamBody},
    extract::{Path, State},
    http::{header::{CONTENT_TYPE, LOCATION}, HeaderName, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    BoxError, Router,
};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::get_books_cmd::{GetBooksCommand, GetBooksCommandRequest, GetBooksCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::covers::controller::get_book_cover;

pub(crate) fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route("/api/books", get(find_books).post(add_book))
        .route("/api/books/:id", get(find_book_by_id))
        .route("/api/booksstream", get(stream_books))
        .route("/api/bookcovers/:name", get(get_book_cover))
        .with_state(state)
}

pub(crate) async fn find_books(
    State(state): State<AppState>) -> Result<Json<GetBooksCommandResponse>, ServerError> {
    let res = GetBooksCommand::new(state.catalog).execute(GetBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, [(HeaderName, String); 1], Json<AddBookCommandResponse>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    let location = format!("/api/books/{}", res.book.book_id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(res)))
}

// Streams the catalog as newline delimited json, one book per line, pausing
// before each book.
pub(crate) async fn stream_books(
    State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    let res = GetBooksCommand::new(state.catalog).execute(GetBooksCommandRequest::default()).await?;
    let delay = state.config.stream_delay();
    let lines = stream::iter(res.books).then(move |book| async move {
        tokio::time::sleep(delay).await;
        tracing::info!(book_id = %book.book_id, title = book.title.as_str(), "streaming book");
        serde_json::to_vec(&book).map(|mut line| {
            line.push(b'\n');
            line
        })
    });
    Ok(([(CONTENT_TYPE, "application/x-ndjson")], StreamBody::new(lines)))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    // axum drops this future when the client goes away, the guard then
    // cancels every cover fetch still in flight
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let req = GetBookCommandRequest::new(book_id, cancel);
    let res = GetBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}
