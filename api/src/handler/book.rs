use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{book::event::CreateBook, id::BookId};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::{JsonBody, QueryParams},
    model::book::{BookListQuery, BookResponse, CreateBookRequest, PaginatedBookResponse},
};

#[tracing::instrument(skip(registry))]
pub async fn register_book(
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let event = CreateBook::from(req);
    event.validate()?;

    registry
        .book_repository()
        .create(event)
        .await
        .map(|book| (StatusCode::CREATED, Json(book.into())))
}

#[tracing::instrument(skip(registry))]
pub async fn show_book_list(
    QueryParams(query): QueryParams<BookListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedBookResponse>> {
    query.validate(&())?;

    registry
        .book_repository()
        .find_all(query.into())
        .await
        .map(PaginatedBookResponse::from)
        .map(Json)
}

#[tracing::instrument(skip(registry))]
pub async fn show_book(
    Path(book_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookResponse>> {
    let book_id = BookId::parse(&book_id)?;

    registry
        .book_repository()
        .find_by_id(book_id)
        .await
        .map(BookResponse::from)
        .map(Json)
}
