use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use kernel::model::{
    book::{event::UpdateBookHistory, Book},
    id::BookId,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::JsonBody,
    model::{
        book::BookResponse,
        checkout::{CheckinRequest, CheckoutHistoryResponse, CheckoutRequest, CheckoutResponse},
    },
};

// 蔵書を読み込み、手元のコピーに状態遷移を適用してから履歴を保存する。遷移に失敗した場合は何も書き込まない
pub(crate) async fn transition_book<F>(registry: &AppRegistry, book_id: &str, transition: F) -> AppResult<Book>
where
    F: FnOnce(&mut Book) -> AppResult<()>,
{
    let book_id = BookId::parse(book_id)?;
    let repository = registry.book_repository();

    let mut book = repository.find_by_id(book_id).await?;
    let previous = book.history.clone();

    if let Err(e) = transition(&mut book) {
        tracing::info!(book_id = %book.id, error.message = %e, "book transition rejected");
        return Err(e);
    }

    repository
        .update_history(UpdateBookHistory {
            book_id: book.id.clone(),
            previous,
            history: book.history.clone(),
        })
        .await?;
    Ok(book)
}

#[tracing::instrument(skip(registry))]
pub async fn checkout_book(
    Path(book_id): Path<String>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    transition_book(&registry, &book_id, |book| book.checkout(&req.who, Utc::now()))
        .await
        .map(|book| (StatusCode::CREATED, Json(book.into())))
}

#[tracing::instrument(skip(registry))]
pub async fn checkin_book(
    Path(book_id): Path<String>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CheckinRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    transition_book(&registry, &book_id, |book| book.checkin(req.review, Utc::now()))
        .await
        .map(|book| (StatusCode::CREATED, Json(book.into())))
}

#[tracing::instrument(skip(registry))]
pub async fn show_checkout_history(
    Path(book_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CheckoutHistoryResponse>> {
    let book_id = BookId::parse(&book_id)?;
    let book = registry.book_repository().find_by_id(book_id).await?;

    Ok(Json(CheckoutHistoryResponse {
        items: book.history.iter().map(CheckoutResponse::from).collect(),
    }))
}
