use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use kernel::model::id::BookId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::JsonBody,
    handler::checkout::transition_book,
    model::{
        checkout::CheckinRequest,
        review::{ReviewResponse, ReviewsResponse},
    },
};

// レビューは返却済みのエントリから導出するので、追加は返却と同じ遷移になる
#[tracing::instrument(skip(registry))]
pub async fn add_review(
    Path(book_id): Path<String>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CheckinRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let book = transition_book(&registry, &book_id, |book| book.checkin(req.review, Utc::now()))
        .await?;
    book.review(book.history.len())
        .map(|review| (StatusCode::CREATED, Json(review.into())))
}

#[tracing::instrument(skip(registry))]
pub async fn show_reviews(
    Path(book_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReviewsResponse>> {
    let book_id = BookId::parse(&book_id)?;
    let book = registry.book_repository().find_by_id(book_id).await?;

    Ok(Json(book.reviews().into()))
}

#[tracing::instrument(skip(registry))]
pub async fn show_review(
    Path((book_id, review_id)): Path<(String, String)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReviewResponse>> {
    let book_id = BookId::parse(&book_id)?;
    let review_id = review_id
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::EmptyReviewId)?;

    let book = registry.book_repository().find_by_id(book_id).await?;
    book.review(review_id).map(ReviewResponse::from).map(Json)
}
