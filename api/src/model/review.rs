use chrono::{DateTime, Utc};
use kernel::model::book::BookReview;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: usize,
    pub who: String,
    pub review: u8,
    pub reviewed_at: DateTime<Utc>,
}

impl From<BookReview> for ReviewResponse {
    fn from(value: BookReview) -> Self {
        let BookReview {
            id,
            who,
            review,
            reviewed_at,
        } = value;
        Self {
            id,
            who,
            review: review.value(),
            reviewed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub total_count: usize,
    pub items: Vec<ReviewResponse>,
}

impl From<Vec<BookReview>> for ReviewsResponse {
    fn from(value: Vec<BookReview>) -> Self {
        Self {
            total_count: value.len(),
            items: value.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}
