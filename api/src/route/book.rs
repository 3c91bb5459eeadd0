use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    book::{register_book, show_book, show_book_list},
    checkout::{checkin_book, checkout_book, show_checkout_history},
    review::{add_review, show_review, show_reviews},
};

pub fn build_book_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/books", post(register_book).get(show_book_list))
        .route("/books/:book_id", get(show_book))
        .route("/books/:book_id/checkout", post(checkout_book))
        .route("/books/:book_id/checkin", post(checkin_book))
        .route("/books/:book_id/checkouts", get(show_checkout_history))
        .route(
            "/books/:book_id/reviews",
            get(show_reviews).post(add_review),
        )
        .route("/books/:book_id/reviews/:review_id", get(show_review))
}
