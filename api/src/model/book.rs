use garde::Validate;
use kernel::model::{
    book::{event::CreateBook, Book, BookListOptions},
    id::BookId,
    list::PaginatedList,
};
use serde::{Deserialize, Serialize};

use super::checkout::CheckoutResponse;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub synopsis: String,
}

impl From<CreateBookRequest> for CreateBook {
    fn from(value: CreateBookRequest) -> Self {
        let CreateBookRequest {
            title,
            author,
            synopsis,
        } = value;
        Self {
            title,
            author,
            synopsis,
        }
    }
}

const DEFAULT_LIMIT: i64 = 20;
const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

// クエリ文字列からページネーションの範囲を受け取る
#[derive(Debug, Deserialize, Validate)]
pub struct BookListQuery {
    #[garde(range(min = 0, max = 1000))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

impl From<BookListQuery> for BookListOptions {
    fn from(value: BookListQuery) -> Self {
        let BookListQuery { limit, offset } = value;
        Self { limit, offset }
    }
}

#[derive(Debug, Serialize)]
pub struct BookLinksResponse {
    #[serde(rename = "self")]
    pub self_link: String,
    pub reservations: String,
    pub reviews: String,
}

impl From<&BookId> for BookLinksResponse {
    fn from(value: &BookId) -> Self {
        let self_link = format!("/books/{value}");
        Self {
            reservations: format!("{self_link}/checkouts"),
            reviews: format!("{self_link}/reviews"),
            self_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub synopsis: String,
    pub links: BookLinksResponse,
    pub history: Vec<CheckoutResponse>,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        let Book {
            id,
            title,
            author,
            synopsis,
            history,
        } = value;
        Self {
            links: BookLinksResponse::from(&id),
            id: id.into_inner(),
            title,
            author,
            synopsis,
            history: history.iter().map(CheckoutResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedBookResponse {
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<BookResponse>,
}

impl From<PaginatedList<Book>> for PaginatedBookResponse {
    fn from(value: PaginatedList<Book>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total_count: total,
            limit,
            offset,
            items: items.into_iter().map(BookResponse::from).collect(),
        }
    }
}
