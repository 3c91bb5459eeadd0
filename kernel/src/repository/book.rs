use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{
        event::{CreateBook, UpdateBookHistory},
        Book, BookListOptions,
    },
    id::BookId,
    list::PaginatedList,
};

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    // 蔵書を登録し、ID を採番したうえで返す
    async fn create(&self, event: CreateBook) -> AppResult<Book>;
    // ページ単位の蔵書一覧と総件数
    async fn find_all(&self, options: BookListOptions) -> AppResult<PaginatedList<Book>>;
    // 見つからなければ BookNotFound
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Book>;
    // 貸出・返却の結果を保存する。保存済みの履歴が previous と異なれば HistoryConflict
    async fn update_history(&self, event: UpdateBookHistory) -> AppResult<()>;
}
