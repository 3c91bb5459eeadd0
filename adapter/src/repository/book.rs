use async_trait::async_trait;
use derive_new::new;
use futures::TryStreamExt;
use kernel::{
    model::{
        book::{
            event::{CreateBook, UpdateBookHistory},
            Book, BookListOptions,
        },
        id::BookId,
        list::PaginatedList,
    },
    repository::book::BookRepository,
};
use mongodb::bson::doc;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::{
    model::book::{history_filter, history_to_bson, BookDocument},
    ConnectionPool,
};

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, event: CreateBook) -> AppResult<Book> {
        // UUIDv7 は時刻順に並ぶので、_id 順がそのまま登録順になる
        let id = BookId::parse(&Uuid::now_v7().to_string())?;
        let document = BookDocument::from_event(id, event);

        self.db
            .books()
            .insert_one(&document)
            .await
            .map_err(AppError::StoreError)?;

        tracing::info!(book_id = %document.id, "book created");
        Book::try_from(document)
    }

    async fn find_all(&self, options: BookListOptions) -> AppResult<PaginatedList<Book>> {
        let BookListOptions { limit, offset } = options;
        let books = self.db.books();

        let total = books
            .count_documents(doc! {})
            .await
            .map_err(AppError::StoreError)?;
        let total = i64::try_from(total)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;

        // MongoDB は limit(0) を「上限なし」と解釈するため、ここで打ち切る
        let documents: Vec<BookDocument> = if limit == 0 {
            Vec::new()
        } else {
            let skip = u64::try_from(offset)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
            books
                .find(doc! {})
                .sort(doc! { "_id": 1 })
                .skip(skip)
                .limit(limit)
                .await
                .map_err(AppError::StoreError)?
                .try_collect::<Vec<_>>()
                .await
                .map_err(AppError::StoreError)?
        };

        let items = documents
            .into_iter()
            .map(Book::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Book> {
        let document = self
            .db
            .books()
            .find_one(doc! { "_id": book_id.as_str() })
            .await
            .map_err(AppError::StoreError)?;

        match document {
            Some(document) => Book::try_from(document),
            None => {
                tracing::warn!(
                    book_id = %book_id,
                    database = %self.db.inner_ref().name(),
                    "book not found"
                );
                Err(AppError::BookNotFound)
            }
        }
    }

    async fn update_history(&self, event: UpdateBookHistory) -> AppResult<()> {
        let UpdateBookHistory {
            book_id,
            previous,
            history,
        } = event;
        let books = self.db.books();

        // 保存済みの履歴が読み込んだ時点のままである場合に限り置き換える
        let filter = history_filter(&book_id, &previous)?;
        let update = doc! { "$set": { "history": history_to_bson(&history)? } };

        let result = books
            .update_one(filter, update)
            .await
            .map_err(AppError::StoreError)?;
        if result.matched_count > 0 {
            return Ok(());
        }

        let exists = books
            .count_documents(doc! { "_id": book_id.as_str() })
            .await
            .map_err(AppError::StoreError)?
            > 0;
        if exists {
            tracing::warn!(book_id = %book_id, "book history changed concurrently");
            Err(AppError::HistoryConflict)
        } else {
            Err(AppError::BookNotFound)
        }
    }
}
