use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    repository::{book::BookRepositoryImpl, health::HealthCheckRepositoryImpl},
};
use kernel::repository::{book::BookRepository, health::HealthCheckRepository};

// DI コンテナ。ハンドラは axum の State としてこれを受け取る
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    book_repository: Arc<dyn BookRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let book_repository = Arc::new(BookRepositoryImpl::new(pool));
        Self::with_repositories(health_check_repository, book_repository)
    }

    // テストではここに mockall のモックを渡す
    pub fn with_repositories(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        book_repository: Arc<dyn BookRepository>,
    ) -> Self {
        Self {
            health_check_repository,
            book_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn book_repository(&self) -> Arc<dyn BookRepository> {
        self.book_repository.clone()
    }
}
