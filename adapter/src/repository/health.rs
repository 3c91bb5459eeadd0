use async_trait::async_trait;
use derive_new::new;
use kernel::repository::health::HealthCheckRepository;
use mongodb::bson::doc;

use crate::database::ConnectionPool;

#[derive(new)]
pub struct HealthCheckRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HealthCheckRepository for HealthCheckRepositoryImpl {
    async fn check_db(&self) -> bool {
        match self.db.inner_ref().run_command(doc! { "ping": 1 }).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error.message = %e, "database ping failed");
                false
            }
        }
    }
}
