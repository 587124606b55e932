use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entities::tv_shows;

pub mod migrator;
pub mod repositories;

/// Owns the pooled database connection. The pool is bounded by the configured
/// connection ceiling; requests past the ceiling queue for a free connection
/// instead of failing.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let mut opt = ConnectOptions::new(config.connection_url());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        // The catalog is owned by an external loader; this only creates the
        // tables when they are absent (fresh or in-memory databases).
        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected (pool: {}-{}, idle timeout: {}s)",
            config.min_connections, config.max_connections, config.idle_timeout_seconds
        );

        Ok(Self { conn })
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn show_repo(&self) -> repositories::show::ShowRepository {
        repositories::show::ShowRepository::new(self.conn.clone())
    }

    pub async fn list_shows(&self, limit: u64, offset: u64) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().page(limit, offset).await
    }

    pub async fn count_shows(&self) -> Result<u64> {
        self.show_repo().count_all().await
    }

    pub async fn all_shows(&self) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().list_all().await
    }

    pub async fn search_shows_by_name(&self, term: &str) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().search_by_name(term).await
    }

    pub async fn shows_by_genre(&self, term: &str) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().by_genre(term).await
    }

    pub async fn shows_by_status(&self, status: &str) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().by_status(status).await
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<tv_shows::Model>> {
        self.show_repo().get(id).await
    }

    pub async fn shows_in_air_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().page_by_air_date(from, to, limit, offset).await
    }

    pub async fn count_shows_in_air_date_range(&self, from: NaiveDate, to: NaiveDate) -> Result<u64> {
        self.show_repo().count_by_air_date(from, to).await
    }

    pub async fn random_shows(&self, limit: u64) -> Result<Vec<tv_shows::Model>> {
        self.show_repo().random_sample(limit).await
    }
}
