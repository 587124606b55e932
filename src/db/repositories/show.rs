use crate::entities::{genres, prelude::*, show_genres, tv_shows};
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

/// Read-only access to the show catalog. Every value reaches the database as
/// a bound parameter through the query builder; nothing is spliced into SQL
/// text.
pub struct ShowRepository {
    conn: DatabaseConnection,
}

/// `lower(column) LIKE lower('%term%')` so substring matches behave the same
/// on Postgres (where LIKE is case-sensitive) and SQLite.
fn ci_contains(col: Expr, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(col)).like(format!("%{}%", term.to_lowercase()))
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn page(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .order_by_asc(tv_shows::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count_all(&self) -> anyhow::Result<u64> {
        let total = TvShows::find().count(&self.conn).await?;
        Ok(total)
    }

    /// Legacy unpaginated listing kept for the original `/api/shows` route.
    pub async fn list_all(&self) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .order_by_asc(tv_shows::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn search_by_name(&self, term: &str) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .filter(
                sea_orm::Condition::any()
                    .add(ci_contains(
                        Expr::col((tv_shows::Entity, tv_shows::Column::Name)),
                        term,
                    ))
                    .add(ci_contains(
                        Expr::col((tv_shows::Entity, tv_shows::Column::OriginalName)),
                        term,
                    )),
            )
            .order_by_asc(tv_shows::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Distinct join across tv_shows -> show_genres -> genres, matching a
    /// case-insensitive substring of the genre name.
    pub async fn by_genre(&self, term: &str) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .join(JoinType::InnerJoin, tv_shows::Relation::ShowGenres.def())
            .join(JoinType::InnerJoin, show_genres::Relation::Genres.def())
            .filter(ci_contains(
                Expr::col((genres::Entity, genres::Column::Name)),
                term,
            ))
            .distinct()
            .order_by_asc(tv_shows::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Exact match on the status enumeration value, no normalization.
    pub async fn by_status(&self, status: &str) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .filter(tv_shows::Column::Status.eq(status))
            .order_by_asc(tv_shows::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<tv_shows::Model>> {
        let row = TvShows::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn page_by_air_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .filter(tv_shows::Column::FirstAirDate.between(from, to))
            .order_by_asc(tv_shows::Column::FirstAirDate)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count_by_air_date(&self, from: NaiveDate, to: NaiveDate) -> anyhow::Result<u64> {
        let total = TvShows::find()
            .filter(tv_shows::Column::FirstAirDate.between(from, to))
            .count(&self.conn)
            .await?;

        Ok(total)
    }

    /// Unordered sample via the database's native RANDOM() ordering. No
    /// distribution fairness is guaranteed across calls.
    pub async fn random_sample(&self, limit: u64) -> anyhow::Result<Vec<tv_shows::Model>> {
        let rows = TvShows::find()
            .order_by(SimpleExpr::FunctionCall(Func::random()), Order::Asc)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
