use sea_orm::entity::prelude::*;

/// A row of the externally-loaded TV show catalog. Ids are assigned by the
/// upstream data import; this service never inserts or mutates rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tv_shows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub original_name: String,
    pub first_air_date: Date,
    pub last_air_date: Option<Date>,
    pub seasons: Option<i32>,
    pub episodes: Option<i32>,
    /// One of: Ended, Returning Series, Canceled, In Production, Planned.
    pub status: String,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub tmdb_rating: Option<f64>,
    pub vote_count: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show_genres::Entity")]
    ShowGenres,
}

impl Related<super::show_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowGenres.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::show_genres::Relation::Genres.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::show_genres::Relation::TvShows.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
