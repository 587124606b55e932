use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::tv_shows;

/// Uniform response envelope. Successful payloads carry `data` (and
/// `pagination` for paged listings); failures carry `error` and, for
/// validation, a per-field `details` list. Handlers never return bare arrays
/// or bare error strings.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            pagination: None,
        }
    }

    /// Success envelope whose `data` field is omitted when absent. A by-id
    /// lookup with no matching row is a success, not an error.
    pub const fn from_option(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            error: None,
            details: None,
            pagination: None,
        }
    }

    pub const fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            pagination: Some(pagination),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
            pagination: None,
        }
    }

    pub fn error_with_details(message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: Some(details),
            pagination: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u64,
    pub items_per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `items_per_page` is always >= 1 here; the validator bounds it before
    /// any query runs.
    #[must_use]
    pub fn new(current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        Self {
            current_page,
            items_per_page,
            total_items,
            total_pages: total_items.div_ceil(items_per_page),
        }
    }
}

/// Wide projection used by the paginated list and year-filter endpoints.
#[derive(Debug, Serialize)]
pub struct ShowDto {
    pub id: i32,
    pub name: String,
    pub original_name: String,
    pub first_air_date: NaiveDate,
    pub last_air_date: Option<NaiveDate>,
    pub seasons: Option<i32>,
    pub episodes: Option<i32>,
    pub status: String,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub tmdb_rating: Option<f64>,
    pub vote_count: Option<i32>,
}

impl From<tv_shows::Model> for ShowDto {
    fn from(model: tv_shows::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            original_name: model.original_name,
            first_air_date: model.first_air_date,
            last_air_date: model.last_air_date,
            seasons: model.seasons,
            episodes: model.episodes,
            status: model.status,
            overview: model.overview,
            popularity: model.popularity,
            tmdb_rating: model.tmdb_rating,
            vote_count: model.vote_count,
        }
    }
}

/// Narrow projection used by the name/genre/status filter endpoints.
#[derive(Debug, Serialize)]
pub struct ShowSummaryDto {
    pub id: i32,
    pub name: String,
    pub original_name: String,
    pub first_air_date: NaiveDate,
    pub seasons: Option<i32>,
    pub episodes: Option<i32>,
    pub status: String,
    pub tmdb_rating: Option<f64>,
}

impl From<tv_shows::Model> for ShowSummaryDto {
    fn from(model: tv_shows::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            original_name: model.original_name,
            first_air_date: model.first_air_date,
            seasons: model.seasons,
            episodes: model.episodes,
            status: model.status,
            tmdb_rating: model.tmdb_rating,
        }
    }
}

/// Full row, including artwork URLs: by-id lookups, the random sample, and
/// the legacy full listing.
#[derive(Debug, Serialize)]
pub struct ShowDetailDto {
    pub id: i32,
    pub name: String,
    pub original_name: String,
    pub first_air_date: NaiveDate,
    pub last_air_date: Option<NaiveDate>,
    pub seasons: Option<i32>,
    pub episodes: Option<i32>,
    pub status: String,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub tmdb_rating: Option<f64>,
    pub vote_count: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

impl From<tv_shows::Model> for ShowDetailDto {
    fn from(model: tv_shows::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            original_name: model.original_name,
            first_air_date: model.first_air_date,
            last_air_date: model.last_air_date,
            seasons: model.seasons,
            episodes: model.episodes,
            status: model.status,
            overview: model.overview,
            popularity: model.popularity,
            tmdb_rating: model.tmdb_rating,
            vote_count: model.vote_count,
            poster_url: model.poster_url,
            backdrop_url: model.backdrop_url,
        }
    }
}
