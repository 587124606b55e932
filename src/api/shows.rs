use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{self, PageParams, SampleParams, YearRangeParams};
use super::{ApiError, ApiResponse, AppState, Pagination, ShowDetailDto, ShowDto, ShowSummaryDto};

/// GET /api/tvshows - paginated listing ordered by ascending id. The page
/// and the total count are fetched concurrently; either failure fails the
/// request as a whole.
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let paging = validation::validate_paging(&params)?;

    let (rows, total) = tokio::try_join!(
        state.store.list_shows(paging.limit, paging.offset()),
        state.store.count_shows(),
    )?;

    let data: Vec<ShowDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        Pagination::new(paging.page, paging.limit, total),
    )))
}

/// GET /api/tvshows/filter/year - shows whose first air date falls within
/// the inclusive calendar-year range, ordered by ascending first air date.
pub async fn filter_by_year(
    State(state): State<Arc<AppState>>,
    Query(params): Query<YearRangeParams>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let range = validation::validate_year_range(&params)?;
    let paging = range.paging;

    let (rows, total) = tokio::try_join!(
        state
            .store
            .shows_in_air_date_range(range.from, range.to, paging.limit, paging.offset()),
        state.store.count_shows_in_air_date_range(range.from, range.to),
    )?;

    let data: Vec<ShowDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        Pagination::new(paging.page, paging.limit, total),
    )))
}

/// GET /api/tvshows/random - unordered sample via the database's RANDOM()
/// primitive; repeated calls are free to return different sets.
pub async fn random_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SampleParams>,
) -> Result<Json<ApiResponse<Vec<ShowDetailDto>>>, ApiError> {
    let limit = validation::validate_sample_size(&params)?;

    let rows = state.store.random_shows(limit).await?;
    let data: Vec<ShowDetailDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/shows - legacy unpaginated full listing.
pub async fn list_all_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ShowDetailDto>>>, ApiError> {
    let rows = state.store.all_shows().await?;
    let data: Vec<ShowDetailDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/shows/by-name/{name} - case-insensitive substring match against
/// either the display name or the original name.
pub async fn shows_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Vec<ShowSummaryDto>>>, ApiError> {
    let rows = state.store.search_shows_by_name(&name).await?;
    let data: Vec<ShowSummaryDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/shows/by-genre/{genre} - case-insensitive substring match on the
/// genre name, de-duplicated across the join.
pub async fn shows_by_genre(
    State(state): State<Arc<AppState>>,
    Path(genre): Path<String>,
) -> Result<Json<ApiResponse<Vec<ShowSummaryDto>>>, ApiError> {
    let rows = state.store.shows_by_genre(&genre).await?;
    let data: Vec<ShowSummaryDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/shows/by-status/{status} - exact match on the status value.
pub async fn shows_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<ShowSummaryDto>>>, ApiError> {
    let rows = state.store.shows_by_status(&status).await?;
    let data: Vec<ShowSummaryDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/shows/{id} - a miss is a success envelope with no data field,
/// keeping "zero rows" distinct from "query failed".
pub async fn show_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ShowDetailDto>>, ApiError> {
    let id = validation::validate_show_id(&id)?;

    let show = state.store.get_show(id).await?;

    Ok(Json(ApiResponse::from_option(show.map(Into::into))))
}
