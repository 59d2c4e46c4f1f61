use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::locations::{CityList, CountryList, CreateCityRequest, CreateCountryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{City, Country},
    response::ApiResponse,
    routes::params::Pagination,
    services::location_service,
    state::AppState,
};

pub fn country_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_countries))
        .route("/", post(create_country))
}

pub fn city_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cities))
        .route("/", post(create_city))
}

#[utoipa::path(
    get,
    path = "/api/countries",
    responses(
        (status = 200, description = "List countries", body = ApiResponse<CountryList>)
    ),
    tag = "Locations"
)]
pub async fn list_countries(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CountryList>>> {
    let resp = location_service::list_countries(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/countries",
    request_body = CreateCountryRequest,
    responses(
        (status = 201, description = "Create country", body = ApiResponse<Country>)
    ),
    tag = "Locations"
)]
pub async fn create_country(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCountryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Country>>)> {
    let resp = location_service::create_country(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "List cities", body = ApiResponse<CityList>)
    ),
    tag = "Locations"
)]
pub async fn list_cities(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CityList>>> {
    let resp = location_service::list_cities(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cities",
    request_body = CreateCityRequest,
    responses(
        (status = 201, description = "Create city", body = ApiResponse<City>)
    ),
    tag = "Locations"
)]
pub async fn create_city(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCityRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<City>>)> {
    let resp = location_service::create_city(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
