use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::airports::{AirportList, CreateAirportRequest, UploadImageRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Airport,
    response::ApiResponse,
    routes::params::AirportQuery,
    services::airport_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airports))
        .route("/", post(create_airport))
        .route("/{id}", get(get_airport))
        .route("/{id}/upload-image", post(upload_image))
}

#[utoipa::path(
    get,
    path = "/api/airports",
    params(
        ("dep_countries" = Option<String>, Query, description = "Comma-separated country names the airports should be located in"),
        ("dep_cities" = Option<String>, Query, description = "Comma-separated city names the airports should be located near"),
        ("dest_countries" = Option<String>, Query, description = "Comma-separated country names the airports should have trips to"),
        ("dest_cities" = Option<String>, Query, description = "Comma-separated city names the airports should have trips to"),
    ),
    responses(
        (status = 200, description = "List airports", body = ApiResponse<AirportList>)
    ),
    tag = "Airports"
)]
pub async fn list_airports(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<AirportQuery>,
) -> AppResult<Json<ApiResponse<AirportList>>> {
    let resp = airport_service::list_airports(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/airports/{id}",
    params(
        ("id" = Uuid, Path, description = "Airport ID")
    ),
    responses(
        (status = 200, description = "Get airport", body = ApiResponse<Airport>),
        (status = 404, description = "Airport not found"),
    ),
    tag = "Airports"
)]
pub async fn get_airport(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Airport>>> {
    let resp = airport_service::get_airport(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airports",
    request_body = CreateAirportRequest,
    responses(
        (status = 201, description = "Create airport", body = ApiResponse<Airport>)
    ),
    tag = "Airports"
)]
pub async fn create_airport(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAirportRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Airport>>)> {
    let resp = airport_service::create_airport(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/airports/{id}/upload-image",
    params(
        ("id" = Uuid, Path, description = "Airport ID")
    ),
    request_body = UploadImageRequest,
    responses(
        (status = 200, description = "Upload airport image", body = ApiResponse<Airport>)
    ),
    tag = "Airports"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UploadImageRequest>,
) -> AppResult<Json<ApiResponse<Airport>>> {
    let resp = airport_service::upload_airport_image(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
