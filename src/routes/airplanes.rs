use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::airplanes::{
        AirplaneList, AirplaneTypeList, CreateAirplaneRequest, CreateAirplaneTypeRequest,
    },
    dto::airports::UploadImageRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Airplane, AirplaneType},
    response::ApiResponse,
    routes::params::Pagination,
    services::airplane_service,
    state::AppState,
};

pub fn type_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airplane_types))
        .route("/", post(create_airplane_type))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airplanes))
        .route("/", post(create_airplane))
        .route("/{id}/upload-image", post(upload_image))
}

#[utoipa::path(
    get,
    path = "/api/airplane-types",
    responses(
        (status = 200, description = "List airplane types", body = ApiResponse<AirplaneTypeList>)
    ),
    tag = "Airplanes"
)]
pub async fn list_airplane_types(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AirplaneTypeList>>> {
    let resp = airplane_service::list_airplane_types(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplane-types",
    request_body = CreateAirplaneTypeRequest,
    responses(
        (status = 201, description = "Create airplane type", body = ApiResponse<AirplaneType>)
    ),
    tag = "Airplanes"
)]
pub async fn create_airplane_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAirplaneTypeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AirplaneType>>)> {
    let resp = airplane_service::create_airplane_type(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/airplanes",
    responses(
        (status = 200, description = "List airplanes", body = ApiResponse<AirplaneList>)
    ),
    tag = "Airplanes"
)]
pub async fn list_airplanes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AirplaneList>>> {
    let resp = airplane_service::list_airplanes(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplanes",
    request_body = CreateAirplaneRequest,
    responses(
        (status = 201, description = "Create airplane", body = ApiResponse<Airplane>),
        (status = 400, description = "Invalid cabin dimensions"),
    ),
    tag = "Airplanes"
)]
pub async fn create_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAirplaneRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Airplane>>)> {
    let resp = airplane_service::create_airplane(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/airplanes/{id}/upload-image",
    params(
        ("id" = Uuid, Path, description = "Airplane ID")
    ),
    request_body = UploadImageRequest,
    responses(
        (status = 200, description = "Upload airplane image", body = ApiResponse<Airplane>)
    ),
    tag = "Airplanes"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UploadImageRequest>,
) -> AppResult<Json<ApiResponse<Airplane>>> {
    let resp = airplane_service::upload_airplane_image(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
