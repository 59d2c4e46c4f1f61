use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::crews::{CreateCrewRequest, CrewDetail, CrewList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Crew,
    response::ApiResponse,
    routes::params::CrewQuery,
    services::crew_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crews))
        .route("/", post(create_crew))
        .route("/{id}", get(get_crew))
}

#[utoipa::path(
    get,
    path = "/api/crews",
    params(
        ("flights" = Option<String>, Query, description = "Comma-separated flight ids the crew members should be assigned to"),
    ),
    responses(
        (status = 200, description = "List crew members", body = ApiResponse<CrewList>)
    ),
    tag = "Crews"
)]
pub async fn list_crews(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<CrewQuery>,
) -> AppResult<Json<ApiResponse<CrewList>>> {
    let resp = crew_service::list_crews(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/crews/{id}",
    params(
        ("id" = Uuid, Path, description = "Crew member ID")
    ),
    responses(
        (status = 200, description = "Get crew member", body = ApiResponse<CrewDetail>),
        (status = 404, description = "Crew member not found"),
    ),
    tag = "Crews"
)]
pub async fn get_crew(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CrewDetail>>> {
    let resp = crew_service::get_crew(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/crews",
    request_body = CreateCrewRequest,
    responses(
        (status = 201, description = "Create crew member", body = ApiResponse<Crew>)
    ),
    tag = "Crews"
)]
pub async fn create_crew(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCrewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Crew>>)> {
    let resp = crew_service::create_crew(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
