use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::flights::{CreateFlightRequest, FlightList, UpdateFlightRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{FlightDetail, FlightSummary},
    response::ApiResponse,
    routes::params::FlightQuery,
    services::flight_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_flights))
        .route("/", post(create_flight))
        .route("/{id}", get(get_flight))
        .route("/{id}", put(update_flight))
        .route("/{id}", delete(delete_flight))
}

#[utoipa::path(
    get,
    path = "/api/flights",
    params(
        ("date" = Option<String>, Query, description = "Filter flights by departure date, YYYY-MM-DD"),
        ("route" = Option<Uuid>, Query, description = "Filter flights by route id"),
    ),
    responses(
        (status = 200, description = "List flights with seat availability", body = ApiResponse<FlightList>)
    ),
    tag = "Flights"
)]
pub async fn list_flights(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<FlightQuery>,
) -> AppResult<Json<ApiResponse<FlightList>>> {
    let resp = flight_service::list_flights(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/flights/{id}",
    params(
        ("id" = Uuid, Path, description = "Flight ID")
    ),
    responses(
        (status = 200, description = "Get flight with taken seats and crew", body = ApiResponse<FlightDetail>),
        (status = 404, description = "Flight not found"),
    ),
    tag = "Flights"
)]
pub async fn get_flight(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FlightDetail>>> {
    let resp = flight_service::get_flight(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/flights",
    request_body = CreateFlightRequest,
    responses(
        (status = 201, description = "Create flight", body = ApiResponse<FlightSummary>),
        (status = 409, description = "Duplicate flight instance"),
    ),
    tag = "Flights"
)]
pub async fn create_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFlightRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FlightSummary>>)> {
    let resp = flight_service::create_flight(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/flights/{id}",
    params(
        ("id" = Uuid, Path, description = "Flight ID")
    ),
    request_body = UpdateFlightRequest,
    responses(
        (status = 200, description = "Update flight", body = ApiResponse<FlightSummary>),
        (status = 409, description = "Duplicate flight instance"),
    ),
    tag = "Flights"
)]
pub async fn update_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFlightRequest>,
) -> AppResult<Json<ApiResponse<FlightSummary>>> {
    let resp = flight_service::update_flight(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/flights/{id}",
    params(
        ("id" = Uuid, Path, description = "Flight ID")
    ),
    responses(
        (status = 200, description = "Flight deleted"),
        (status = 409, description = "Flight has sold tickets"),
    ),
    tag = "Flights"
)]
pub async fn delete_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    flight_service::delete_flight(&state, &user, id).await?;
    Ok(Json(ApiResponse::message("Flight deleted")))
}
