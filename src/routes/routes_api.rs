use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::routes::{CreateRouteRequest, RouteList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Route,
    response::ApiResponse,
    routes::params::RouteQuery,
    services::route_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/", post(create_route))
}

#[utoipa::path(
    get,
    path = "/api/routes",
    params(
        ("dep_countries" = Option<String>, Query, description = "Comma-separated country names the routes should start in"),
        ("dep_cities" = Option<String>, Query, description = "Comma-separated city names the routes should start near"),
        ("dest_countries" = Option<String>, Query, description = "Comma-separated country names the routes should end in"),
        ("dest_cities" = Option<String>, Query, description = "Comma-separated city names the routes should end near"),
    ),
    responses(
        (status = 200, description = "List routes", body = ApiResponse<RouteList>)
    ),
    tag = "Routes"
)]
pub async fn list_routes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RouteQuery>,
) -> AppResult<Json<ApiResponse<RouteList>>> {
    let resp = route_service::list_routes(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/routes",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Create route", body = ApiResponse<Route>)
    ),
    tag = "Routes"
)]
pub async fn create_route(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRouteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Route>>)> {
    let resp = route_service::create_route(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
