use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::orders::{CreateTicketRequest, TicketCreated},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::ticket_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_ticket))
}

#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<TicketCreated>),
        (status = 400, description = "Seat out of range"),
        (status = 409, description = "Seat already taken"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Tickets"
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TicketCreated>>)> {
    let resp = ticket_service::create_ticket(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
