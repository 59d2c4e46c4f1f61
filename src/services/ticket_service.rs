use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, TransactionTrait};

use crate::{
    audit::log_audit,
    dto::orders::{CreateTicketRequest, TicketCreated},
    entity::orders::{Column as OrderCol, Entity as Orders},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::TicketDetail,
    response::{ApiResponse, Meta},
    services::{flight_service, order_service},
    state::AppState,
};

/// Add a single ticket to an order the caller already owns. Runs through
/// the same checked-seat insert path as order creation, so the standalone
/// and nested write paths cannot diverge.
pub async fn create_ticket(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTicketRequest,
) -> AppResult<ApiResponse<TicketCreated>> {
    // Foreign orders are indistinguishable from missing ones.
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::Id.eq(payload.order_id))
                .add(OrderCol::UserId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let txn = state.orm.begin().await?;

    let (flight, airplane) = order_service::load_flight(&txn, payload.flight_id).await?;
    let ticket = order_service::insert_ticket(
        &txn,
        order.id,
        &flight,
        &airplane,
        payload.row,
        payload.seat,
    )
    .await?;

    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "ticket_created",
        Some("tickets"),
        Some(serde_json::json!({ "order_id": order.id, "ticket_id": ticket.id })),
    )
    .await;

    let flight = flight_service::summary_by_id(&state.pool, ticket.flight_id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("flight vanished after commit")))?;

    Ok(ApiResponse::success(
        "Ticket created",
        TicketCreated {
            ticket: TicketDetail {
                id: ticket.id,
                row: ticket.row,
                seat: ticket.seat,
                flight,
            },
        },
        Some(Meta::empty()),
    ))
}
