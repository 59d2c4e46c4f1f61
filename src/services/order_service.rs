use std::collections::HashMap;

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, OrderList},
    entity::{
        airplanes::{Entity as Airplanes, Model as AirplaneModel},
        flights::{Entity as Flights, Model as FlightModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        tickets::{ActiveModel as TicketActive, Column as TicketCol, Entity as Tickets, Model as TicketModel},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::AuthUser,
    models::{FlightSummary, OrderDetail, TicketDetail},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    seating::CheckedSeat,
    services::flight_service,
    state::AppState,
};

/// Orders keep the original service's small page size.
const ORDER_PAGE_SIZE: i64 = 5;

/// The only ticket write path in the crate. Seat bounds are proven by
/// [`CheckedSeat`] before the insert, and the schema's unique constraint on
/// (flight_id, row, seat) decides concurrent claims; its violation surfaces
/// as a 409 conflict.
pub(crate) async fn insert_ticket<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    flight: &FlightModel,
    airplane: &AirplaneModel,
    row: i32,
    seat: i32,
) -> AppResult<TicketModel> {
    let checked = CheckedSeat::new(row, seat, airplane.rows, airplane.seats_in_row)?;

    let result = TicketActive {
        id: Set(Uuid::new_v4()),
        row: Set(checked.row()),
        seat: Set(checked.seat()),
        flight_id: Set(flight.id),
        order_id: Set(order_id),
    }
    .insert(conn)
    .await;

    match result {
        Ok(ticket) => Ok(ticket),
        Err(err) => {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(AppError::Conflict(format!(
                    "seat (row {}, seat {}) on flight {} is already taken",
                    checked.row(),
                    checked.seat(),
                    flight.id
                )));
            }
            Err(err.into())
        }
    }
}

/// Resolve a flight and its airplane inside the current unit of work.
pub(crate) async fn load_flight<C: ConnectionTrait>(
    conn: &C,
    flight_id: Uuid,
) -> AppResult<(FlightModel, AirplaneModel)> {
    let flight = Flights::find_by_id(flight_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            AppError::Validation(FieldErrors::single(
                "flight",
                format!("flight {flight_id} does not exist"),
            ))
        })?;

    let airplane = Airplanes::find_by_id(flight.airplane_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("flight {} has no airplane", flight.id)))?;

    Ok((flight, airplane))
}

/// Atomically create an order with all requested tickets. Either every
/// ticket is persisted, linked to one new order, or nothing is: any
/// validation failure or seat conflict rolls the whole transaction back
/// before it becomes visible to other readers.
pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    if payload.tickets.is_empty() {
        return Err(AppError::Validation(FieldErrors::single(
            "tickets",
            "an order must contain at least one ticket",
        )));
    }

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut tickets = Vec::with_capacity(payload.tickets.len());
    for request in &payload.tickets {
        let (flight, airplane) = load_flight(&txn, request.flight_id).await?;
        let ticket = insert_ticket(&txn, order.id, &flight, &airplane, request.row, request.seat)
            .await?;
        tickets.push(ticket);
    }

    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "order_placed",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "tickets": tickets.len() })),
    )
    .await;

    let detail = assemble_details(state, vec![order])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("order vanished after commit")))?;

    Ok(ApiResponse::success(
        "Order placed",
        detail,
        Some(Meta::empty()),
    ))
}

/// List the caller's own orders, newest first, tickets and flight
/// summaries embedded.
pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize_with(ORDER_PAGE_SIZE);

    let finder = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = assemble_details(state, orders).await?;

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

async fn assemble_details(
    state: &AppState,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<OrderDetail>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let tickets = Tickets::find()
        .filter(TicketCol::OrderId.is_in(order_ids))
        .order_by_asc(TicketCol::Row)
        .order_by_asc(TicketCol::Seat)
        .all(&state.orm)
        .await?;

    let mut flight_ids: Vec<Uuid> = tickets.iter().map(|t| t.flight_id).collect();
    flight_ids.sort();
    flight_ids.dedup();
    let flights: HashMap<Uuid, FlightSummary> =
        flight_service::summaries_by_ids(&state.pool, &flight_ids)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

    let mut by_order: HashMap<Uuid, Vec<TicketDetail>> = HashMap::new();
    for ticket in tickets {
        let flight = flights.get(&ticket.flight_id).cloned().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("ticket {} has no flight", ticket.id))
        })?;
        by_order.entry(ticket.order_id).or_default().push(TicketDetail {
            id: ticket.id,
            row: ticket.row,
            seat: ticket.seat,
            flight,
        });
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderDetail {
            id: order.id,
            created_at: order.created_at.with_timezone(&chrono::Utc),
            tickets: by_order.remove(&order.id).unwrap_or_default(),
        })
        .collect())
}
