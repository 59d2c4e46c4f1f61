use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{OrderDetail, TicketDetail};

/// One requested seat inside an order-creation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketRequest {
    pub row: i32,
    pub seat: i32,
    pub flight_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub tickets: Vec<TicketRequest>,
}

/// Standalone ticket creation into an existing order the caller owns.
/// Shares the checked-seat insert path with order creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub order_id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub flight_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketCreated {
    pub ticket: TicketDetail,
}
