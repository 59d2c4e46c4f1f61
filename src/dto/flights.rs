use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::FlightSummary;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFlightRequest {
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFlightRequest {
    pub route_id: Option<Uuid>,
    pub airplane_id: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub crew_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlightList {
    pub items: Vec<FlightSummary>,
}
