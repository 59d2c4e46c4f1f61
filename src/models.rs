use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
}

/// Airport list/detail projection. `routes_count` is an aggregate computed
/// at read time, never stored.
#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub closest_big_city: String,
    pub country: String,
    pub image_url: Option<String>,
    pub routes_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Crew {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub flight_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AirplaneType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Airplane {
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
    pub airplane_type_id: Option<Uuid>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Route {
    pub id: Uuid,
    pub source: String,
    pub destination: String,
    pub distance: i32,
}

/// Flight projection with `tickets_available` computed from the airplane's
/// capacity minus sold tickets in the same query.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct FlightSummary {
    pub id: Uuid,
    pub route_id: Uuid,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub airplane_name: String,
    pub airplane_image_url: Option<String>,
    pub capacity: i32,
    pub tickets_available: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TakenSeat {
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FlightDetail {
    pub flight: FlightSummary,
    pub taken_seats: Vec<TakenSeat>,
    pub crew: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketDetail {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub flight: FlightSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<TicketDetail>,
}
