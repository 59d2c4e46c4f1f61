use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Airplane, AirplaneType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirplaneTypeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirplaneRequest {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AirplaneTypeList {
    pub items: Vec<AirplaneType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AirplaneList {
    pub items: Vec<Airplane>,
}
