use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Route;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRouteRequest {
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteList {
    pub items: Vec<Route>,
}
