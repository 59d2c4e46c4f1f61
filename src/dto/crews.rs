use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Crew, FlightSummary};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCrewRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CrewList {
    pub items: Vec<Crew>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CrewDetail {
    pub crew: Crew,
    pub flights: Vec<FlightSummary>,
}
