use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Airport;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirportRequest {
    pub name: String,
    pub closest_big_city_id: Uuid,
}

/// Body for the admin-only `upload-image` actions. Binary storage is an
/// external collaborator; the API records the resulting URL.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadImageRequest {
    pub image_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AirportList {
    pub items: Vec<Airport>,
}
