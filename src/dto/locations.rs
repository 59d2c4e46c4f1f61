use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{City, Country};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCountryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCityRequest {
    pub name: String,
    pub country_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountryList {
    pub items: Vec<Country>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CityList {
    pub items: Vec<City>,
}
