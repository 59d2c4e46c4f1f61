use axum::Router;

use crate::state::AppState;

pub mod airplanes;
pub mod airports;
pub mod auth;
pub mod crews;
pub mod doc;
pub mod flights;
pub mod health;
pub mod locations;
pub mod orders;
pub mod params;
pub mod routes_api;
pub mod tickets;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/countries", locations::country_router())
        .nest("/cities", locations::city_router())
        .nest("/airports", airports::router())
        .nest("/crews", crews::router())
        .nest("/airplane-types", airplanes::type_router())
        .nest("/airplanes", airplanes::router())
        .nest("/routes", routes_api::router())
        .nest("/flights", flights::router())
        .nest("/orders", orders::router())
        .nest("/tickets", tickets::router())
}
