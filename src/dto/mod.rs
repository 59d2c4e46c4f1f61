pub mod airplanes;
pub mod airports;
pub mod auth;
pub mod crews;
pub mod flights;
pub mod locations;
pub mod orders;
pub mod routes;
