pub mod airplane_types;
pub mod airplanes;
pub mod airports;
pub mod audit_logs;
pub mod cities;
pub mod countries;
pub mod crew_flights;
pub mod crews;
pub mod flights;
pub mod orders;
pub mod routes;
pub mod tickets;
pub mod users;

pub use airplane_types::Entity as AirplaneTypes;
pub use airplanes::Entity as Airplanes;
pub use airports::Entity as Airports;
pub use audit_logs::Entity as AuditLogs;
pub use cities::Entity as Cities;
pub use countries::Entity as Countries;
pub use crew_flights::Entity as CrewFlights;
pub use crews::Entity as Crews;
pub use flights::Entity as Flights;
pub use orders::Entity as Orders;
pub use routes::Entity as Routes;
pub use tickets::Entity as Tickets;
pub use users::Entity as Users;
