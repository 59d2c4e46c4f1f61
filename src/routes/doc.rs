use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        airplanes::{AirplaneList, AirplaneTypeList, CreateAirplaneRequest, CreateAirplaneTypeRequest},
        airports::{AirportList, CreateAirportRequest, UploadImageRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        crews::{CreateCrewRequest, CrewDetail, CrewList},
        flights::{CreateFlightRequest, FlightList, UpdateFlightRequest},
        locations::{CityList, CountryList, CreateCityRequest, CreateCountryRequest},
        orders::{CreateOrderRequest, CreateTicketRequest, OrderList, TicketCreated, TicketRequest},
        routes::{CreateRouteRequest, RouteList},
    },
    models::{
        Airplane, AirplaneType, Airport, City, Country, Crew, FlightDetail, FlightSummary, Order,
        OrderDetail, Route, TakenSeat, TicketDetail, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        airplanes, airports, auth, crews, flights, health, locations, orders, params, routes_api,
        tickets,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        locations::list_countries,
        locations::create_country,
        locations::list_cities,
        locations::create_city,
        airports::list_airports,
        airports::get_airport,
        airports::create_airport,
        airports::upload_image,
        crews::list_crews,
        crews::get_crew,
        crews::create_crew,
        airplanes::list_airplane_types,
        airplanes::create_airplane_type,
        airplanes::list_airplanes,
        airplanes::create_airplane,
        airplanes::upload_image,
        routes_api::list_routes,
        routes_api::create_route,
        flights::list_flights,
        flights::get_flight,
        flights::create_flight,
        flights::update_flight,
        flights::delete_flight,
        orders::list_orders,
        orders::place_order,
        tickets::create_ticket
    ),
    components(
        schemas(
            User,
            Country,
            City,
            Airport,
            Crew,
            AirplaneType,
            Airplane,
            Route,
            FlightSummary,
            FlightDetail,
            TakenSeat,
            Order,
            OrderDetail,
            TicketDetail,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateCountryRequest,
            CreateCityRequest,
            CreateAirportRequest,
            UploadImageRequest,
            CreateCrewRequest,
            CreateAirplaneTypeRequest,
            CreateAirplaneRequest,
            CreateRouteRequest,
            CreateFlightRequest,
            UpdateFlightRequest,
            TicketRequest,
            CreateOrderRequest,
            CreateTicketRequest,
            CountryList,
            CityList,
            AirportList,
            CrewList,
            CrewDetail,
            AirplaneTypeList,
            AirplaneList,
            RouteList,
            FlightList,
            OrderList,
            TicketCreated,
            params::Pagination,
            params::AirportQuery,
            params::RouteQuery,
            params::CrewQuery,
            params::FlightQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<FlightList>,
            ApiResponse<FlightDetail>,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetail>,
            ApiResponse<TicketCreated>,
            ApiResponse<AirportList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Locations", description = "Country and city directory"),
        (name = "Airports", description = "Airport directory"),
        (name = "Crews", description = "Crew directory"),
        (name = "Airplanes", description = "Airplane types and airplanes"),
        (name = "Routes", description = "Route directory"),
        (name = "Flights", description = "Flight schedule and seat availability"),
        (name = "Orders", description = "Order placement and listing"),
        (name = "Tickets", description = "Standalone ticket creation"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
