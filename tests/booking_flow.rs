use axum_airport_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{CreateOrderRequest, CreateTicketRequest, TicketRequest},
    entity::{
        airplane_types::ActiveModel as TypeActive,
        airplanes::ActiveModel as AirplaneActive,
        airports::ActiveModel as AirportActive,
        cities::ActiveModel as CityActive,
        countries::ActiveModel as CountryActive,
        flights::ActiveModel as FlightActive,
        routes::ActiveModel as RouteActive,
        tickets::{Column as TicketCol, Entity as Tickets},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{OrderListQuery, Pagination},
    services::{flight_service, order_service, ticket_service},
    state::AppState,
};
use chrono::{Duration, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

// Each test builds its own users and flight fixture, so the tests stay
// parallel-safe against a shared database.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run booking flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
    };

    Ok(Some(AppState { pool, orm, config }))
}

async fn create_user(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(format!("{}@example.com", Uuid::new_v4())),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: role.into(),
    })
}

/// Country -> city -> two airports -> route -> airplane (10 rows x 8 seats)
/// -> one flight two days out. Returns the flight id.
async fn sample_flight(state: &AppState) -> anyhow::Result<Uuid> {
    let country = CountryActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Test Country {}", Uuid::new_v4())),
    }
    .insert(&state.orm)
    .await?;

    let city = CityActive {
        id: Set(Uuid::new_v4()),
        name: Set("Test City".into()),
        country_id: Set(country.id),
    }
    .insert(&state.orm)
    .await?;

    let mut airport_ids = Vec::new();
    for name in ["Test Airport 1", "Test Airport 2"] {
        let airport = AirportActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.into()),
            closest_big_city_id: Set(city.id),
            image_url: Set(None),
        }
        .insert(&state.orm)
        .await?;
        airport_ids.push(airport.id);
    }

    let route = RouteActive {
        id: Set(Uuid::new_v4()),
        source_id: Set(airport_ids[0]),
        destination_id: Set(airport_ids[1]),
        distance: Set(100),
    }
    .insert(&state.orm)
    .await?;

    let airplane_type = TypeActive {
        id: Set(Uuid::new_v4()),
        name: Set("Test type".into()),
    }
    .insert(&state.orm)
    .await?;

    let airplane = AirplaneActive {
        id: Set(Uuid::new_v4()),
        name: Set("Test Airplane".into()),
        rows: Set(10),
        seats_in_row: Set(8),
        airplane_type_id: Set(Some(airplane_type.id)),
        image_url: Set(None),
    }
    .insert(&state.orm)
    .await?;

    let departure = Utc::now() + Duration::days(2);
    let flight = FlightActive {
        id: Set(Uuid::new_v4()),
        route_id: Set(route.id),
        airplane_id: Set(airplane.id),
        departure_time: Set(departure.into()),
        arrival_time: Set((departure + Duration::hours(1)).into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(flight.id)
}

async fn ticket_count(state: &AppState, flight_id: Uuid) -> anyhow::Result<u64> {
    let count = Tickets::find()
        .filter(TicketCol::FlightId.eq(flight_id))
        .count(&state.orm)
        .await?;
    Ok(count)
}

fn order_request(flight_id: Uuid, seats: &[(i32, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        tickets: seats
            .iter()
            .map(|&(row, seat)| TicketRequest {
                row,
                seat,
                flight_id,
            })
            .collect(),
    }
}

#[tokio::test]
async fn order_with_two_seats_reduces_availability() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight_id = sample_flight(&state).await?;

    let resp = order_service::place_order(&state, &user, order_request(flight_id, &[(1, 1), (1, 2)]))
        .await?;
    let order = resp.data.expect("order detail");
    assert_eq!(order.tickets.len(), 2);

    let summary = flight_service::summary_by_id(&state.pool, flight_id)
        .await?
        .expect("flight summary");
    assert_eq!(summary.capacity, 80);
    assert_eq!(summary.tickets_available, 78);

    // Availability plus sold tickets always equals capacity.
    let sold = ticket_count(&state, flight_id).await? as i64;
    assert_eq!(summary.tickets_available + sold, summary.capacity as i64);

    Ok(())
}

#[tokio::test]
async fn out_of_range_row_is_rejected_without_side_effects() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight_id = sample_flight(&state).await?;

    let err = order_service::place_order(&state, &user, order_request(flight_id, &[(11, 1)]))
        .await
        .unwrap_err();

    match err {
        AppError::Validation(errors) => {
            let message = errors.0.get("row").expect("row error");
            assert!(message.contains("(1, 10)"), "unexpected message: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert_eq!(ticket_count(&state, flight_id).await?, 0);
    let orders = order_service::list_orders(
        &state,
        &user,
        OrderListQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
        },
    )
    .await?;
    assert!(orders.data.expect("order list").items.is_empty());

    Ok(())
}

#[tokio::test]
async fn concurrent_claims_on_one_seat_yield_one_winner() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let alice = create_user(&state, "user").await?;
    let bob = create_user(&state, "user").await?;
    let flight_id = sample_flight(&state).await?;

    let (first, second) = tokio::join!(
        order_service::place_order(&state, &alice, order_request(flight_id, &[(1, 1)])),
        order_service::place_order(&state, &bob, order_request(flight_id, &[(1, 1)])),
    );

    let winners = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one concurrent claim must win");

    let loser = if first.is_err() { first } else { second };
    match loser.unwrap_err() {
        AppError::Conflict(message) => {
            assert!(message.contains("already taken"), "unexpected: {message}")
        }
        other => panic!("expected conflict error, got {other:?}"),
    }

    assert_eq!(ticket_count(&state, flight_id).await?, 1);

    Ok(())
}

#[tokio::test]
async fn empty_order_is_rejected_before_any_write() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;

    let err = order_service::place_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: Vec::new(),
        },
    )
    .await
    .unwrap_err();

    match err {
        AppError::Validation(errors) => assert!(errors.0.contains_key("tickets")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let orders = order_service::list_orders(
        &state,
        &user,
        OrderListQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
        },
    )
    .await?;
    assert!(orders.data.expect("order list").items.is_empty());

    Ok(())
}

#[tokio::test]
async fn one_bad_ticket_rolls_back_the_whole_order() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight_id = sample_flight(&state).await?;

    let err = order_service::place_order(
        &state,
        &user,
        order_request(flight_id, &[(2, 2), (99, 1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The valid first ticket must not survive its sibling's failure.
    assert_eq!(ticket_count(&state, flight_id).await?, 0);

    Ok(())
}

#[tokio::test]
async fn standalone_ticket_path_shares_validation_and_conflicts() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight_id = sample_flight(&state).await?;

    let resp =
        order_service::place_order(&state, &user, order_request(flight_id, &[(1, 1)])).await?;
    let order_id = resp.data.expect("order detail").id;

    // A free seat can be added to the existing order.
    ticket_service::create_ticket(
        &state,
        &user,
        CreateTicketRequest {
            order_id,
            row: 1,
            seat: 2,
            flight_id,
        },
    )
    .await?;

    // The taken seat conflicts, exactly as in the nested path.
    let err = ticket_service::create_ticket(
        &state,
        &user,
        CreateTicketRequest {
            order_id,
            row: 1,
            seat: 1,
            flight_id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Bounds are enforced on this path too.
    let err = ticket_service::create_ticket(
        &state,
        &user,
        CreateTicketRequest {
            order_id,
            row: 0,
            seat: 5,
            flight_id,
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::Validation(errors) => assert!(errors.0.contains_key("row")),
        other => panic!("expected validation error, got {other:?}"),
    }

    // Someone else's order is invisible to the caller.
    let stranger = create_user(&state, "user").await?;
    let err = ticket_service::create_ticket(
        &state,
        &stranger,
        CreateTicketRequest {
            order_id,
            row: 2,
            seat: 1,
            flight_id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    assert_eq!(ticket_count(&state, flight_id).await?, 2);

    Ok(())
}

#[tokio::test]
async fn listing_orders_is_scoped_to_the_caller_and_stable() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let alice = create_user(&state, "user").await?;
    let bob = create_user(&state, "user").await?;
    let flight_id = sample_flight(&state).await?;

    order_service::place_order(&state, &alice, order_request(flight_id, &[(3, 1)])).await?;
    order_service::place_order(&state, &bob, order_request(flight_id, &[(3, 2)])).await?;

    let query = || OrderListQuery {
        pagination: Pagination {
            page: None,
            per_page: None,
        },
    };

    let listed = order_service::list_orders(&state, &alice, query()).await?;
    let items = listed.data.expect("order list").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].tickets.len(), 1);
    assert_eq!(items[0].tickets[0].row, 3);
    assert_eq!(items[0].tickets[0].seat, 1);
    assert_eq!(listed.meta.expect("meta").per_page, Some(5));

    // Reading twice without intervening writes returns identical results.
    let again = order_service::list_orders(&state, &alice, query()).await?;
    let again_items = again.data.expect("order list").items;
    assert_eq!(again_items.len(), 1);
    assert_eq!(again_items[0].id, items[0].id);

    Ok(())
}
