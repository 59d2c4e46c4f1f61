use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::flights::{CreateFlightRequest, FlightList, UpdateFlightRequest},
    entity::{
        airplanes::Entity as Airplanes,
        crew_flights::{
            ActiveModel as CrewFlightActive, Column as CrewFlightCol, Entity as CrewFlights,
        },
        crews::Entity as Crews,
        flights::{ActiveModel as FlightActive, Entity as Flights},
        routes::Entity as Routes,
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::{FlightDetail, FlightSummary, TakenSeat},
    response::{ApiResponse, Meta},
    routes::params::FlightQuery,
    state::AppState,
};

// `tickets_available` is recomputed on every read from the airplane's
// dimensions and the sold-ticket count in one aggregate; it is never stored.
const FLIGHT_SELECT: &str = r#"
    SELECT f.id, f.route_id,
           src.name AS source, dst.name AS destination,
           f.departure_time, f.arrival_time,
           a.name AS airplane_name, a.image_url AS airplane_image_url,
           a.rows * a.seats_in_row AS capacity,
           (a.rows * a.seats_in_row)::bigint - COUNT(t.id) AS tickets_available
    FROM flights f
    JOIN airplanes a ON a.id = f.airplane_id
    JOIN routes r ON r.id = f.route_id
    JOIN airports src ON src.id = r.source_id
    JOIN airports dst ON dst.id = r.destination_id
    LEFT JOIN tickets t ON t.flight_id = f.id
"#;

const FLIGHT_GROUP: &str = r#"
    GROUP BY f.id, src.name, dst.name, a.name, a.image_url, a.rows, a.seats_in_row
"#;

pub async fn list_flights(
    state: &AppState,
    query: FlightQuery,
) -> AppResult<ApiResponse<FlightList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let date = match query.date.as_deref() {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::Validation(FieldErrors::single(
                "date",
                format!("invalid date: {raw}, expected YYYY-MM-DD"),
            ))
        })?),
        None => None,
    };

    let filter = "WHERE ($1::date IS NULL OR (f.departure_time AT TIME ZONE 'UTC')::date = $1) \
                  AND ($2::uuid IS NULL OR f.route_id = $2)";

    let sql = format!(
        "{FLIGHT_SELECT} {filter} {FLIGHT_GROUP} ORDER BY f.departure_time LIMIT $3 OFFSET $4"
    );
    let items = sqlx::query_as::<_, FlightSummary>(&sql)
        .bind(date)
        .bind(query.route)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM flights f {filter}");
    let total: (i64,) = sqlx::query_as(&count_sql)
        .bind(date)
        .bind(query.route)
        .fetch_one(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Flights",
        FlightList { items },
        Some(Meta::new(page, limit, total.0)),
    ))
}

pub async fn get_flight(state: &AppState, id: Uuid) -> AppResult<ApiResponse<FlightDetail>> {
    let flight = summary_by_id(&state.pool, id).await?;
    let flight = match flight {
        Some(f) => f,
        None => return Err(AppError::NotFound),
    };

    let taken_seats = sqlx::query_as::<_, TakenSeat>(
        r#"SELECT "row", seat FROM tickets WHERE flight_id = $1 ORDER BY "row", seat"#,
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    let crew: Vec<(String,)> = sqlx::query_as(
        "SELECT c.first_name || ' ' || c.last_name FROM crews c \
         JOIN crew_flights cf ON cf.crew_id = c.id \
         WHERE cf.flight_id = $1 ORDER BY c.last_name",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;
    let crew = crew.into_iter().map(|(name,)| name).collect();

    Ok(ApiResponse::success(
        "Flight",
        FlightDetail {
            flight,
            taken_seats,
            crew,
        },
        Some(Meta::empty()),
    ))
}

pub async fn summary_by_id(pool: &DbPool, id: Uuid) -> AppResult<Option<FlightSummary>> {
    let sql = format!("{FLIGHT_SELECT} WHERE f.id = $1 {FLIGHT_GROUP}");
    let flight = sqlx::query_as::<_, FlightSummary>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(flight)
}

/// Batched flight summaries for embedding in order/crew payloads.
pub async fn summaries_by_ids(pool: &DbPool, ids: &[Uuid]) -> AppResult<Vec<FlightSummary>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("{FLIGHT_SELECT} WHERE f.id = ANY($1) {FLIGHT_GROUP}");
    let flights = sqlx::query_as::<_, FlightSummary>(&sql)
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(flights)
}

pub async fn create_flight(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFlightRequest,
) -> AppResult<ApiResponse<FlightSummary>> {
    ensure_admin(user)?;

    if Routes::find_by_id(payload.route_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(FieldErrors::single(
            "route_id",
            format!("route {} does not exist", payload.route_id),
        )));
    }
    if Airplanes::find_by_id(payload.airplane_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(FieldErrors::single(
            "airplane_id",
            format!("airplane {} does not exist", payload.airplane_id),
        )));
    }
    if payload.arrival_time <= payload.departure_time {
        return Err(AppError::Validation(FieldErrors::single(
            "arrival_time",
            "arrival time must be after departure time",
        )));
    }

    let txn = state.orm.begin().await?;

    let flight = FlightActive {
        id: Set(Uuid::new_v4()),
        route_id: Set(payload.route_id),
        airplane_id: Set(payload.airplane_id),
        departure_time: Set(payload.departure_time.into()),
        arrival_time: Set(payload.arrival_time.into()),
    }
    .insert(&txn)
    .await;
    let flight = match flight {
        Ok(f) => f,
        Err(err) => {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(AppError::Conflict(
                    "a flight with this route, airplane and schedule already exists".into(),
                ));
            }
            return Err(err.into());
        }
    };

    if let Some(crew_ids) = &payload.crew_ids {
        assign_crew(&txn, flight.id, crew_ids).await?;
    }

    txn.commit().await?;

    let summary = summary_by_id(&state.pool, flight.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Flight created",
        summary,
        Some(Meta::empty()),
    ))
}

pub async fn update_flight(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateFlightRequest,
) -> AppResult<ApiResponse<FlightSummary>> {
    ensure_admin(user)?;

    let existing = Flights::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(f) => f,
        None => return Err(AppError::NotFound),
    };

    let txn = state.orm.begin().await?;

    let mut active: FlightActive = existing.into();
    if let Some(route_id) = payload.route_id {
        active.route_id = Set(route_id);
    }
    if let Some(airplane_id) = payload.airplane_id {
        active.airplane_id = Set(airplane_id);
    }
    if let Some(departure_time) = payload.departure_time {
        active.departure_time = Set(departure_time.into());
    }
    if let Some(arrival_time) = payload.arrival_time {
        active.arrival_time = Set(arrival_time.into());
    }

    if let Err(err) = active.update(&txn).await {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return Err(AppError::Conflict(
                "a flight with this route, airplane and schedule already exists".into(),
            ));
        }
        return Err(err.into());
    }

    if let Some(crew_ids) = &payload.crew_ids {
        CrewFlights::delete_many()
            .filter(CrewFlightCol::FlightId.eq(id))
            .exec(&txn)
            .await?;
        assign_crew(&txn, id, crew_ids).await?;
    }

    txn.commit().await?;

    let summary = summary_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Flight updated",
        summary,
        Some(Meta::empty()),
    ))
}

pub async fn delete_flight(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let result = Flights::delete_by_id(id).exec(&state.orm).await;
    match result {
        Ok(res) if res.rows_affected == 0 => Err(AppError::NotFound),
        Ok(_) => Ok(()),
        Err(err) => {
            if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                return Err(AppError::Conflict(
                    "flight has sold tickets and cannot be deleted".into(),
                ));
            }
            Err(err.into())
        }
    }
}

async fn assign_crew<C: sea_orm::ConnectionTrait>(
    conn: &C,
    flight_id: Uuid,
    crew_ids: &[Uuid],
) -> AppResult<()> {
    for crew_id in crew_ids {
        if Crews::find_by_id(*crew_id).one(conn).await?.is_none() {
            return Err(AppError::Validation(FieldErrors::single(
                "crew_ids",
                format!("crew member {crew_id} does not exist"),
            )));
        }
        CrewFlightActive {
            crew_id: Set(*crew_id),
            flight_id: Set(flight_id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}
