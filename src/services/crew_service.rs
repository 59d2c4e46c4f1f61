use sea_orm::ActiveValue::Set;
use sea_orm::ActiveModelTrait;
use uuid::Uuid;

use crate::{
    dto::crews::{CreateCrewRequest, CrewDetail, CrewList},
    entity::crews::ActiveModel as CrewActive,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Crew,
    response::{ApiResponse, Meta},
    routes::params::{CrewQuery, csv_ids},
    services::flight_service,
    state::AppState,
};

const CREW_SELECT: &str = r#"
    SELECT c.id, c.first_name, c.last_name,
           (SELECT COUNT(*) FROM crew_flights cf WHERE cf.crew_id = c.id) AS flight_count
    FROM crews c
"#;

pub async fn list_crews(state: &AppState, query: CrewQuery) -> AppResult<ApiResponse<CrewList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let flight_ids: Option<Vec<Uuid>> = match query.flights.as_deref() {
        Some(qs) => {
            let ids = csv_ids("flights", qs)?;
            if ids.is_empty() { None } else { Some(ids) }
        }
        None => None,
    };

    let filter = "WHERE ($1::uuid[] IS NULL OR EXISTS \
                  (SELECT 1 FROM crew_flights cf WHERE cf.crew_id = c.id AND cf.flight_id = ANY($1)))";

    let sql = format!("{CREW_SELECT} {filter} ORDER BY c.last_name, c.first_name LIMIT $2 OFFSET $3");
    let items = sqlx::query_as::<_, Crew>(&sql)
        .bind(&flight_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM crews c {filter}");
    let total: (i64,) = sqlx::query_as(&count_sql)
        .bind(&flight_ids)
        .fetch_one(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Crews",
        CrewList { items },
        Some(Meta::new(page, limit, total.0)),
    ))
}

pub async fn get_crew(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CrewDetail>> {
    let sql = format!("{CREW_SELECT} WHERE c.id = $1");
    let crew = sqlx::query_as::<_, Crew>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let crew = match crew {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let flight_ids: Vec<(Uuid,)> =
        sqlx::query_as("SELECT flight_id FROM crew_flights WHERE crew_id = $1")
            .bind(id)
            .fetch_all(&state.pool)
            .await?;
    let flight_ids: Vec<Uuid> = flight_ids.into_iter().map(|(id,)| id).collect();
    let flights = flight_service::summaries_by_ids(&state.pool, &flight_ids).await?;

    Ok(ApiResponse::success(
        "Crew",
        CrewDetail { crew, flights },
        Some(Meta::empty()),
    ))
}

pub async fn create_crew(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCrewRequest,
) -> AppResult<ApiResponse<Crew>> {
    ensure_admin(user)?;

    let crew = CrewActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Crew member created",
        Crew {
            id: crew.id,
            first_name: crew.first_name,
            last_name: crew.last_name,
            flight_count: 0,
        },
        Some(Meta::empty()),
    ))
}
