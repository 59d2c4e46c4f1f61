use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    dto::airports::{AirportList, CreateAirportRequest, UploadImageRequest},
    entity::{
        airports::{ActiveModel as AirportActive, Entity as Airports},
        cities::Entity as Cities,
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::Airport,
    response::{ApiResponse, Meta},
    routes::params::{AirportQuery, csv_names},
    state::AppState,
};

const AIRPORT_SELECT: &str = r#"
    SELECT ap.id, ap.name, ci.name AS closest_big_city, co.name AS country,
           ap.image_url,
           (SELECT COUNT(*) FROM routes r WHERE r.destination_id = ap.id) AS routes_count
    FROM airports ap
    JOIN cities ci ON ci.id = ap.closest_big_city_id
    JOIN countries co ON co.id = ci.country_id
"#;

const AIRPORT_FILTER: &str = r#"
    WHERE ($1::text[] IS NULL OR co.name = ANY($1))
      AND ($2::text[] IS NULL OR ci.name = ANY($2))
      AND ($3::text[] IS NULL OR EXISTS (
            SELECT 1 FROM routes r
            JOIN airports d ON d.id = r.destination_id
            JOIN cities dc ON dc.id = d.closest_big_city_id
            JOIN countries dco ON dco.id = dc.country_id
            WHERE r.source_id = ap.id AND dco.name = ANY($3)))
      AND ($4::text[] IS NULL OR EXISTS (
            SELECT 1 FROM routes r
            JOIN airports d ON d.id = r.destination_id
            JOIN cities dc ON dc.id = d.closest_big_city_id
            WHERE r.source_id = ap.id AND dc.name = ANY($4)))
"#;

fn names(filter: &Option<String>) -> Option<Vec<String>> {
    filter
        .as_deref()
        .map(csv_names)
        .filter(|names| !names.is_empty())
}

pub async fn list_airports(
    state: &AppState,
    query: AirportQuery,
) -> AppResult<ApiResponse<AirportList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let dep_countries = names(&query.dep_countries);
    let dep_cities = names(&query.dep_cities);
    let dest_countries = names(&query.dest_countries);
    let dest_cities = names(&query.dest_cities);

    let sql = format!("{AIRPORT_SELECT} {AIRPORT_FILTER} ORDER BY ap.name LIMIT $5 OFFSET $6");
    let items = sqlx::query_as::<_, Airport>(&sql)
        .bind(&dep_countries)
        .bind(&dep_cities)
        .bind(&dest_countries)
        .bind(&dest_cities)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let count_sql = format!(
        "SELECT COUNT(*) FROM airports ap \
         JOIN cities ci ON ci.id = ap.closest_big_city_id \
         JOIN countries co ON co.id = ci.country_id {AIRPORT_FILTER}"
    );
    let total: (i64,) = sqlx::query_as(&count_sql)
        .bind(&dep_countries)
        .bind(&dep_cities)
        .bind(&dest_countries)
        .bind(&dest_cities)
        .fetch_one(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Airports",
        AirportList { items },
        Some(Meta::new(page, limit, total.0)),
    ))
}

pub async fn get_airport(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Airport>> {
    let sql = format!("{AIRPORT_SELECT} WHERE ap.id = $1");
    let airport = sqlx::query_as::<_, Airport>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let airport = match airport {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Airport", airport, None))
}

pub async fn create_airport(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirportRequest,
) -> AppResult<ApiResponse<Airport>> {
    ensure_admin(user)?;

    if Cities::find_by_id(payload.closest_big_city_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(FieldErrors::single(
            "closest_big_city_id",
            format!("city {} does not exist", payload.closest_big_city_id),
        )));
    }

    let airport = AirportActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        closest_big_city_id: Set(payload.closest_big_city_id),
        image_url: Set(None),
    }
    .insert(&state.orm)
    .await?;

    get_created(state, airport.id, "Airport created").await
}

pub async fn upload_airport_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UploadImageRequest,
) -> AppResult<ApiResponse<Airport>> {
    ensure_admin(user)?;

    let existing = Airports::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let mut active: AirportActive = existing.into();
    active.image_url = Set(Some(payload.image_url));
    let airport = active.update(&state.orm).await?;

    get_created(state, airport.id, "Image uploaded").await
}

async fn get_created(
    state: &AppState,
    id: Uuid,
    message: &str,
) -> AppResult<ApiResponse<Airport>> {
    let sql = format!("{AIRPORT_SELECT} WHERE ap.id = $1");
    let airport = sqlx::query_as::<_, Airport>(&sql)
        .bind(id)
        .fetch_one(&state.pool)
        .await?;
    Ok(ApiResponse::success(message, airport, Some(Meta::empty())))
}
