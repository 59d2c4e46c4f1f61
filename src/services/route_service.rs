use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    dto::routes::{CreateRouteRequest, RouteList},
    entity::{airports::Entity as Airports, routes::ActiveModel as RouteActive},
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::Route,
    response::{ApiResponse, Meta},
    routes::params::{RouteQuery, csv_names},
    state::AppState,
};

const ROUTE_SELECT: &str = r#"
    SELECT r.id, src.name AS source, dst.name AS destination, r.distance
    FROM routes r
    JOIN airports src ON src.id = r.source_id
    JOIN airports dst ON dst.id = r.destination_id
    JOIN cities src_ci ON src_ci.id = src.closest_big_city_id
    JOIN countries src_co ON src_co.id = src_ci.country_id
    JOIN cities dst_ci ON dst_ci.id = dst.closest_big_city_id
    JOIN countries dst_co ON dst_co.id = dst_ci.country_id
"#;

const ROUTE_FILTER: &str = r#"
    WHERE ($1::text[] IS NULL OR src_co.name = ANY($1))
      AND ($2::text[] IS NULL OR src_ci.name = ANY($2))
      AND ($3::text[] IS NULL OR dst_co.name = ANY($3))
      AND ($4::text[] IS NULL OR dst_ci.name = ANY($4))
"#;

fn names(filter: &Option<String>) -> Option<Vec<String>> {
    filter
        .as_deref()
        .map(csv_names)
        .filter(|names| !names.is_empty())
}

pub async fn list_routes(state: &AppState, query: RouteQuery) -> AppResult<ApiResponse<RouteList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let dep_countries = names(&query.dep_countries);
    let dep_cities = names(&query.dep_cities);
    let dest_countries = names(&query.dest_countries);
    let dest_cities = names(&query.dest_cities);

    let sql = format!("{ROUTE_SELECT} {ROUTE_FILTER} ORDER BY src.name, dst.name LIMIT $5 OFFSET $6");
    let items = sqlx::query_as::<_, Route>(&sql)
        .bind(&dep_countries)
        .bind(&dep_cities)
        .bind(&dest_countries)
        .bind(&dest_cities)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let count_sql = format!(
        "SELECT COUNT(*) FROM routes r \
         JOIN airports src ON src.id = r.source_id \
         JOIN airports dst ON dst.id = r.destination_id \
         JOIN cities src_ci ON src_ci.id = src.closest_big_city_id \
         JOIN countries src_co ON src_co.id = src_ci.country_id \
         JOIN cities dst_ci ON dst_ci.id = dst.closest_big_city_id \
         JOIN countries dst_co ON dst_co.id = dst_ci.country_id {ROUTE_FILTER}"
    );
    let total: (i64,) = sqlx::query_as(&count_sql)
        .bind(&dep_countries)
        .bind(&dep_cities)
        .bind(&dest_countries)
        .bind(&dest_cities)
        .fetch_one(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Routes",
        RouteList { items },
        Some(Meta::new(page, limit, total.0)),
    ))
}

pub async fn create_route(
    state: &AppState,
    user: &AuthUser,
    payload: CreateRouteRequest,
) -> AppResult<ApiResponse<Route>> {
    ensure_admin(user)?;

    if payload.source_id == payload.destination_id {
        return Err(AppError::Validation(FieldErrors::single(
            "destination_id",
            "destination must differ from source",
        )));
    }

    for (field, id) in [
        ("source_id", payload.source_id),
        ("destination_id", payload.destination_id),
    ] {
        if Airports::find_by_id(id).one(&state.orm).await?.is_none() {
            return Err(AppError::Validation(FieldErrors::single(
                field,
                format!("airport {id} does not exist"),
            )));
        }
    }

    if payload.distance < 1 {
        return Err(AppError::Validation(FieldErrors::single(
            "distance",
            "distance must be a positive integer",
        )));
    }

    let route = RouteActive {
        id: Set(Uuid::new_v4()),
        source_id: Set(payload.source_id),
        destination_id: Set(payload.destination_id),
        distance: Set(payload.distance),
    }
    .insert(&state.orm)
    .await?;

    let sql = format!("{ROUTE_SELECT} WHERE r.id = $1");
    let route = sqlx::query_as::<_, Route>(&sql)
        .bind(route.id)
        .fetch_one(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Route created",
        route,
        Some(Meta::empty()),
    ))
}
