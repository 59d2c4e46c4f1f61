use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, SqlErr};
use uuid::Uuid;

use crate::{
    dto::locations::{CityList, CountryList, CreateCityRequest, CreateCountryRequest},
    entity::{
        cities::{ActiveModel as CityActive, Column as CityCol, Entity as Cities},
        countries::{ActiveModel as CountryActive, Column as CountryCol, Entity as Countries},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::{City, Country},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_countries(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CountryList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Countries::find().order_by_asc(CountryCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Country {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(ApiResponse::success(
        "Countries",
        CountryList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn create_country(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCountryRequest,
) -> AppResult<ApiResponse<Country>> {
    ensure_admin(user)?;
    let active = CountryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
    };
    let country = match active.insert(&state.orm).await {
        Ok(c) => c,
        Err(err) => {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(AppError::Conflict("country already exists".into()));
            }
            return Err(err.into());
        }
    };

    Ok(ApiResponse::success(
        "Country created",
        Country {
            id: country.id,
            name: country.name,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_cities(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CityList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Cities::find().order_by_asc(CityCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| City {
            id: c.id,
            name: c.name,
            country_id: c.country_id,
        })
        .collect();

    Ok(ApiResponse::success(
        "Cities",
        CityList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn create_city(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCityRequest,
) -> AppResult<ApiResponse<City>> {
    ensure_admin(user)?;

    if Countries::find_by_id(payload.country_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(FieldErrors::single(
            "country_id",
            format!("country {} does not exist", payload.country_id),
        )));
    }

    let city = CityActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        country_id: Set(payload.country_id),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "City created",
        City {
            id: city.id,
            name: city.name,
            country_id: city.country_id,
        },
        Some(Meta::empty()),
    ))
}
