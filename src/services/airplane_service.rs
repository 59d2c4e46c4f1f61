use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::airplanes::{
        AirplaneList, AirplaneTypeList, CreateAirplaneRequest, CreateAirplaneTypeRequest,
    },
    dto::airports::UploadImageRequest,
    entity::{
        airplane_types::{
            ActiveModel as TypeActive, Column as TypeCol, Entity as AirplaneTypes,
            Model as TypeModel,
        },
        airplanes::{
            ActiveModel as AirplaneActive, Column as AirplaneCol, Entity as Airplanes,
            Model as AirplaneModel,
        },
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Airplane, AirplaneType},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    seating,
    state::AppState,
};

pub async fn list_airplane_types(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<AirplaneTypeList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = AirplaneTypes::find().order_by_asc(TypeCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(type_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Airplane types",
        AirplaneTypeList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn create_airplane_type(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirplaneTypeRequest,
) -> AppResult<ApiResponse<AirplaneType>> {
    ensure_admin(user)?;
    let airplane_type = TypeActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Airplane type created",
        type_from_entity(airplane_type),
        Some(Meta::empty()),
    ))
}

pub async fn list_airplanes(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<AirplaneList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Airplanes::find().order_by_asc(AirplaneCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(airplane_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Airplanes",
        AirplaneList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Cabin dimensions are validated here, at creation time, so every flight
/// assigned to the airplane has a well-formed seat universe.
pub async fn create_airplane(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirplaneRequest,
) -> AppResult<ApiResponse<Airplane>> {
    ensure_admin(user)?;

    if payload.rows < 1 {
        return Err(AppError::Validation(FieldErrors::single(
            "rows",
            "rows must be a positive integer",
        )));
    }
    if payload.seats_in_row < 1 {
        return Err(AppError::Validation(FieldErrors::single(
            "seats_in_row",
            "seats_in_row must be a positive integer",
        )));
    }

    if let Some(type_id) = payload.airplane_type_id {
        if AirplaneTypes::find_by_id(type_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(FieldErrors::single(
                "airplane_type_id",
                format!("airplane type {type_id} does not exist"),
            )));
        }
    }

    let airplane = AirplaneActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        rows: Set(payload.rows),
        seats_in_row: Set(payload.seats_in_row),
        airplane_type_id: Set(payload.airplane_type_id),
        image_url: Set(None),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Airplane created",
        airplane_from_entity(airplane),
        Some(Meta::empty()),
    ))
}

pub async fn upload_airplane_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UploadImageRequest,
) -> AppResult<ApiResponse<Airplane>> {
    ensure_admin(user)?;

    let existing = Airplanes::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let mut active: AirplaneActive = existing.into();
    active.image_url = Set(Some(payload.image_url));
    let airplane = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Image uploaded",
        airplane_from_entity(airplane),
        Some(Meta::empty()),
    ))
}

fn type_from_entity(model: TypeModel) -> AirplaneType {
    AirplaneType {
        id: model.id,
        name: model.name,
    }
}

fn airplane_from_entity(model: AirplaneModel) -> Airplane {
    Airplane {
        id: model.id,
        name: model.name,
        rows: model.rows,
        seats_in_row: model.seats_in_row,
        capacity: seating::capacity(model.rows, model.seats_in_row),
        airplane_type_id: model.airplane_type_id,
        image_url: model.image_url,
    }
}
