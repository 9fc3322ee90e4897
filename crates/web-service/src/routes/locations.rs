//! 作业地点接口

use crate::models::common::JsonBody;
use crate::models::err::AppError;
use crate::models::location::{LocationCreate, LocationInfo, LocationUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

#[utoipa::path(get, path = "/locations", tag = "locations", responses((status = 200, body = Vec<LocationInfo>)))]
pub async fn find_locations(State(state): State<AppState>) -> Result<Json<Vec<LocationInfo>>, AppError> {
    let locations = state.locations.find_locations().await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/locations/{id}", tag = "locations", responses((status = 200, body = LocationInfo)))]
pub async fn get_location(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<LocationInfo>, AppError> {
    Ok(Json(state.locations.get_location(id).await?.into()))
}

#[utoipa::path(post,
    path = "/locations",
    tag = "locations",
    request_body = LocationCreate,
    responses(
        (status = 201, description = "Created location", body = LocationInfo),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    JsonBody(location): JsonBody<LocationCreate>,
) -> Result<(StatusCode, Json<LocationInfo>), AppError> {
    debug!("📝 创建作业地点 {:#?}", location);
    location.validate()?;

    let location = state.locations.create_location(location.into()).await?;
    Ok((StatusCode::CREATED, Json(location.into())))
}

#[utoipa::path(patch, path = "/locations/{id}", tag = "locations", request_body = LocationUpdate,
    responses((status = 200, body = LocationInfo))
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<LocationUpdate>,
) -> Result<Json<LocationInfo>, AppError> {
    debug!("🔄 更新作业地点 {} {:#?}", id, info);
    info.validate()?;

    let location = state.locations.update_location(id, info.into()).await?;
    Ok(Json(location.into()))
}

/// 删除作业地点，仍有机车归属时返回 409
#[utoipa::path(delete,
    path = "/locations/{id}",
    tag = "locations",
    responses(
        (status = 200, body = LocationInfo),
        (status = 409, description = "Location still has locomotives")
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LocationInfo>, AppError> {
    Ok(Json(state.locations.delete_location(id).await?.into()))
}
