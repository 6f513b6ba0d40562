use super::room_feature_service;
use crate::model::{RoomFeature, RoomFeatureRegister};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hotel_core::api::{ApiPath, ApiQuery, ApiResult, PageParams, ValidatedJson};
use hotel_core::{DbHandle, Page};

pub(super) async fn find_all_pageable(
    State(db): State<DbHandle>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<RoomFeature>>> {
    let page = params.request();
    let features = db
        .run(move |conn| room_feature_service(conn)?.find_all_pageable(page))
        .await?;
    Ok(Json(features))
}

pub(super) async fn find_all(State(db): State<DbHandle>) -> ApiResult<Json<Vec<RoomFeature>>> {
    let features = db
        .run(|conn| room_feature_service(conn)?.find_all())
        .await?;
    Ok(Json(features))
}

pub(super) async fn find_by_id(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<RoomFeature>> {
    let feature = db
        .run(move |conn| room_feature_service(conn)?.find_by_id(id))
        .await?;
    Ok(Json(feature))
}

pub(super) async fn create(
    State(db): State<DbHandle>,
    ValidatedJson(body): ValidatedJson<RoomFeatureRegister>,
) -> ApiResult<(StatusCode, Json<RoomFeature>)> {
    let feature = db
        .run(move |conn| room_feature_service(conn)?.save(&body))
        .await?;
    Ok((StatusCode::CREATED, Json(feature)))
}

pub(super) async fn update(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<RoomFeatureRegister>,
) -> ApiResult<Json<RoomFeature>> {
    let feature = db
        .run(move |conn| room_feature_service(conn)?.update(id, &body))
        .await?;
    Ok(Json(feature))
}

pub(super) async fn delete(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    db.run(move |conn| room_feature_service(conn)?.delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
