use super::room_service;
use crate::model::{Room, RoomRegister, RoomState, RoomType};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hotel_core::api::{ApiPath, ApiQuery, ApiResult, PageParams, ValidatedJson};
use hotel_core::{DbHandle, Page};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct PriceByNight {
    #[serde(rename = "price-by-night")]
    price_by_night: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoomTypeParam {
    #[serde(rename = "room-type")]
    room_type: RoomType,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoomStateParam {
    #[serde(rename = "room-state")]
    room_state: RoomState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct RoomTypeAndStateParams {
    room_type: RoomType,
    room_state: RoomState,
}

pub(super) async fn find_all(
    State(db): State<DbHandle>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db.run(move |conn| room_service(conn)?.find_all(page)).await?;
    Ok(Json(rooms))
}

pub(super) async fn find_by_id(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Room>> {
    let room = db.run(move |conn| room_service(conn)?.find_by_id(id)).await?;
    Ok(Json(room))
}

pub(super) async fn create(
    State(db): State<DbHandle>,
    ValidatedJson(body): ValidatedJson<RoomRegister>,
) -> ApiResult<(StatusCode, Json<Room>)> {
    let room = db.run(move |conn| room_service(conn)?.save(&body)).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

pub(super) async fn update(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<RoomRegister>,
) -> ApiResult<Json<Room>> {
    let room = db
        .run(move |conn| room_service(conn)?.update(id, &body))
        .await?;
    Ok(Json(room))
}

pub(super) async fn delete(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    db.run(move |conn| room_service(conn)?.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn find_by_price_by_night_between(
    State(db): State<DbHandle>,
    ApiQuery(range): ApiQuery<PriceRange>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db
        .run(move |conn| {
            room_service(conn)?.find_by_price_by_night_between(range.min, range.max, page)
        })
        .await?;
    Ok(Json(rooms))
}

pub(super) async fn find_by_price_by_night_greater_than(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<PriceByNight>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db
        .run(move |conn| {
            room_service(conn)?.find_by_price_by_night_greater_than(filter.price_by_night, page)
        })
        .await?;
    Ok(Json(rooms))
}

pub(super) async fn find_by_price_by_night_less_than(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<PriceByNight>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db
        .run(move |conn| {
            room_service(conn)?.find_by_price_by_night_less_than(filter.price_by_night, page)
        })
        .await?;
    Ok(Json(rooms))
}

pub(super) async fn find_by_room_type(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<RoomTypeParam>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db
        .run(move |conn| room_service(conn)?.find_by_room_type(filter.room_type, page))
        .await?;
    Ok(Json(rooms))
}

pub(super) async fn find_by_room_state(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<RoomStateParam>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db
        .run(move |conn| room_service(conn)?.find_by_room_state(filter.room_state, page))
        .await?;
    Ok(Json(rooms))
}

pub(super) async fn find_by_room_type_and_room_state(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<RoomTypeAndStateParams>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Room>>> {
    let page = params.request();
    let rooms = db
        .run(move |conn| {
            room_service(conn)?.find_by_room_type_and_room_state(
                filter.room_type,
                filter.room_state,
                page,
            )
        })
        .await?;
    Ok(Json(rooms))
}
