use super::reservation_service;
use crate::model::{Reservation, ReservationRegister};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use hotel_core::api::{ApiPath, ApiQuery, ApiResult, PageParams, ValidatedJson};
use hotel_core::{DbHandle, Page};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct StartDateParam {
    #[serde(rename = "start-date")]
    start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub(super) struct EndDateParam {
    #[serde(rename = "end-date")]
    end_date: NaiveDate,
}

/// `200` with every reservation, or `204` when there are none.
pub(super) async fn find_all(State(db): State<DbHandle>) -> ApiResult<Response> {
    let reservations = db.run(|conn| reservation_service(conn)?.find_all()).await?;
    if reservations.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(reservations).into_response())
}

pub(super) async fn find_by_id(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Reservation>> {
    let reservation = db
        .run(move |conn| reservation_service(conn)?.find_by_id(id))
        .await?;
    Ok(Json(reservation))
}

pub(super) async fn find_by_user_id(
    State(db): State<DbHandle>,
    ApiPath(user_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Reservation>>> {
    let page = params.request();
    let reservations = db
        .run(move |conn| reservation_service(conn)?.find_by_user_id(user_id, page))
        .await?;
    Ok(Json(reservations))
}

pub(super) async fn find_by_start_date(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<StartDateParam>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Reservation>>> {
    let page = params.request();
    let reservations = db
        .run(move |conn| reservation_service(conn)?.find_by_start_date(filter.start_date, page))
        .await?;
    Ok(Json(reservations))
}

pub(super) async fn find_by_end_date(
    State(db): State<DbHandle>,
    ApiQuery(filter): ApiQuery<EndDateParam>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Reservation>>> {
    let page = params.request();
    let reservations = db
        .run(move |conn| reservation_service(conn)?.find_by_end_date(filter.end_date, page))
        .await?;
    Ok(Json(reservations))
}

pub(super) async fn create(
    State(db): State<DbHandle>,
    ValidatedJson(body): ValidatedJson<ReservationRegister>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    let reservation = db
        .run(move |conn| reservation_service(conn)?.save(&body))
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

pub(super) async fn update(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<ReservationRegister>,
) -> ApiResult<Json<Reservation>> {
    let reservation = db
        .run(move |conn| reservation_service(conn)?.update(id, &body))
        .await?;
    Ok(Json(reservation))
}

pub(super) async fn delete(
    State(db): State<DbHandle>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    db.run(move |conn| reservation_service(conn)?.delete_by_id(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
