use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::domain::{ClassId, SectorId};
use super::dto::{ClassDto, ClassInput, CountView, SectorDto, SectorInput};
use super::service::Catalog;
use crate::error::AppError;

/// JSON REST endpoints for sectors and classes.
pub fn catalog_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/api/sectors", get(list_sectors).post(create_sector))
        .route(
            "/api/sectors/:sector_id",
            get(get_sector).put(update_sector).delete(delete_sector),
        )
        .route("/api/sectors/by-name/:name", get(get_sector_by_name))
        .route("/api/sectors/:sector_id/classes", get(sector_classes))
        .route("/api/classes", get(list_classes).post(create_class))
        .route("/api/classes/count", get(count_classes))
        .route(
            "/api/classes/:class_id",
            get(get_class).put(update_class).delete(delete_class),
        )
        .with_state(catalog)
}

/// Malformed or mistyped bodies are a client error, whatever the extractor thinks.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Non-numeric or out-of-range ids get the same JSON error body as everything else.
fn path_param<T>(param: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClassFilter {
    #[serde(rename = "sectorId")]
    sector_id: Option<i64>,
}

pub(crate) async fn list_sectors(
    State(catalog): State<Catalog>,
) -> Result<Json<Vec<SectorDto>>, AppError> {
    Ok(Json(catalog.sectors.list_all()?))
}

pub(crate) async fn get_sector(
    State(catalog): State<Catalog>,
    sector_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SectorDto>, AppError> {
    let sector_id = path_param(sector_id)?;
    Ok(Json(catalog.sectors.get_by_id(SectorId(sector_id))?))
}

pub(crate) async fn get_sector_by_name(
    State(catalog): State<Catalog>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<SectorDto>, AppError> {
    let name = path_param(name)?;
    Ok(Json(catalog.sectors.get_by_name(&name)?))
}

pub(crate) async fn sector_classes(
    State(catalog): State<Catalog>,
    sector_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ClassDto>>, AppError> {
    let sector_id = path_param(sector_id)?;
    let sector = catalog.sectors.get_by_id(SectorId(sector_id))?;
    Ok(Json(catalog.classes.list_by_sector(sector.id)?))
}

pub(crate) async fn create_sector(
    State(catalog): State<Catalog>,
    payload: Result<Json<SectorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<SectorDto>), AppError> {
    let input = json_body(payload)?;
    let created = catalog.sectors.create(&input)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_sector(
    State(catalog): State<Catalog>,
    sector_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SectorInput>, JsonRejection>,
) -> Result<Json<SectorDto>, AppError> {
    let sector_id = path_param(sector_id)?;
    let input = json_body(payload)?;
    Ok(Json(catalog.sectors.update(SectorId(sector_id), &input)?))
}

pub(crate) async fn delete_sector(
    State(catalog): State<Catalog>,
    sector_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let sector_id = path_param(sector_id)?;
    catalog.sectors.delete(SectorId(sector_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn list_classes(
    State(catalog): State<Catalog>,
    Query(filter): Query<ClassFilter>,
) -> Result<Json<Vec<ClassDto>>, AppError> {
    let classes = match filter.sector_id {
        Some(sector_id) => catalog.classes.list_by_sector(SectorId(sector_id))?,
        None => catalog.classes.list_all()?,
    };
    Ok(Json(classes))
}

pub(crate) async fn count_classes(
    State(catalog): State<Catalog>,
) -> Result<Json<CountView>, AppError> {
    let count = catalog.classes.count()?;
    Ok(Json(CountView { count }))
}

pub(crate) async fn get_class(
    State(catalog): State<Catalog>,
    class_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ClassDto>, AppError> {
    let class_id = path_param(class_id)?;
    Ok(Json(catalog.classes.get_by_id(ClassId(class_id))?))
}

pub(crate) async fn create_class(
    State(catalog): State<Catalog>,
    payload: Result<Json<ClassInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassDto>), AppError> {
    let input = json_body(payload)?;
    let created = catalog.classes.create(&input)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_class(
    State(catalog): State<Catalog>,
    class_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ClassInput>, JsonRejection>,
) -> Result<Json<ClassDto>, AppError> {
    let class_id = path_param(class_id)?;
    let input = json_body(payload)?;
    Ok(Json(catalog.classes.update(ClassId(class_id), &input)?))
}

pub(crate) async fn delete_class(
    State(catalog): State<Catalog>,
    class_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let class_id = path_param(class_id)?;
    catalog.classes.delete(ClassId(class_id))?;
    Ok(StatusCode::NO_CONTENT)
}
