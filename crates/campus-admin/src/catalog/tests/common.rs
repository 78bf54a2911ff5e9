use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::catalog::{Catalog, ClassDto, ClassInput, SectorDto, SectorInput};
use crate::i18n::{Locale, MessageCatalog};
use crate::store::Database;

pub(super) fn catalog_with_locale(locale: Locale) -> Catalog {
    let db = Database::in_memory().expect("in-memory database");
    Catalog::new(Arc::new(db), MessageCatalog::new(locale))
}

pub(super) fn catalog() -> Catalog {
    catalog_with_locale(Locale::En)
}

pub(super) fn add_sector(catalog: &Catalog, name: &str) -> SectorDto {
    catalog
        .sectors
        .create(&SectorInput::named(name))
        .expect("sector created")
}

pub(super) fn add_class(catalog: &Catalog, name: &str, sector: &SectorDto) -> ClassDto {
    catalog
        .classes
        .create(&ClassInput::new(name, format!("{name} cohort"), sector.id.0))
        .expect("class created")
}

/// Informatique (L1, L2) and Gestion (M1).
pub(super) fn seeded_catalog() -> (Catalog, SectorDto, SectorDto) {
    let catalog = catalog();
    let informatique = add_sector(&catalog, "Informatique");
    let gestion = add_sector(&catalog, "Gestion");
    add_class(&catalog, "L2", &informatique);
    add_class(&catalog, "L1", &informatique);
    add_class(&catalog, "M1", &gestion);
    (catalog, informatique, gestion)
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub(super) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(super) fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
