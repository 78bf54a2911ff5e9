//! Server-rendered list/add/edit pages with redirect-after-post.

mod classes;
pub mod flash;
mod html;
mod sectors;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use super::service::Catalog;
use flash::Flash;

pub use flash::FlashLevel;

pub fn page_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/sectors", get(sectors::list))
        .route("/sectors/new", get(sectors::new_form))
        .route("/sectors/save", post(sectors::save))
        .route("/sectors/:sector_id/edit", get(sectors::edit_form))
        .route("/sectors/:sector_id/delete", post(sectors::delete))
        .route("/classes", get(classes::list))
        .route("/classes/new", get(classes::new_form).post(classes::create))
        .route(
            "/classes/:class_id/edit",
            get(classes::edit_form).post(classes::update),
        )
        .route("/classes/:class_id/delete", post(classes::delete))
        .with_state(catalog)
}

async fn home() -> Redirect {
    Redirect::to("/sectors")
}

/// A full page; consumes the pending flash so it shows exactly once.
fn page(catalog: &Catalog, headers: &HeaderMap, title: &str, body: &str) -> Response {
    let flash = Flash::from_headers(headers);
    let html = html::layout(catalog.messages(), title, flash.as_ref(), body);
    let mut response = Html(html).into_response();
    if flash.is_some() {
        response
            .headers_mut()
            .append(header::SET_COOKIE, Flash::clear_cookie());
    }
    response
}

/// Re-rendered form after a validation failure.
fn invalid_form(catalog: &Catalog, title: &str, body: &str) -> Response {
    let html = html::layout(catalog.messages(), title, None, body);
    (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response()
}

/// Empty form fields post as `""`; treat those like missing values.
fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}
