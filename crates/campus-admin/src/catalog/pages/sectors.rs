use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Form;
use htmlescape::encode_minimal;
use serde::Deserialize;
use tracing::warn;

use super::flash::Flash;
use super::html::{delete_button, form_actions, text_input};
use super::{invalid_form, page, parse_id};
use crate::catalog::domain::SectorId;
use crate::catalog::dto::{SectorDto, SectorInput};
use crate::catalog::service::{Catalog, CatalogError};
use crate::catalog::validation::ValidationErrors;
use crate::error::AppError;
use crate::i18n::{MessageCatalog, MessageKey};

const LIST: &str = "/sectors";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SectorForm {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

fn form_body(
    messages: &MessageCatalog,
    id: Option<SectorId>,
    name: &str,
    errors: &ValidationErrors,
) -> String {
    let hidden_id = id
        .map(|id| format!("<input type=\"hidden\" name=\"id\" value=\"{id}\">\n"))
        .unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"/sectors/save\">\n{hidden_id}{}{}</form>\n",
        text_input(&messages.text(MessageKey::LabelName), "name", name, errors),
        form_actions(messages, LIST),
    )
}

fn list_body(messages: &MessageCatalog, sectors: &[SectorDto]) -> String {
    let edit = encode_minimal(&messages.text(MessageKey::ActionEdit));
    let mut rows = String::new();
    for sector in sectors {
        rows.push_str(&format!(
            "<tr><td>{name}</td><td><a href=\"/sectors/{id}/edit\">{edit}</a> {delete}</td></tr>\n",
            name = encode_minimal(&sector.name),
            id = sector.id,
            delete = delete_button(messages, &format!("/sectors/{}/delete", sector.id)),
        ));
    }
    format!(
        "<p><a href=\"/sectors/new\">{add}</a></p>\n\
<table>\n<thead><tr><th>{name}</th><th></th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n",
        add = encode_minimal(&messages.text(MessageKey::PageSectorAdd)),
        name = encode_minimal(&messages.text(MessageKey::LabelName)),
    )
}

pub(crate) async fn list(State(catalog): State<Catalog>, headers: HeaderMap) -> Response {
    match catalog.sectors.list_all() {
        Ok(sectors) => {
            let messages = catalog.messages();
            let title = messages.text(MessageKey::PageSectors);
            page(&catalog, &headers, &title, &list_body(messages, &sectors))
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn new_form(State(catalog): State<Catalog>, headers: HeaderMap) -> Response {
    let messages = catalog.messages();
    let body = form_body(messages, None, "", &ValidationErrors::default());
    page(&catalog, &headers, &messages.text(MessageKey::PageSectorAdd), &body)
}

pub(crate) async fn edit_form(
    State(catalog): State<Catalog>,
    Path(sector_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    match catalog.sectors.get_by_id(SectorId(sector_id)) {
        Ok(sector) => {
            let messages = catalog.messages();
            let body = form_body(
                messages,
                Some(sector.id),
                &sector.name,
                &ValidationErrors::default(),
            );
            page(&catalog, &headers, &messages.text(MessageKey::PageSectorEdit), &body)
        }
        Err(err @ CatalogError::NotFound { .. }) => Flash::error(err.to_string()).redirect(LIST),
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Creates when the form carries no id, renames otherwise.
pub(crate) async fn save(State(catalog): State<Catalog>, Form(form): Form<SectorForm>) -> Response {
    let messages = *catalog.messages();
    let id = parse_id(form.id.as_deref()).map(SectorId);
    let input = SectorInput {
        name: form.name.clone(),
    };

    let outcome = match id {
        Some(id) => catalog
            .sectors
            .update(id, &input)
            .map(|_| MessageKey::SectorUpdated),
        None => catalog
            .sectors
            .create(&input)
            .map(|_| MessageKey::SectorCreated),
    };

    match outcome {
        Ok(key) => Flash::success(messages.text(key)).redirect(LIST),
        Err(CatalogError::Validation(errors)) => {
            let title = if id.is_some() {
                MessageKey::PageSectorEdit
            } else {
                MessageKey::PageSectorAdd
            };
            let name = form.name.unwrap_or_default();
            let body = form_body(&messages, id, &name, &errors);
            invalid_form(&catalog, &messages.text(title), &body)
        }
        Err(err) => {
            warn!(error = %err, "sector form submission failed");
            let message = messages.render(MessageKey::SectorSaveFailed, &[&err]);
            Flash::error(message).redirect(LIST)
        }
    }
}

pub(crate) async fn delete(State(catalog): State<Catalog>, Path(sector_id): Path<i64>) -> Response {
    match catalog.sectors.delete(SectorId(sector_id)) {
        Ok(()) => Flash::success(catalog.messages().text(MessageKey::SectorDeleted)).redirect(LIST),
        Err(err) => {
            if !err.is_not_found() {
                warn!(error = %err, sector_id, "sector deletion failed");
            }
            Flash::error(err.to_string()).redirect(LIST)
        }
    }
}
