use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Form;
use htmlescape::{encode_attribute, encode_minimal};
use serde::Deserialize;
use tracing::warn;

use super::flash::Flash;
use super::html::{delete_button, form_actions, select, text_input};
use super::{invalid_form, page, parse_id};
use crate::catalog::domain::ClassId;
use crate::catalog::dto::{ClassDto, ClassInput, SectorDto};
use crate::catalog::service::{Catalog, CatalogError};
use crate::catalog::validation::ValidationErrors;
use crate::error::AppError;
use crate::i18n::{MessageCatalog, MessageKey};

const LIST: &str = "/classes";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassForm {
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    id_sector: Option<String>,
}

impl ClassForm {
    fn input(&self) -> ClassInput {
        ClassInput {
            class_name: self.class_name.clone(),
            description: self.description.clone(),
            sector_id: parse_id(self.id_sector.as_deref()),
        }
    }
}

/// What the form shows: either a stored class or the values just submitted.
struct FormValues<'a> {
    class_name: &'a str,
    description: &'a str,
    id_sector: Option<String>,
}

impl<'a> From<&'a ClassDto> for FormValues<'a> {
    fn from(class: &'a ClassDto) -> Self {
        Self {
            class_name: &class.class_name,
            description: &class.description,
            id_sector: Some(class.id_sector.to_string()),
        }
    }
}

impl<'a> From<&'a ClassForm> for FormValues<'a> {
    fn from(form: &'a ClassForm) -> Self {
        Self {
            class_name: form.class_name.as_deref().unwrap_or_default(),
            description: form.description.as_deref().unwrap_or_default(),
            id_sector: form.id_sector.clone(),
        }
    }
}

fn form_body(
    messages: &MessageCatalog,
    action: &str,
    values: &FormValues<'_>,
    sectors: &[SectorDto],
    errors: &ValidationErrors,
) -> String {
    let options: Vec<(String, String)> = sectors
        .iter()
        .map(|sector| (sector.id.to_string(), sector.name.clone()))
        .collect();
    format!(
        "<form method=\"post\" action=\"{action}\">\n{}{}{}{}</form>\n",
        text_input(
            &messages.text(MessageKey::LabelClassName),
            "className",
            values.class_name,
            errors
        ),
        text_input(
            &messages.text(MessageKey::LabelDescription),
            "description",
            values.description,
            errors
        ),
        select(
            &messages.text(MessageKey::LabelSector),
            "idSector",
            &options,
            values.id_sector.as_deref(),
            errors
        ),
        form_actions(messages, LIST),
        action = encode_attribute(action),
    )
}

fn list_body(messages: &MessageCatalog, classes: &[ClassDto]) -> String {
    let edit = encode_minimal(&messages.text(MessageKey::ActionEdit));
    let mut rows = String::new();
    for class in classes {
        rows.push_str(&format!(
            "<tr><td>{name}</td><td>{description}</td><td>{sector}</td>\
<td><a href=\"/classes/{id}/edit\">{edit}</a> {delete}</td></tr>\n",
            name = encode_minimal(&class.class_name),
            description = encode_minimal(&class.description),
            sector = encode_minimal(&class.sector_name),
            id = class.id,
            delete = delete_button(messages, &format!("/classes/{}/delete", class.id)),
        ));
    }
    let header = |key: MessageKey| encode_minimal(&messages.text(key));
    format!(
        "<p><a href=\"/classes/new\">{add}</a></p>\n\
<table>\n<thead><tr><th>{class}</th><th>{description}</th><th>{sector}</th><th></th></tr></thead>\n\
<tbody>\n{rows}</tbody>\n</table>\n",
        add = header(MessageKey::PageClassAdd),
        class = header(MessageKey::LabelClass),
        description = header(MessageKey::LabelDescription),
        sector = header(MessageKey::LabelSector),
    )
}

/// Renders a class form; the sector dropdown is reloaded on every render.
fn render_form(
    catalog: &Catalog,
    headers: Option<&HeaderMap>,
    title: MessageKey,
    action: &str,
    values: &FormValues<'_>,
    errors: &ValidationErrors,
) -> Response {
    let sectors = match catalog.sectors.list_all() {
        Ok(sectors) => sectors,
        Err(err) => return AppError::from(err).into_response(),
    };
    let messages = catalog.messages();
    let body = form_body(messages, action, values, &sectors, errors);
    let title = messages.text(title);
    match headers {
        Some(headers) => page(catalog, headers, &title, &body),
        None => invalid_form(catalog, &title, &body),
    }
}

pub(crate) async fn list(State(catalog): State<Catalog>, headers: HeaderMap) -> Response {
    match catalog.classes.list_all() {
        Ok(classes) => {
            let messages = catalog.messages();
            let title = messages.text(MessageKey::PageClasses);
            page(&catalog, &headers, &title, &list_body(messages, &classes))
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn new_form(State(catalog): State<Catalog>, headers: HeaderMap) -> Response {
    let values = FormValues {
        class_name: "",
        description: "",
        id_sector: None,
    };
    render_form(
        &catalog,
        Some(&headers),
        MessageKey::PageClassAdd,
        "/classes/new",
        &values,
        &ValidationErrors::default(),
    )
}

pub(crate) async fn create(State(catalog): State<Catalog>, Form(form): Form<ClassForm>) -> Response {
    let messages = *catalog.messages();
    match catalog.classes.create(&form.input()) {
        Ok(_) => Flash::success(messages.text(MessageKey::ClassCreated)).redirect(LIST),
        Err(CatalogError::Validation(errors)) => render_form(
            &catalog,
            None,
            MessageKey::PageClassAdd,
            "/classes/new",
            &FormValues::from(&form),
            &errors,
        ),
        Err(err) => {
            warn!(error = %err, "class creation from form failed");
            let message = messages.render(MessageKey::ClassCreateFailed, &[&err]);
            Flash::error(message).redirect(LIST)
        }
    }
}

pub(crate) async fn edit_form(
    State(catalog): State<Catalog>,
    Path(class_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    match catalog.classes.get_by_id(ClassId(class_id)) {
        Ok(class) => render_form(
            &catalog,
            Some(&headers),
            MessageKey::PageClassEdit,
            &format!("/classes/{}/edit", class.id),
            &FormValues::from(&class),
            &ValidationErrors::default(),
        ),
        Err(err @ CatalogError::NotFound { .. }) => Flash::error(err.to_string()).redirect(LIST),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn update(
    State(catalog): State<Catalog>,
    Path(class_id): Path<i64>,
    Form(form): Form<ClassForm>,
) -> Response {
    let messages = *catalog.messages();
    match catalog.classes.update(ClassId(class_id), &form.input()) {
        Ok(_) => Flash::success(messages.text(MessageKey::ClassUpdated)).redirect(LIST),
        Err(CatalogError::Validation(errors)) => render_form(
            &catalog,
            None,
            MessageKey::PageClassEdit,
            &format!("/classes/{class_id}/edit"),
            &FormValues::from(&form),
            &errors,
        ),
        Err(err) => {
            warn!(error = %err, class_id, "class update from form failed");
            let message = messages.render(MessageKey::ClassUpdateFailed, &[&err]);
            Flash::error(message).redirect(LIST)
        }
    }
}

pub(crate) async fn delete(State(catalog): State<Catalog>, Path(class_id): Path<i64>) -> Response {
    match catalog.classes.delete(ClassId(class_id)) {
        Ok(()) => Flash::success(catalog.messages().text(MessageKey::ClassDeleted)).redirect(LIST),
        Err(err) => {
            if !err.is_not_found() {
                warn!(error = %err, class_id, "class deletion failed");
            }
            Flash::error(err.to_string()).redirect(LIST)
        }
    }
}
