use super::domain::SectorId;
use super::dto::{ClassInput, SectorInput};
use crate::i18n::{MessageCatalog, MessageKey};
use serde::Serialize;
use std::fmt;

pub const SECTOR_NAME_MAX: usize = 100;
pub const CLASS_NAME_MAX: usize = 150;
pub const DESCRIPTION_MAX: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field-level problem found in one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.fields.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSector {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidClass {
    pub class_name: String,
    pub description: String,
    pub sector_id: SectorId,
}

fn required_text(
    errors: &mut ValidationErrors,
    messages: &MessageCatalog,
    field: &'static str,
    value: Option<&str>,
    max: usize,
    (required, too_long): (MessageKey, MessageKey),
) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.push(field, messages.text(required));
    } else if value.chars().count() > max {
        errors.push(field, messages.render(too_long, &[&max]));
    }
    value.to_string()
}

pub fn validate_sector(
    input: &SectorInput,
    messages: &MessageCatalog,
) -> Result<ValidSector, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = required_text(
        &mut errors,
        messages,
        "name",
        input.name.as_deref(),
        SECTOR_NAME_MAX,
        (MessageKey::SectorNameRequired, MessageKey::SectorNameTooLong),
    );

    if errors.is_empty() {
        Ok(ValidSector { name })
    } else {
        Err(errors)
    }
}

pub fn validate_class(
    input: &ClassInput,
    messages: &MessageCatalog,
) -> Result<ValidClass, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let class_name = required_text(
        &mut errors,
        messages,
        "className",
        input.class_name.as_deref(),
        CLASS_NAME_MAX,
        (MessageKey::ClassNameRequired, MessageKey::ClassNameTooLong),
    );
    let description = required_text(
        &mut errors,
        messages,
        "description",
        input.description.as_deref(),
        DESCRIPTION_MAX,
        (
            MessageKey::ClassDescriptionRequired,
            MessageKey::ClassDescriptionTooLong,
        ),
    );
    if input.sector_id.is_none() {
        errors.push("idSector", messages.text(MessageKey::ClassSectorRequired));
    }

    match input.sector_id {
        Some(sector_id) if errors.is_empty() => Ok(ValidClass {
            class_name,
            description,
            sector_id: SectorId(sector_id),
        }),
        _ => Err(errors),
    }
}
