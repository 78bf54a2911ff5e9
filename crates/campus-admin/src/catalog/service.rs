use std::sync::Arc;

use rusqlite::Connection;
use tracing::{info, warn};

use super::dao::{classes, sectors};
use super::domain::{ClassId, EntityKind, Lookup, SectorId, SectorRecord};
use super::dto::{ClassDto, ClassInput, SectorDto, SectorInput};
use super::mapping;
use super::validation::{validate_class, validate_sector, ValidationErrors};
use crate::i18n::{MessageCatalog, MessageKey};
use crate::store::{Database, StoreError};

/// Error raised by the sector and class services.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{message}")]
    NotFound {
        entity: EntityKind,
        key: Lookup,
        message: String,
    },
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{message}")]
    Conflict { message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(StoreError::from(value))
    }
}

fn sector_not_found(messages: &MessageCatalog, id: SectorId) -> CatalogError {
    CatalogError::NotFound {
        entity: EntityKind::Sector,
        key: Lookup::Id(id.0),
        message: messages.render(MessageKey::SectorNotFound, &[&id]),
    }
}

fn class_not_found(messages: &MessageCatalog, id: ClassId) -> CatalogError {
    CatalogError::NotFound {
        entity: EntityKind::Class,
        key: Lookup::Id(id.0),
        message: messages.render(MessageKey::ClassNotFound, &[&id]),
    }
}

fn duplicate_sector(messages: &MessageCatalog, name: &str) -> CatalogError {
    CatalogError::Conflict {
        message: messages.render(MessageKey::SectorDuplicate, &[&name]),
    }
}

/// A UNIQUE violation that slipped past the name pre-check is still a conflict.
fn sector_write_error(messages: &MessageCatalog, name: &str, err: rusqlite::Error) -> CatalogError {
    let err = StoreError::from(err);
    if err.is_constraint_violation() {
        duplicate_sector(messages, name)
    } else {
        CatalogError::Store(err)
    }
}

fn resolve_sector(
    conn: &Connection,
    messages: &MessageCatalog,
    id: SectorId,
) -> Result<SectorRecord, CatalogError> {
    sectors::find_by_id(conn, id)?.ok_or_else(|| sector_not_found(messages, id))
}

/// Sector CRUD over the shared database.
#[derive(Clone)]
pub struct SectorService {
    db: Arc<Database>,
    messages: MessageCatalog,
}

impl SectorService {
    pub fn new(db: Arc<Database>, messages: MessageCatalog) -> Self {
        Self { db, messages }
    }

    /// Every sector, ordered by id.
    pub fn list_all(&self) -> Result<Vec<SectorDto>, CatalogError> {
        let records = self
            .db
            .read(|conn| Ok::<_, CatalogError>(sectors::list_ordered_by_id(conn)?))?;
        Ok(mapping::sectors_to_dtos(records))
    }

    pub fn get_by_id(&self, id: SectorId) -> Result<SectorDto, CatalogError> {
        let record = self.db.read(|conn| resolve_sector(conn, &self.messages, id))?;
        Ok(mapping::sector_to_dto(record))
    }

    /// Exact, case-sensitive match on the stored name.
    pub fn get_by_name(&self, name: &str) -> Result<SectorDto, CatalogError> {
        let record = self.db.read(|conn| {
            sectors::find_by_name(conn, name)?.ok_or_else(|| CatalogError::NotFound {
                entity: EntityKind::Sector,
                key: Lookup::Name(name.to_string()),
                message: self
                    .messages
                    .render(MessageKey::SectorNotFoundByName, &[&name]),
            })
        })?;
        Ok(mapping::sector_to_dto(record))
    }

    pub fn create(&self, input: &SectorInput) -> Result<SectorDto, CatalogError> {
        let valid = validate_sector(input, &self.messages).map_err(CatalogError::Validation)?;
        let messages = &self.messages;

        let stored = self.db.write(|tx| {
            if sectors::find_by_name(tx, &valid.name)?.is_some() {
                return Err(duplicate_sector(messages, &valid.name));
            }
            sectors::insert(tx, &mapping::new_sector(valid.clone()))
                .map_err(|err| sector_write_error(messages, &valid.name, err))
        })?;

        info!(sector_id = stored.id.0, name = %stored.name, "sector created");
        Ok(mapping::sector_to_dto(stored))
    }

    /// Renames a sector. The id always comes from the caller, never from a body.
    pub fn update(&self, id: SectorId, input: &SectorInput) -> Result<SectorDto, CatalogError> {
        let valid = validate_sector(input, &self.messages).map_err(CatalogError::Validation)?;
        let messages = &self.messages;

        let updated = self.db.write(|tx| {
            let mut record = resolve_sector(tx, messages, id)?;
            if let Some(other) = sectors::find_by_name(tx, &valid.name)? {
                if other.id != id {
                    return Err(duplicate_sector(messages, &valid.name));
                }
            }
            record.name = valid.name.clone();
            sectors::update(tx, &record)
                .map_err(|err| sector_write_error(messages, &valid.name, err))?;
            Ok::<_, CatalogError>(record)
        })?;

        info!(sector_id = id.0, name = %updated.name, "sector updated");
        Ok(mapping::sector_to_dto(updated))
    }

    /// Deletes the sector together with every class that references it.
    pub fn delete(&self, id: SectorId) -> Result<(), CatalogError> {
        let messages = &self.messages;
        let removed_classes = self.db.write(|tx| {
            if !sectors::exists(tx, id)? {
                return Err(sector_not_found(messages, id));
            }
            let dependents = classes::count_by_sector(tx, id)?;
            sectors::delete(tx, id)?;
            Ok::<_, CatalogError>(dependents)
        })?;

        if removed_classes > 0 {
            warn!(sector_id = id.0, removed_classes, "sector deleted with dependent classes");
        } else {
            info!(sector_id = id.0, "sector deleted");
        }
        Ok(())
    }
}

/// Class CRUD. Every write resolves the referenced sector inside the same
/// transaction as the class write.
#[derive(Clone)]
pub struct ClassService {
    db: Arc<Database>,
    messages: MessageCatalog,
}

impl ClassService {
    pub fn new(db: Arc<Database>, messages: MessageCatalog) -> Self {
        Self { db, messages }
    }

    /// Every class with its sector name, ordered by class name.
    pub fn list_all(&self) -> Result<Vec<ClassDto>, CatalogError> {
        let entries = self
            .db
            .read(|conn| Ok::<_, CatalogError>(classes::list_ordered_by_class_name(conn)?))?;
        Ok(mapping::entries_to_dtos(entries))
    }

    /// Classes of one sector; an unknown sector simply has none.
    pub fn list_by_sector(&self, sector_id: SectorId) -> Result<Vec<ClassDto>, CatalogError> {
        let entries = self
            .db
            .read(|conn| Ok::<_, CatalogError>(classes::list_by_sector(conn, sector_id)?))?;
        Ok(mapping::entries_to_dtos(entries))
    }

    pub fn get_by_id(&self, id: ClassId) -> Result<ClassDto, CatalogError> {
        let entry = self.db.read(|conn| {
            classes::find_by_id(conn, id)?.ok_or_else(|| class_not_found(&self.messages, id))
        })?;
        Ok(mapping::entry_to_dto(entry))
    }

    pub fn get_by_name(&self, class_name: &str) -> Result<ClassDto, CatalogError> {
        let entry = self.db.read(|conn| {
            classes::find_by_class_name(conn, class_name)?.ok_or_else(|| CatalogError::NotFound {
                entity: EntityKind::Class,
                key: Lookup::Name(class_name.to_string()),
                message: self
                    .messages
                    .render(MessageKey::ClassNotFoundByName, &[&class_name]),
            })
        })?;
        Ok(mapping::entry_to_dto(entry))
    }

    pub fn count(&self) -> Result<u64, CatalogError> {
        self.db.read(|conn| Ok::<_, CatalogError>(classes::count(conn)?))
    }

    pub fn create(&self, input: &ClassInput) -> Result<ClassDto, CatalogError> {
        let valid = validate_class(input, &self.messages).map_err(CatalogError::Validation)?;
        let messages = &self.messages;

        let dto = self.db.write(|tx| {
            let sector = resolve_sector(tx, messages, valid.sector_id)?;
            let stored = classes::insert(tx, &mapping::new_class(valid, &sector))?;
            Ok::<_, CatalogError>(mapping::class_to_dto(stored, sector))
        })?;

        info!(class_id = dto.id.0, sector_id = dto.id_sector.0, "class created");
        Ok(dto)
    }

    pub fn update(&self, id: ClassId, input: &ClassInput) -> Result<ClassDto, CatalogError> {
        let valid = validate_class(input, &self.messages).map_err(CatalogError::Validation)?;
        let messages = &self.messages;

        let dto = self.db.write(|tx| {
            let mut existing = classes::find_by_id(tx, id)?
                .ok_or_else(|| class_not_found(messages, id))?
                .class;
            let sector = resolve_sector(tx, messages, valid.sector_id)?;
            mapping::apply_class_update(&mut existing, valid, &sector);
            classes::update(tx, &existing)?;
            Ok::<_, CatalogError>(mapping::class_to_dto(existing, sector))
        })?;

        info!(class_id = id.0, sector_id = dto.id_sector.0, "class updated");
        Ok(dto)
    }

    pub fn delete(&self, id: ClassId) -> Result<(), CatalogError> {
        let messages = &self.messages;
        self.db.write(|tx| {
            if classes::delete(tx, id)? == 0 {
                return Err(class_not_found(messages, id));
            }
            Ok::<_, CatalogError>(())
        })?;

        info!(class_id = id.0, "class deleted");
        Ok(())
    }
}

/// Both services over one database, as handed to the HTTP layers.
#[derive(Clone)]
pub struct Catalog {
    pub sectors: SectorService,
    pub classes: ClassService,
    messages: MessageCatalog,
}

impl Catalog {
    pub fn new(db: Arc<Database>, messages: MessageCatalog) -> Self {
        Self {
            sectors: SectorService::new(db.clone(), messages),
            classes: ClassService::new(db, messages),
            messages,
        }
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }
}
