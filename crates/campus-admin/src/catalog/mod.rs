//! Sectors, the classes that belong to them, and every layer between the
//! SQLite tables and the HTTP surface.

pub mod dao;
pub mod domain;
pub mod dto;
pub mod mapping;
pub mod pages;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ClassEntry, ClassId, ClassRecord, EntityKind, Lookup, SectorId, SectorRecord};
pub use dto::{ClassDto, ClassInput, SectorDto, SectorInput};
pub use pages::page_router;
pub use router::catalog_router;
pub use service::{Catalog, CatalogError, ClassService, SectorService};
pub use validation::{FieldError, ValidationErrors};
