use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned sector identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorId(pub i64);

/// Store-assigned class identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub i64);

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row of the `sectors` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorRecord {
    pub id: SectorId,
    pub name: String,
}

/// Row of the `classes` table. The parent sector is only referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub id: ClassId,
    pub class_name: String,
    pub description: String,
    pub sector_id: SectorId,
}

/// A class read together with its parent sector, as produced by the joined queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub class: ClassRecord,
    pub sector: SectorRecord,
}

/// Values for a sector row that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSector {
    pub name: String,
}

/// Values for a class row that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub class_name: String,
    pub description: String,
    pub sector_id: SectorId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sector,
    Class,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Sector => "sector",
            EntityKind::Class => "class",
        }
    }
}

/// How a missing record was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(i64),
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "{id}"),
            Lookup::Name(name) => write!(f, "{name}"),
        }
    }
}
