use super::domain::{ClassId, SectorId};
use serde::{Deserialize, Serialize};

/// Sector as exchanged over the API: `{ "id": 1, "name": "Informatique" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorDto {
    pub id: SectorId,
    pub name: String,
}

/// Class as exchanged over the API, with the parent sector denormalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDto {
    pub id: ClassId,
    pub class_name: String,
    pub description: String,
    pub id_sector: SectorId,
    pub sector_name: String,
}

/// Body of sector create/update requests. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SectorInput {
    #[serde(default)]
    pub name: Option<String>,
}

impl SectorInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Body of class create/update requests. Accepts both the transfer-object field
/// names (`className`, `idSector`) and the short ones (`name`, `sectorId`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassInput {
    #[serde(default, rename = "className", alias = "name")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "idSector", alias = "sectorId")]
    pub sector_id: Option<i64>,
}

impl ClassInput {
    pub fn new(class_name: impl Into<String>, description: impl Into<String>, sector_id: i64) -> Self {
        Self {
            class_name: Some(class_name.into()),
            description: Some(description.into()),
            sector_id: Some(sector_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountView {
    pub count: u64,
}
