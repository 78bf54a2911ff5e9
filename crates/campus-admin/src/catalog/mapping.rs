//! Field-by-field conversions between stored records and transfer objects.

use super::domain::{ClassEntry, ClassRecord, NewClass, NewSector, SectorRecord};
use super::dto::{ClassDto, SectorDto};
use super::validation::{ValidClass, ValidSector};

pub fn sector_to_dto(record: SectorRecord) -> SectorDto {
    SectorDto {
        id: record.id,
        name: record.name,
    }
}

pub fn sectors_to_dtos(records: Vec<SectorRecord>) -> Vec<SectorDto> {
    records.into_iter().map(sector_to_dto).collect()
}

pub fn new_sector(input: ValidSector) -> NewSector {
    NewSector { name: input.name }
}

/// Copies the parent sector's id and name onto the class view.
pub fn class_to_dto(class: ClassRecord, sector: SectorRecord) -> ClassDto {
    ClassDto {
        id: class.id,
        class_name: class.class_name,
        description: class.description,
        id_sector: sector.id,
        sector_name: sector.name,
    }
}

pub fn entry_to_dto(entry: ClassEntry) -> ClassDto {
    class_to_dto(entry.class, entry.sector)
}

pub fn entries_to_dtos(entries: Vec<ClassEntry>) -> Vec<ClassDto> {
    entries.into_iter().map(entry_to_dto).collect()
}

/// The sector must already be resolved; its id becomes the foreign key.
pub fn new_class(input: ValidClass, sector: &SectorRecord) -> NewClass {
    NewClass {
        class_name: input.class_name,
        description: input.description,
        sector_id: sector.id,
    }
}

pub fn apply_class_update(existing: &mut ClassRecord, input: ValidClass, sector: &SectorRecord) {
    existing.class_name = input.class_name;
    existing.description = input.description;
    existing.sector_id = sector.id;
}
