use crate::catalog::domain::{ClassEntry, ClassId, ClassRecord, NewClass, SectorId, SectorRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_ENTRY: &str = "SELECT c.id, c.class_name, c.description, c.sector_id, s.name
     FROM classes c
     JOIN sectors s ON s.id = c.sector_id";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<ClassEntry> {
    let sector_id = SectorId(row.get(3)?);
    Ok(ClassEntry {
        class: ClassRecord {
            id: ClassId(row.get(0)?),
            class_name: row.get(1)?,
            description: row.get(2)?,
            sector_id,
        },
        sector: SectorRecord {
            id: sector_id,
            name: row.get(4)?,
        },
    })
}

fn query_entries(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<ClassEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, entry_from_row)?;
    rows.collect()
}

pub fn insert(conn: &Connection, class: &NewClass) -> rusqlite::Result<ClassRecord> {
    conn.execute(
        "INSERT INTO classes(class_name, description, sector_id) VALUES (?1, ?2, ?3)",
        params![class.class_name, class.description, class.sector_id.0],
    )?;
    Ok(ClassRecord {
        id: ClassId(conn.last_insert_rowid()),
        class_name: class.class_name.clone(),
        description: class.description.clone(),
        sector_id: class.sector_id,
    })
}

/// Returns the number of rows touched (0 when the id is unknown).
pub fn update(conn: &Connection, class: &ClassRecord) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE classes SET class_name = ?1, description = ?2, sector_id = ?3 WHERE id = ?4",
        params![
            class.class_name,
            class.description,
            class.sector_id.0,
            class.id.0
        ],
    )
}

pub fn delete(conn: &Connection, id: ClassId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM classes WHERE id = ?1", params![id.0])
}

pub fn find_by_id(conn: &Connection, id: ClassId) -> rusqlite::Result<Option<ClassEntry>> {
    conn.query_row(
        &format!("{SELECT_ENTRY} WHERE c.id = ?1"),
        params![id.0],
        entry_from_row,
    )
    .optional()
}

/// Class names are not unique; the lowest id wins.
pub fn find_by_class_name(
    conn: &Connection,
    class_name: &str,
) -> rusqlite::Result<Option<ClassEntry>> {
    conn.query_row(
        &format!("{SELECT_ENTRY} WHERE c.class_name = ?1 ORDER BY c.id LIMIT 1"),
        params![class_name],
        entry_from_row,
    )
    .optional()
}

pub fn list_ordered_by_class_name(conn: &Connection) -> rusqlite::Result<Vec<ClassEntry>> {
    query_entries(
        conn,
        &format!("{SELECT_ENTRY} ORDER BY c.class_name, c.id"),
        [],
    )
}

pub fn list_by_sector(conn: &Connection, sector_id: SectorId) -> rusqlite::Result<Vec<ClassEntry>> {
    query_entries(
        conn,
        &format!("{SELECT_ENTRY} WHERE c.sector_id = ?1 ORDER BY c.class_name, c.id"),
        params![sector_id.0],
    )
}

pub fn count(conn: &Connection) -> rusqlite::Result<u64> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM classes", [], |row| row.get(0))?;
    Ok(u64::try_from(total).unwrap_or_default())
}

pub fn count_by_sector(conn: &Connection, sector_id: SectorId) -> rusqlite::Result<u64> {
    let total: i64 = conn.query_row(
        "SELECT COUNT(*) FROM classes WHERE sector_id = ?1",
        params![sector_id.0],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(total).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::dao::sectors;
    use crate::catalog::domain::NewSector;
    use crate::store::{Database, StoreError};

    fn seeded() -> Database {
        let db = Database::in_memory().expect("database opens");
        db.write(|tx| {
            let info = sectors::insert(tx, &NewSector { name: "Informatique".into() })?;
            let gestion = sectors::insert(tx, &NewSector { name: "Gestion".into() })?;
            for (name, sector) in [("L2", info.id), ("L1", info.id), ("M1", gestion.id)] {
                insert(
                    tx,
                    &NewClass {
                        class_name: name.into(),
                        description: format!("{name} description"),
                        sector_id: sector,
                    },
                )?;
            }
            Ok::<_, StoreError>(())
        })
        .expect("seed data");
        db
    }

    #[test]
    fn listing_orders_by_class_name_and_joins_sector() {
        let db = seeded();
        let entries = db
            .read(|conn| list_ordered_by_class_name(conn).map_err(StoreError::from))
            .expect("list");

        let names: Vec<_> = entries.iter().map(|e| e.class.class_name.as_str()).collect();
        assert_eq!(names, ["L1", "L2", "M1"]);
        assert_eq!(entries[0].sector.name, "Informatique");
        assert_eq!(entries[2].sector.name, "Gestion");
    }

    #[test]
    fn filters_by_sector_and_counts() {
        let db = seeded();
        let (informatique, unknown, total, per_sector) = db
            .read(|conn| {
                Ok::<_, StoreError>((
                    list_by_sector(conn, SectorId(1))?,
                    list_by_sector(conn, SectorId(42))?,
                    count(conn)?,
                    count_by_sector(conn, SectorId(2))?,
                ))
            })
            .expect("queries run");

        assert_eq!(informatique.len(), 2);
        assert!(unknown.is_empty());
        assert_eq!(total, 3);
        assert_eq!(per_sector, 1);
    }

    #[test]
    fn finds_by_class_name() {
        let db = seeded();
        let (found, missing) = db
            .read(|conn| {
                Ok::<_, StoreError>((
                    find_by_class_name(conn, "M1")?,
                    find_by_class_name(conn, "M2")?,
                ))
            })
            .expect("queries run");

        let found = found.expect("M1 exists");
        assert_eq!(found.sector.name, "Gestion");
        assert!(missing.is_none());
    }

    #[test]
    fn deleting_a_sector_cascades_to_its_classes() {
        let db = seeded();
        let remaining = db
            .write(|tx| {
                sectors::delete(tx, SectorId(1))?;
                Ok::<_, StoreError>(count(tx)?)
            })
            .expect("cascade delete");
        assert_eq!(remaining, 1);
    }
}
