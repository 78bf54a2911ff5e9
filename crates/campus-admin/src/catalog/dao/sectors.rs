use crate::catalog::domain::{NewSector, SectorId, SectorRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_SECTOR: &str = "SELECT id, name FROM sectors";

fn sector_from_row(row: &Row<'_>) -> rusqlite::Result<SectorRecord> {
    Ok(SectorRecord {
        id: SectorId(row.get(0)?),
        name: row.get(1)?,
    })
}

pub fn insert(conn: &Connection, sector: &NewSector) -> rusqlite::Result<SectorRecord> {
    conn.execute("INSERT INTO sectors(name) VALUES (?1)", params![sector.name])?;
    Ok(SectorRecord {
        id: SectorId(conn.last_insert_rowid()),
        name: sector.name.clone(),
    })
}

/// Returns the number of rows touched (0 when the id is unknown).
pub fn update(conn: &Connection, sector: &SectorRecord) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE sectors SET name = ?1 WHERE id = ?2",
        params![sector.name, sector.id.0],
    )
}

pub fn delete(conn: &Connection, id: SectorId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM sectors WHERE id = ?1", params![id.0])
}

pub fn find_by_id(conn: &Connection, id: SectorId) -> rusqlite::Result<Option<SectorRecord>> {
    conn.query_row(
        &format!("{SELECT_SECTOR} WHERE id = ?1"),
        params![id.0],
        sector_from_row,
    )
    .optional()
}

pub fn find_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<SectorRecord>> {
    conn.query_row(
        &format!("{SELECT_SECTOR} WHERE name = ?1"),
        params![name],
        sector_from_row,
    )
    .optional()
}

pub fn exists(conn: &Connection, id: SectorId) -> rusqlite::Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM sectors WHERE id = ?1", params![id.0], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

pub fn list_ordered_by_id(conn: &Connection) -> rusqlite::Result<Vec<SectorRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_SECTOR} ORDER BY id"))?;
    let rows = stmt.query_map([], sector_from_row)?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    fn with_conn<T>(operation: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> T {
        let db = Database::in_memory().expect("database opens");
        db.write(|tx| operation(tx).map_err(crate::store::StoreError::from))
            .expect("dao operation succeeds")
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let (first, second) = with_conn(|conn| {
            let first = insert(conn, &NewSector { name: "Informatique".into() })?;
            let second = insert(conn, &NewSector { name: "Gestion".into() })?;
            Ok((first, second))
        });
        assert_eq!(first.id, SectorId(1));
        assert_eq!(second.id, SectorId(2));
    }

    #[test]
    fn lookups_return_none_when_absent() {
        let (by_id, by_name, present) = with_conn(|conn| {
            Ok((
                find_by_id(conn, SectorId(7))?,
                find_by_name(conn, "Nope")?,
                exists(conn, SectorId(7))?,
            ))
        });
        assert!(by_id.is_none());
        assert!(by_name.is_none());
        assert!(!present);
    }

    #[test]
    fn name_lookup_is_case_sensitive() {
        let (exact, other_case) = with_conn(|conn| {
            insert(conn, &NewSector { name: "Informatique".into() })?;
            Ok((
                find_by_name(conn, "Informatique")?,
                find_by_name(conn, "informatique")?,
            ))
        });
        assert!(exact.is_some());
        assert!(other_case.is_none());
    }

    #[test]
    fn update_and_delete_report_touched_rows() {
        let (updated, missing, deleted, listed) = with_conn(|conn| {
            let stored = insert(conn, &NewSector { name: "Gestion".into() })?;
            let renamed = SectorRecord {
                id: stored.id,
                name: "Gestion & Finance".into(),
            };
            let updated = update(conn, &renamed)?;
            let missing = update(
                conn,
                &SectorRecord {
                    id: SectorId(99),
                    name: "x".into(),
                },
            )?;
            let listed = list_ordered_by_id(conn)?;
            let deleted = delete(conn, stored.id)?;
            Ok((updated, missing, deleted, listed))
        });
        assert_eq!(updated, 1);
        assert_eq!(missing, 0);
        assert_eq!(deleted, 1);
        assert_eq!(listed[0].name, "Gestion & Finance");
    }
}
