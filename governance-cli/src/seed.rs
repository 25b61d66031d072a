//! Demo data: an identity table and a set of risk score bands.

use governance_lib::dto::BaseDto;
use governance_lib::dto::Uid;
use governance_lib::paging::OrderBy;
use governance_lib::paging::PagedQuery;
use rusqlite::Connection;
use rusqlite::Row;
use serde::Serialize;

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Adam", "Alan", "Alice", "Amanda", "Amy", "Andrew", "Angela", "Anne", "Barbara",
    "Betty", "Brian", "Carl", "Carol", "Catherine", "Charles", "Chris", "Daniel", "Debra", "Dennis",
];

const LAST_NAMES: &[&str] = &["Nichols", "Kennedy", "Bradley", "Ford", "Ross", "Cox", "Carter"];

const DEPARTMENTS: &[&str] = &["Accounting", "Engineering", "Operations", "Sales"];

/// A row of the identity list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub name: String,
    pub department: String,
    pub manager: bool,
}

impl Identity {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            department: row.get("department")?,
            manager: row.get("manager")?,
        })
    }
}

/// Creates an in-memory database with one identity per first/last name pair.
pub fn identities() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute(
        "CREATE TABLE identity (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            department TEXT NOT NULL,
            manager INTEGER NOT NULL
        )",
        [],
    )?;

    let mut insert =
        conn.prepare("INSERT INTO identity (name, department, manager) VALUES (?1, ?2, ?3)")?;
    for (i, first) in FIRST_NAMES.iter().enumerate() {
        for (j, last) in LAST_NAMES.iter().enumerate() {
            let department = DEPARTMENTS[(i + j) % DEPARTMENTS.len()];
            insert.execute(rusqlite::params![
                format!("{}.{}", first, last),
                department,
                j == 0
            ])?;
        }
    }
    drop(insert);
    Ok(conn)
}

/// The base query behind the identity list.
pub fn identity_query() -> PagedQuery {
    PagedQuery::table("identity")
        .select(&["name", "department", "manager"])
        .order_by(OrderBy::asc("name"))
}

/// One band of a risk score scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBand {
    uid: Uid,
    pub label: String,
    pub upper: u32,
}

impl ScoreBand {
    pub fn new(label: impl Into<String>, upper: u32) -> Self {
        Self {
            uid: Uid::new(),
            label: label.into(),
            upper,
        }
    }
}

impl BaseDto for ScoreBand {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.label)
    }
}

pub fn score_bands() -> Vec<ScoreBand> {
    vec![
        ScoreBand::new("Low", 250),
        ScoreBand::new("Medium Low", 500),
        ScoreBand::new("Medium High", 750),
        ScoreBand::new("High", 1000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_table_is_populated() {
        let conn = identities().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM identity", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count as usize, FIRST_NAMES.len() * LAST_NAMES.len());

        let managers: i64 = conn
            .query_row("SELECT COUNT(*) FROM identity WHERE manager = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(managers as usize, FIRST_NAMES.len());
    }

    #[test]
    fn test_band_clone_keeps_uid() {
        let band = ScoreBand::new("Low", 250);
        assert!(band.is_clone(&band.clone()));
        assert!(!band.is_clone(&ScoreBand::new("Low", 250)));
    }
}
