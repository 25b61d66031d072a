//! Querying strategy: let the database count and slice.

use log::debug;
use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::params_from_iter;

use super::PageSource;
use super::PageWindow;
use super::PagedQuery;
use crate::error::SourceError;

type RowMapper<T> = Box<dyn Fn(&Row<'_>) -> rusqlite::Result<T>>;

/// A page source that runs a bounded query for every reload.
///
/// Only the visible page is ever held in memory. The total is re-counted
/// alongside each page fetch and cached until the next reload, so
/// [`total`](PageSource::total) stays cheap for the pager's repeated calls.
///
/// # Example
///
/// ```
/// use governance_lib::paging::{OrderBy, PagedQuery, Pager, QueryingSource};
/// use rusqlite::Connection;
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute_batch(
///     "CREATE TABLE bundle (name TEXT);
///      INSERT INTO bundle VALUES ('auditor'), ('engineer'), ('manager');",
/// ).unwrap();
///
/// let query = PagedQuery::table("bundle").order_by(OrderBy::asc("name"));
/// let source = QueryingSource::new(conn, query, |row| row.get::<_, String>("name")).unwrap();
/// let mut pager = Pager::new(2, source).unwrap();
///
/// pager.next_page().unwrap();
/// assert_eq!(pager.source().rows(), &["manager".to_string()]);
/// ```
pub struct QueryingSource<T> {
    conn: Connection,
    query: PagedQuery,
    mapper: RowMapper<T>,
    rows: Vec<T>,
    total: usize,
}

impl<T> QueryingSource<T> {
    /// Creates a source and runs the initial count.
    ///
    /// No rows are fetched until the owning pager reloads.
    pub fn new(
        conn: Connection,
        query: PagedQuery,
        mapper: impl Fn(&Row<'_>) -> rusqlite::Result<T> + 'static,
    ) -> Result<Self, SourceError> {
        let mut source = Self {
            conn,
            query,
            mapper: Box::new(mapper),
            rows: Vec::new(),
            total: 0,
        };
        source.total = source.count()?;
        Ok(source)
    }

    /// Rows loaded by the last reload.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Takes the loaded rows, leaving the source empty until the next reload.
    pub fn take_rows(&mut self) -> Vec<T> {
        std::mem::take(&mut self.rows)
    }

    pub fn query(&self) -> &PagedQuery {
        &self.query
    }

    /// Swaps in a new query (typically a new filter) and re-counts.
    ///
    /// The owning pager's offset is meaningless afterwards; reset it.
    pub fn set_query(&mut self, query: PagedQuery) -> Result<(), SourceError> {
        self.query = query;
        self.total = self.count()?;
        self.rows.clear();
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs the count query against the database, bypassing the cache.
    pub fn count(&self) -> Result<usize, SourceError> {
        let (sql, params) = self.query.count_sql();
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn fetch(&self, window: PageWindow) -> Result<Vec<T>, SourceError> {
        let (sql, params) = self.query.page_sql(window.offset, window.limit);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| (self.mapper)(row))?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }
}

impl<T> PageSource for QueryingSource<T> {
    fn total(&self) -> usize {
        self.total
    }

    fn reload(&mut self, window: PageWindow) -> Result<(), SourceError> {
        let total = self.count()?;
        let rows = self.fetch(window)?;
        debug!(
            "Fetched {} of {} rows at offset {}",
            rows.len(),
            total,
            window.offset
        );
        self.total = total;
        self.rows = rows;
        Ok(())
    }
}

impl<T> std::fmt::Debug for QueryingSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryingSource")
            .field("query", &self.query)
            .field("rows", &self.rows.len())
            .field("total", &self.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Filter;
    use crate::paging::OrderBy;

    fn seeded(count: i64) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE identity (id INTEGER PRIMARY KEY, name TEXT NOT NULL, inactive INTEGER NOT NULL)",
            [],
        )
        .unwrap();
        for id in 1..=count {
            conn.execute(
                "INSERT INTO identity (id, name, inactive) VALUES (?1, ?2, ?3)",
                rusqlite::params![id, format!("user{:03}", id), id % 5 == 0],
            )
            .unwrap();
        }
        conn
    }

    fn source(conn: Connection, query: PagedQuery) -> QueryingSource<i64> {
        QueryingSource::new(conn, query, |row| row.get("id")).unwrap()
    }

    #[test]
    fn test_initial_count_without_rows() {
        let source = source(seeded(12), PagedQuery::table("identity"));
        assert_eq!(source.total(), 12);
        assert!(source.rows().is_empty());
    }

    #[test]
    fn test_reload_fetches_bounded_window() {
        let query = PagedQuery::table("identity")
            .select(&["id"])
            .filter(Filter::eq("inactive", 0i64))
            .order_by(OrderBy::asc("id"));
        let mut source = source(seeded(12), query);
        assert_eq!(source.total(), 10);

        source.reload(PageWindow::new(3, 4)).unwrap();
        assert_eq!(source.rows(), &[4, 6, 7, 8]);
    }

    #[test]
    fn test_reload_picks_up_out_of_band_changes() {
        let mut source = source(seeded(6), PagedQuery::table("identity").order_by(OrderBy::asc("id")));
        source
            .connection()
            .execute("DELETE FROM identity WHERE id <= 2", [])
            .unwrap();
        assert_eq!(source.total(), 6);

        source.reload(PageWindow::new(0, 10)).unwrap();
        assert_eq!(source.total(), 4);
        assert_eq!(source.take_rows(), vec![3, 4, 5, 6]);
        assert!(source.rows().is_empty());
    }

    #[test]
    fn test_set_query_recounts() {
        let mut source = source(seeded(9), PagedQuery::table("identity"));
        source
            .set_query(PagedQuery::table("identity").filter(Filter::contains("name", "00")))
            .unwrap();
        assert_eq!(source.total(), 9);

        source
            .set_query(PagedQuery::table("identity").filter(Filter::ends_with("name", "7")))
            .unwrap();
        assert_eq!(source.total(), 1);
    }

    #[test]
    fn test_bad_table_is_query_error() {
        let conn = Connection::open_in_memory().unwrap();
        let result = QueryingSource::new(conn, PagedQuery::table("missing"), |row| row.get::<_, i64>(0));
        assert!(matches!(result, Err(SourceError::Query(_))));
    }
}
