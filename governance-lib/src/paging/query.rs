//! SQL query description for the querying strategy.

use rusqlite::types::Value;

/// Keyword appended to an `ORDER BY` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

impl Direction {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// The `ORDER BY` clause of a [`PagedQuery`], as column/direction pairs in
/// priority order.
///
/// `LIMIT`/`OFFSET` windows are only stable over a total order, so end the
/// list with a unique column when the leading ones can tie.
///
/// # Example
///
/// ```
/// use governance_lib::paging::OrderBy;
///
/// let order = OrderBy::desc("score").then_asc("name");
/// assert_eq!(order.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    fields: Vec<(String, Direction)>,
}

impl OrderBy {
    fn by(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            fields: Vec::new(),
        }
        .then(field, direction)
    }

    fn then(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.fields.push((field.into(), direction));
        self
    }

    /// `ORDER BY field ASC`
    pub fn asc(field: impl Into<String>) -> Self {
        Self::by(field, Direction::Asc)
    }

    /// `ORDER BY field DESC`
    pub fn desc(field: impl Into<String>) -> Self {
        Self::by(field, Direction::Desc)
    }

    /// Breaks ties with `field ASC`.
    pub fn then_asc(self, field: impl Into<String>) -> Self {
        self.then(field, Direction::Asc)
    }

    /// Breaks ties with `field DESC`.
    pub fn then_desc(self, field: impl Into<String>) -> Self {
        self.then(field, Direction::Desc)
    }

    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }
}

/// A filter condition rendered into a parameterized SQL `WHERE` clause.
///
/// Values are always bound as parameters. Column names are quoted.
///
/// # Example
///
/// ```
/// use governance_lib::paging::Filter;
///
/// let filter = Filter::eq("inactive", 0i64)
///     .and_also(Filter::contains("name", "smith"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Ne(String, Value),
    Gt(String, Value),
    Ge(String, Value),
    Lt(String, Value),
    Le(String, Value),
    /// Case-insensitive substring match.
    Contains(String, String),
    StartsWith(String, String),
    EndsWith(String, String),
    IsNull(String),
    IsNotNull(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Ne(field.into(), value.into())
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gt(field.into(), value.into())
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Ge(field.into(), value.into())
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Lt(field.into(), value.into())
    }

    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Le(field.into(), value.into())
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains(field.into(), value.into())
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::StartsWith(field.into(), value.into())
    }

    pub fn ends_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::EndsWith(field.into(), value.into())
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Filter::IsNull(field.into())
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Filter::IsNotNull(field.into())
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Combines this filter with another using logical AND.
    pub fn and_also(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            _ => Filter::And(vec![self, other]),
        }
    }

    /// Combines this filter with another using logical OR.
    pub fn or_else(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut filters) => {
                filters.push(other);
                Filter::Or(filters)
            }
            _ => Filter::Or(vec![self, other]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Filter::Not(Box::new(self))
    }

    /// Appends this filter's SQL to `sql` and its values to `params`.
    pub(crate) fn render(&self, sql: &mut String, params: &mut Vec<Value>) {
        match self {
            Filter::Eq(field, value) => compare(sql, params, field, "=", value),
            Filter::Ne(field, value) => compare(sql, params, field, "<>", value),
            Filter::Gt(field, value) => compare(sql, params, field, ">", value),
            Filter::Ge(field, value) => compare(sql, params, field, ">=", value),
            Filter::Lt(field, value) => compare(sql, params, field, "<", value),
            Filter::Le(field, value) => compare(sql, params, field, "<=", value),
            Filter::Contains(field, text) => like(sql, params, field, format!("%{}%", escape_like(text))),
            Filter::StartsWith(field, text) => like(sql, params, field, format!("{}%", escape_like(text))),
            Filter::EndsWith(field, text) => like(sql, params, field, format!("%{}", escape_like(text))),
            Filter::IsNull(field) => {
                sql.push_str(&format!("{} IS NULL", quote_ident(field)));
            }
            Filter::IsNotNull(field) => {
                sql.push_str(&format!("{} IS NOT NULL", quote_ident(field)));
            }
            Filter::And(filters) => join(sql, params, filters, " AND ", "1 = 1"),
            Filter::Or(filters) => join(sql, params, filters, " OR ", "1 = 0"),
            Filter::Not(inner) => {
                sql.push_str("NOT (");
                inner.render(sql, params);
                sql.push(')');
            }
        }
    }
}

fn compare(sql: &mut String, params: &mut Vec<Value>, field: &str, op: &str, value: &Value) {
    sql.push_str(&format!("{} {} ?", quote_ident(field), op));
    params.push(value.clone());
}

fn like(sql: &mut String, params: &mut Vec<Value>, field: &str, pattern: String) {
    sql.push_str(&format!("{} LIKE ? ESCAPE '\\'", quote_ident(field)));
    params.push(Value::Text(pattern));
}

fn join(sql: &mut String, params: &mut Vec<Value>, filters: &[Filter], separator: &str, empty: &str) {
    if filters.is_empty() {
        sql.push_str(empty);
        return;
    }
    sql.push('(');
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        filter.render(sql, params);
    }
    sql.push(')');
}

/// Escapes LIKE wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Double-quotes an SQL identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Describes the rows a [`QueryingSource`](super::QueryingSource) pages
/// through: one table, some columns, an optional filter and an ordering.
///
/// # Example
///
/// ```
/// use governance_lib::paging::{Filter, OrderBy, PagedQuery};
///
/// let query = PagedQuery::table("identity")
///     .select(&["id", "name"])
///     .filter(Filter::eq("inactive", 0i64))
///     .order_by(OrderBy::asc("name"));
///
/// let (sql, _) = query.count_sql();
/// assert_eq!(sql, r#"SELECT COUNT(*) FROM "identity" WHERE "inactive" = ?"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PagedQuery {
    table: String,
    select: Vec<String>,
    filter: Option<Filter>,
    order_by: Option<OrderBy>,
}

impl PagedQuery {
    /// Starts a query over `table`, selecting all columns.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: Vec::new(),
            filter: None,
            order_by: None,
        }
    }

    /// Specifies which columns to select.
    ///
    /// If not called, all columns are returned.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.select = columns.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Replaces the filter, or removes it with `None`.
    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.filter = filter;
    }

    pub fn current_filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Renders the `SELECT COUNT(*)` statement and its parameters.
    pub fn count_sql(&self) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT COUNT(*) FROM {}", quote_ident(&self.table));
        let mut params = Vec::new();
        self.push_where(&mut sql, &mut params);
        (sql, params)
    }

    /// Renders the bounded page statement and its parameters, with `LIMIT`
    /// and `OFFSET` bound last.
    pub fn page_sql(&self, offset: usize, limit: usize) -> (String, Vec<Value>) {
        let columns = if self.select.is_empty() {
            "*".to_string()
        } else {
            self.select
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut sql = format!("SELECT {} FROM {}", columns, quote_ident(&self.table));
        let mut params = Vec::new();
        self.push_where(&mut sql, &mut params);

        if let Some(order) = &self.order_by
            && !order.fields().is_empty()
        {
            let parts: Vec<String> = order
                .fields()
                .iter()
                .map(|(field, direction)| format!("{} {}", quote_ident(field), direction.keyword()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&parts.join(", "));
        }

        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(Value::Integer(to_sql_int(limit)));
        params.push(Value::Integer(to_sql_int(offset)));
        (sql, params)
    }

    fn push_where(&self, sql: &mut String, params: &mut Vec<Value>) {
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.render(sql, params);
        }
    }
}

fn to_sql_int(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
