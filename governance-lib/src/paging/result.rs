//! Grid-store list results.

use serde::Serialize;

/// One page of rows plus the total, in the shape grid stores read:
/// `{"totalCount": n, "objects": [...]}`.
///
/// # Example
///
/// ```
/// use governance_lib::paging::ListResult;
///
/// let result = ListResult::new(vec!["auditor", "manager"], 14);
/// assert_eq!(
///     result.to_json().unwrap(),
///     r#"{"totalCount":14,"objects":["auditor","manager"]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T: Serialize> {
    /// Rows matching the filter, not just the ones on this page.
    pub total_count: usize,
    /// The rows on this page.
    pub objects: Vec<T>,
}

impl<T: Serialize> ListResult<T> {
    pub fn new(objects: Vec<T>, total_count: usize) -> Self {
        Self {
            total_count,
            objects,
        }
    }

    /// A result with no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
