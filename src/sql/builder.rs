//! Builds parameterized SET and WHERE fragments.

use crate::error::AppError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Quote identifier for PostgreSQL (safe: only from code).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// SQL text with its positional parameters, in placeholder order.
#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    /// Appends a value and returns its 1-based placeholder number.
    pub fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, PartialEq)]
pub struct PartialUpdate {
    /// `"col1"=$1, "col2"=$2`
    pub set_cols: String,
    pub values: Vec<Value>,
}

/// Build the SET clause for an UPDATE from only the fields present in `data`.
///
/// `js_to_sql` maps request field names (camelCase) to column names; a field
/// missing from the map is used as its own column name. Placeholders start at
/// `$1` and follow the iteration order of `data`, so callers append further
/// parameters (e.g. the row id) at `values.len() + 1`.
pub fn sql_for_partial_update(
    data: &Map<String, Value>,
    js_to_sql: &HashMap<&str, &str>,
) -> Result<PartialUpdate, AppError> {
    sql_for_cast_partial_update(data, js_to_sql, &HashMap::new())
}

/// Like [`sql_for_partial_update`], but columns listed in `casts` get a typed
/// placeholder (`"equity"=$2::numeric`) so text values bind to that column type.
pub fn sql_for_cast_partial_update(
    data: &Map<String, Value>,
    js_to_sql: &HashMap<&str, &str>,
    casts: &HashMap<&str, &str>,
) -> Result<PartialUpdate, AppError> {
    if data.is_empty() {
        return Err(AppError::BadRequest("No data".into()));
    }
    let mut q = QueryBuf::default();
    let mut sets = Vec::with_capacity(data.len());
    for (key, value) in data {
        let column = js_to_sql.get(key.as_str()).copied().unwrap_or(key.as_str());
        let n = q.push_param(value.clone());
        let rhs = casts
            .get(column)
            .map(|t| format!("${}::{}", n, t))
            .unwrap_or_else(|| format!("${}", n));
        sets.push(format!("{}={}", quoted(column), rhs));
    }
    Ok(PartialUpdate {
        set_cols: sets.join(", "),
        values: q.params,
    })
}
