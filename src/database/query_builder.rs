use serde_json::{Map, Value};
use sqlx::{self, postgres::PgArguments, FromRow};

use crate::filter::{QueryError, SqlResult};

/// Static mapping from external (request body) field names to storage columns.
///
/// Fields missing from the list are used verbatim as column names.
#[derive(Debug, Clone, Copy)]
pub struct ColumnWhitelist<'a> {
    entries: &'a [(&'a str, &'a str)],
}

impl<'a> ColumnWhitelist<'a> {
    pub const fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self { entries }
    }

    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    /// Column name for `field`, or `field` itself when it is not mapped.
    pub fn column(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(external, _)| *external == field)
            .map(|(_, column)| *column)
            .unwrap_or(field)
    }
}

/// Free-function form of [`ColumnWhitelist::column`].
pub fn map_column<'a>(columns: &ColumnWhitelist<'a>, field: &'a str) -> &'a str {
    columns.column(field)
}

/// Quote SQL identifier to prevent injection
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the SET list for a partial update.
///
/// `data` keys are external field names, emitted in their original order as
/// `"column"=$i`; `params[i - 1]` holds the value for `$i`. Callers bind any
/// trailing parameters (the row key) starting at [`SqlResult::next_placeholder`].
///
/// ```text
/// {firstName: "Aliya", age: 32}  =>  "first_name"=$1, "age"=$2   ["Aliya", 32]
/// ```
pub fn sql_for_partial_update(
    data: &Map<String, Value>,
    columns: &ColumnWhitelist<'_>,
) -> Result<SqlResult, QueryError> {
    if data.is_empty() {
        return Err(QueryError::EmptyInput);
    }

    let mut assignments = Vec::with_capacity(data.len());
    let mut params = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.iter().enumerate() {
        let column = columns.column(field.as_str());
        assignments.push(format!("{}=${}", quote_identifier(column), idx + 1));
        params.push(value.clone());
    }

    Ok(SqlResult { query: assignments.join(", "), params })
}

pub fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        // An untyped int4 NULL is assignable to text and numeric columns alike
        Value::Null => q.bind(None::<i32>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()), // JSONB
    }
}

/// Bind every value of `params` in order.
pub fn bind_all_as<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    params: &[Value],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    for p in params {
        q = bind_param_query_as(q, p);
    }
    q
}
