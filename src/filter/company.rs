//! WHERE-clause builder for company searches.
//!
//! An empty filter is rejected: callers that want every company list them
//! without a predicate instead of asking for one.

use serde_json::Value;

use super::error::QueryError;
use super::filter_where::FilterWhere;
use super::types::{CompanyFilter, FilterOp, SqlResult};

/// Build the predicate for `filter`, in the fixed order nameLike, minEmployees, maxEmployees.
///
/// Bounds are not cross-checked here; see [`CompanyFilter::validate_range`].
pub fn build_predicate(filter: &CompanyFilter) -> Result<SqlResult, QueryError> {
    if filter.is_empty() {
        return Err(QueryError::EmptyInput);
    }

    let mut where_clause = FilterWhere::new();
    if let Some(term) = &filter.name_like {
        where_clause.contains("name", term);
    }
    if let Some(min) = filter.min_employees {
        where_clause.compare("num_employees", FilterOp::Gte, Value::from(min));
    }
    if let Some(max) = filter.max_employees {
        where_clause.compare("num_employees", FilterOp::Lte, Value::from(max));
    }

    Ok(where_clause.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_is_rejected() {
        assert_eq!(build_predicate(&CompanyFilter::default()), Err(QueryError::EmptyInput));
    }

    #[test]
    fn min_employees_is_inclusive_lower_bound() {
        let filter = CompanyFilter { min_employees: Some(2), ..Default::default() };
        let sql = build_predicate(&filter).unwrap();
        assert_eq!(sql.query, "num_employees >= $1");
        assert_eq!(sql.params, vec![json!(2)]);
    }

    #[test]
    fn max_employees_is_inclusive_upper_bound() {
        let filter = CompanyFilter { max_employees: Some(2), ..Default::default() };
        let sql = build_predicate(&filter).unwrap();
        assert_eq!(sql.query, "num_employees <= $1");
        assert_eq!(sql.params, vec![json!(2)]);
    }

    #[test]
    fn name_like_travels_as_wildcarded_param() {
        let filter = CompanyFilter { name_like: Some("abc".to_string()), ..Default::default() };
        let sql = build_predicate(&filter).unwrap();
        assert_eq!(sql.query, "name ILIKE $1");
        assert_eq!(sql.params, vec![json!("%abc%")]);
        assert!(!sql.query.contains("abc"));
    }

    #[test]
    fn all_keys_in_fixed_order() {
        let filter = CompanyFilter {
            max_employees: Some(3),
            min_employees: Some(2),
            name_like: Some("3".to_string()),
        };
        let sql = build_predicate(&filter).unwrap();
        assert_eq!(sql.query, "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3");
        assert_eq!(sql.params, vec![json!("%3%"), json!(2), json!(3)]);
    }

    #[test]
    fn hostile_term_never_reaches_query_text() {
        let filter = CompanyFilter {
            name_like: Some("'; DROP TABLE companies; --".to_string()),
            ..Default::default()
        };
        let sql = build_predicate(&filter).unwrap();
        assert_eq!(sql.query, "name ILIKE $1");
        assert_eq!(sql.params, vec![json!("%'; DROP TABLE companies; --%")]);
    }
}
