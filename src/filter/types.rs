use std::collections::HashMap;

use super::error::QueryError;

/// Comparison operators the predicate builders know how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Gte,
    Lte,
    ILike,
}

impl FilterOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::ILike => "ILIKE",
        }
    }
}

/// A SQL fragment plus the values for its positional placeholders.
///
/// `params[i]` is always the value bound to `$(i + 1)` in `query`.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}

impl SqlResult {
    /// Placeholder to use for the first parameter appended after this fragment's own.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.params.len() + 1)
    }
}

/// Longest `nameLike` term accepted from the query string.
pub const MAX_NAME_LIKE_LEN: usize = 30;

/// Longest job `title` term accepted from the query string.
pub const MAX_TITLE_LEN: usize = 100;

/// Search constraints for `GET /companies`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub name_like: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Pull the recognized keys out of a query string; anything else is ignored.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, QueryError> {
        Ok(Self {
            name_like: parse_term(query, "nameLike", MAX_NAME_LIKE_LEN)?,
            min_employees: parse_count(query, "minEmployees")?,
            max_employees: parse_count(query, "maxEmployees")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name_like.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }

    pub fn validate_range(&self) -> Result<(), QueryError> {
        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) if min > max => Err(QueryError::RangeConsistency {
                min_field: "minEmployees",
                max_field: "maxEmployees",
            }),
            _ => Ok(()),
        }
    }
}

/// Search constraints for `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, QueryError> {
        Ok(Self {
            title: parse_term(query, "title", MAX_TITLE_LEN)?,
            min_salary: parse_count(query, "minSalary")?,
            has_equity: parse_flag(query, "hasEquity")?,
        })
    }
}

fn parse_term(
    query: &HashMap<String, String>,
    field: &'static str,
    max_len: usize,
) -> Result<Option<String>, QueryError> {
    match query.get(field) {
        None => Ok(None),
        Some(term) if term.is_empty() => Err(QueryError::InvalidValue {
            field,
            reason: "must not be empty".to_string(),
        }),
        Some(term) if term.chars().count() > max_len => Err(QueryError::InvalidValue {
            field,
            reason: format!("must be at most {} characters", max_len),
        }),
        Some(term) => Ok(Some(term.clone())),
    }
}

fn parse_count(query: &HashMap<String, String>, field: &'static str) -> Result<Option<i64>, QueryError> {
    let Some(raw) = query.get(field) else {
        return Ok(None);
    };
    let value: i64 = raw.trim().parse().map_err(|_| QueryError::InvalidValue {
        field,
        reason: format!("expected an integer, got '{}'", raw),
    })?;
    if value < 0 {
        return Err(QueryError::InvalidValue {
            field,
            reason: "must not be negative".to_string(),
        });
    }
    Ok(Some(value))
}

fn parse_flag(query: &HashMap<String, String>, field: &'static str) -> Result<Option<bool>, QueryError> {
    match query.get(field).map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s == "true" => Ok(Some(true)),
        Some(s) if s == "false" => Ok(Some(false)),
        Some(other) => Err(QueryError::InvalidValue {
            field,
            reason: format!("expected true or false, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn company_filter_parses_known_keys_and_ignores_others() {
        let filter = CompanyFilter::from_query(&query(&[
            ("nameLike", "net"),
            ("minEmployees", "2"),
            ("sort", "name"),
        ]))
        .unwrap();

        assert_eq!(filter.name_like.as_deref(), Some("net"));
        assert_eq!(filter.min_employees, Some(2));
        assert_eq!(filter.max_employees, None);
    }

    #[test]
    fn company_filter_rejects_non_numeric_bounds() {
        let err = CompanyFilter::from_query(&query(&[("maxEmployees", "heyyy")])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { field: "maxEmployees", .. }));
    }

    #[test]
    fn company_filter_rejects_long_names() {
        let long = "hhgadkljafhglkjdfgkljfjagjljdfgllk;lbsj;sldjf;a";
        let err = CompanyFilter::from_query(&query(&[("nameLike", long)])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { field: "nameLike", .. }));
    }

    #[test]
    fn range_check_flags_inverted_bounds() {
        let filter = CompanyFilter { min_employees: Some(3), max_employees: Some(1), ..Default::default() };
        assert_eq!(
            filter.validate_range(),
            Err(QueryError::RangeConsistency { min_field: "minEmployees", max_field: "maxEmployees" })
        );

        let equal = CompanyFilter { min_employees: Some(2), max_employees: Some(2), ..Default::default() };
        assert!(equal.validate_range().is_ok());
    }

    #[test]
    fn job_filter_parses_flags() {
        let filter = JobFilter::from_query(&query(&[("hasEquity", "TRUE"), ("minSalary", "1000")])).unwrap();
        assert_eq!(filter.has_equity, Some(true));
        assert_eq!(filter.min_salary, Some(1000));

        let err = JobFilter::from_query(&query(&[("hasEquity", "maybe")])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { field: "hasEquity", .. }));
    }

    #[test]
    fn empty_query_gives_empty_filters() {
        assert!(CompanyFilter::from_query(&HashMap::new()).unwrap().is_empty());
        assert_eq!(JobFilter::from_query(&HashMap::new()).unwrap(), JobFilter::default());
    }
}
