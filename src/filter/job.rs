//! WHERE-clause builder for job searches.
//!
//! Unlike companies, an empty job filter is a valid request for every job
//! and yields a match-all predicate.

use serde_json::Value;

use super::filter_where::FilterWhere;
use super::types::{FilterOp, JobFilter, SqlResult};

/// Build the predicate for `filter`, in the fixed order title, minSalary, hasEquity.
///
/// `hasEquity: true` adds a literal `equity > 0`; false or absent adds nothing.
pub fn build_predicate(filter: &JobFilter) -> SqlResult {
    let mut where_clause = FilterWhere::new();
    if let Some(term) = &filter.title {
        where_clause.contains("title", term);
    }
    if let Some(min) = filter.min_salary {
        where_clause.compare("salary", FilterOp::Gte, Value::from(min));
    }
    if filter.has_equity == Some(true) {
        where_clause.literal("equity > 0");
    }
    where_clause.finish()
}
