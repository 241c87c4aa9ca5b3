use serde_json::Value;

use super::types::{FilterOp, SqlResult};

/// Condition used when a filter contributes no clauses at all.
pub const MATCH_ALL: &str = "1=1";

/// Accumulates WHERE conditions and hands out positional placeholders.
///
/// Columns are always static names chosen by the entity builders; every
/// caller-supplied value goes through [`FilterWhere::param`].
#[derive(Debug, Default)]
pub struct FilterWhere {
    param_values: Vec<Value>,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column <op> $n` with `value` bound to `$n`.
    pub fn compare(&mut self, column: &'static str, op: FilterOp, value: Value) -> &mut Self {
        let placeholder = self.param(value);
        self.conditions.push(format!("{} {} {}", column, op.to_sql(), placeholder));
        self
    }

    /// Case-insensitive substring match; the term is wrapped in `%` here and only here.
    pub fn contains(&mut self, column: &'static str, term: &str) -> &mut Self {
        self.compare(column, FilterOp::ILike, Value::String(format!("%{}%", term)))
    }

    /// A condition with no parameters, e.g. `equity > 0`.
    pub fn literal(&mut self, condition: &'static str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// Join the conditions with AND. No conditions means match everything.
    pub fn finish(self) -> SqlResult {
        let query = if self.conditions.is_empty() {
            MATCH_ALL.to_string()
        } else {
            self.conditions.join(" AND ")
        };
        SqlResult { query, params: self.param_values }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }
}
