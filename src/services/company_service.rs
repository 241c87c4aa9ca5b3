use serde_json::{Map, Value};
use sqlx::PgPool;

use super::{is_unique_violation, log_query, ServiceError};
use crate::database::models::{Company, CompanyDetail, CompanyJob, NewCompany};
use crate::database::query_builder::{bind_all_as, sql_for_partial_update, ColumnWhitelist};
use crate::filter::{company, CompanyFilter};

/// External field names that differ from their `companies` column.
pub const COMPANY_COLUMNS: ColumnWhitelist<'static> =
    ColumnWhitelist::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

const COMPANY_FIELDS: &str = "handle, name, description, num_employees, logo_url";

pub struct CompanyService {
    pool: PgPool,
    log_queries: bool,
}

impl CompanyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, log_queries: false }
    }

    pub fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Insert a company. A handle or name already on file is a duplicate.
    pub async fn create(&self, data: &NewCompany) -> Result<Company, ServiceError> {
        let existing = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.handle)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(ServiceError::Duplicate(format!("Duplicate company: {}", data.handle)));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COMPANY_FIELDS
        );

        sqlx::query_as::<_, Company>(&sql)
            .bind(&data.handle)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.num_employees)
            .bind(&data.logo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::Duplicate(format!("Duplicate company: {}", data.handle))
                } else {
                    e.into()
                }
            })
    }

    /// List companies ordered by name; an empty filter lists them all.
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ServiceError> {
        if filter.is_empty() {
            let sql = format!("SELECT {} FROM companies ORDER BY name", COMPANY_FIELDS);
            log_query(self.log_queries, &sql, &[]);
            return Ok(sqlx::query_as::<_, Company>(&sql).fetch_all(&self.pool).await?);
        }

        filter.validate_range()?;
        let predicate = company::build_predicate(filter)?;

        let sql = format!(
            "SELECT {} FROM companies WHERE {} ORDER BY name",
            COMPANY_FIELDS, predicate.query
        );
        log_query(self.log_queries, &sql, &predicate.params);

        let companies = bind_all_as(sqlx::query_as::<_, Company>(&sql), &predicate.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, ServiceError> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_FIELDS);
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update. `data` keeps the caller's key order.
    pub async fn update(&self, handle: &str, data: &Map<String, Value>) -> Result<Company, ServiceError> {
        let set = sql_for_partial_update(data, &COMPANY_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = {} RETURNING {}",
            set.query,
            set.next_placeholder(),
            COMPANY_FIELDS
        );
        log_query(self.log_queries, &sql, &set.params);

        bind_all_as(sqlx::query_as::<_, Company>(&sql), &set.params)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::Duplicate(format!("Duplicate company name for: {}", handle))
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))
    }

    pub async fn remove(&self, handle: &str) -> Result<(), ServiceError> {
        sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))?;
        Ok(())
    }
}
