use serde_json::{Map, Value};
use sqlx::PgPool;

use super::{is_foreign_key_violation, log_query, ServiceError};
use crate::database::models::{Job, NewJob};
use crate::database::query_builder::{bind_all_as, sql_for_partial_update, ColumnWhitelist};
use crate::filter::{job, JobFilter};

pub const JOB_COLUMNS: ColumnWhitelist<'static> = ColumnWhitelist::new(&[("companyHandle", "company_handle")]);

const JOB_FIELDS: &str = "id, title, salary, equity, company_handle";

pub struct JobService {
    pool: PgPool,
    log_queries: bool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, log_queries: false }
    }

    pub fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Insert a job under an existing company.
    pub async fn create(&self, data: &NewJob) -> Result<Job, ServiceError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {}",
            JOB_FIELDS
        );

        sqlx::query_as::<_, Job>(&sql)
            .bind(&data.title)
            .bind(data.salary)
            .bind(data.equity)
            .bind(&data.company_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    ServiceError::InvalidReference(format!("No company: {}", data.company_handle))
                } else {
                    e.into()
                }
            })
    }

    /// List jobs ordered by title then id. An empty filter matches every job.
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, ServiceError> {
        let predicate = job::build_predicate(filter);
        let sql = format!(
            "SELECT {} FROM jobs WHERE {} ORDER BY title, id",
            JOB_FIELDS, predicate.query
        );
        log_query(self.log_queries, &sql, &predicate.params);

        let jobs = bind_all_as(sqlx::query_as::<_, Job>(&sql), &predicate.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn get(&self, id: i32) -> Result<Job, ServiceError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_FIELDS);
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No job: {}", id)))
    }

    pub async fn update(&self, id: i32, data: &Map<String, Value>) -> Result<Job, ServiceError> {
        let set = sql_for_partial_update(data, &JOB_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {}",
            set.query,
            set.next_placeholder(),
            JOB_FIELDS
        );
        log_query(self.log_queries, &sql, &set.params);

        bind_all_as(sqlx::query_as::<_, Job>(&sql), &set.params)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No job: {}", id)))?;
        Ok(())
    }
}
