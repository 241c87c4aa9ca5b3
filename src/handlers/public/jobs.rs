use std::collections::HashMap;

use axum::extract::{Path, Query, State};

use crate::database::models::Job;
use crate::error::ApiError;
use crate::filter::JobFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /jobs - List jobs filtered by `title`, `minSalary` and `hasEquity`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<Job>> {
    let filter = JobFilter::from_query(&params)?;
    let jobs = state.jobs().find_all(&filter).await?;
    Ok(ApiResponse::success(jobs))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Job> {
    let job = state.jobs().get(parse_job_id(&id)?).await?;
    Ok(ApiResponse::success(job))
}

/// Job ids are serial integers; anything else cannot name a job.
pub(crate) fn parse_job_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(format!("No job: {}", raw)))
}
