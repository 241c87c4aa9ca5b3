use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{Job, JobUpdate, NewJob};
use crate::handlers::public::jobs::parse_job_id;
use crate::handlers::{parse_body, parse_patch};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /jobs - Create a job
///
/// Expected Input:
/// ```json
/// { "title": "new", "salary": 10, "equity": 0.2, "companyHandle": "c1" }
/// ```
///
/// An unknown `companyHandle` is a bad request, not a not-found.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let new_job: NewJob = parse_body(payload)?;
    let job = state.jobs().create(&new_job).await?;
    tracing::info!("Created job {} for {}", job.id, job.company_handle);
    Ok(ApiResponse::created(job))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let id = parse_job_id(&id)?;
    let fields = parse_patch::<JobUpdate>(payload)?;
    let job = state.jobs().update(id, &fields).await?;
    Ok(ApiResponse::success(job))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_job_id(&id)?;
    state.jobs().remove(id).await?;
    tracing::info!("Deleted job {}", id);
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
