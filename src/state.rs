//! Shared application state for all routes.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtError, TokenKeys};
use crate::config::AppConfig;
use crate::services::{CompanyService, JobService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub keys: Arc<TokenKeys>,
    pub bcrypt_cost: u32,
    pub log_queries: bool,
}

impl AppState {
    pub fn new(pool: PgPool, keys: TokenKeys, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            keys: Arc::new(keys),
            bcrypt_cost,
            log_queries: false,
        }
    }

    pub fn from_config(config: &AppConfig, pool: PgPool) -> Result<Self, JwtError> {
        let keys = TokenKeys::from_config(&config.security)?;
        let mut state = Self::new(pool, keys, config.security.bcrypt_work_factor);
        state.log_queries = config.database.enable_query_logging;
        Ok(state)
    }

    pub fn companies(&self) -> CompanyService {
        CompanyService::new(self.pool.clone()).with_query_logging(self.log_queries)
    }

    pub fn jobs(&self) -> JobService {
        JobService::new(self.pool.clone()).with_query_logging(self.log_queries)
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.pool.clone(), self.bcrypt_cost).with_query_logging(self.log_queries)
    }
}
