#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use sqlx::{Executor, PgPool};

use jobly_api::auth::{password::hash_password, TokenKeys};
use jobly_api::config::{test_database_url, DatabaseConfig};
use jobly_api::database::DatabaseManager;
use jobly_api::AppState;

pub const SECRET: &str = "secret-dev";

const SCHEMA: &str = include_str!("../../sql/schema.sql");

// Store-backed tests reset shared tables; run them one at a time.
static DB_LOCK: Mutex<()> = Mutex::new(());

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub keys: Arc<TokenKeys>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token for a user that need not exist in the store.
    pub fn token(&self, username: &str, is_admin: bool) -> String {
        self.keys.issue(username, is_admin).expect("issue test token")
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if tokio::time::Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub fn database_config() -> DatabaseConfig {
    let base = std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/jobly".to_string());
    DatabaseConfig {
        url: test_database_url(&base),
        max_connections: 5,
        acquire_timeout_secs: 2,
        enable_query_logging: false,
    }
}

/// Start the router in-process on a free port. The pool is lazy, so routes
/// that never reach the store work without a database.
pub async fn spawn_server() -> Result<TestServer> {
    let _ = dotenvy::dotenv();

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let pool = DatabaseManager::connect_lazy(&database_config())?;
    let keys = TokenKeys::new(SECRET, 1).map_err(|e| anyhow::anyhow!("{}", e))?;
    let state = AppState::new(pool, keys, 4);
    let keys = state.keys.clone();

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let app = jobly_api::app(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        keys,
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// Exclusive access to a freshly seeded `jobly_test`. Tests using this are
/// `#[ignore]`d and run with `cargo test -- --ignored`.
pub struct SeededDb {
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

pub async fn seeded_db() -> Result<SeededDb> {
    let guard = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let pool = DatabaseManager::connect(&database_config())
        .await
        .context("store-backed test needs a reachable jobly_test database")?;

    pool.execute(SCHEMA).await?;
    pool.execute("TRUNCATE companies, jobs, users RESTART IDENTITY CASCADE").await?;

    pool.execute(
        "INSERT INTO companies (handle, name, num_employees, description, logo_url) VALUES \
         ('c1', 'C1', 1, 'Desc1', 'http://c1.img'), \
         ('c2', 'C2', 2, 'Desc2', 'http://c2.img'), \
         ('c3', 'C3', 3, 'Desc3', 'http://c3.img')",
    )
    .await?;

    pool.execute(
        "INSERT INTO jobs (title, salary, equity, company_handle) VALUES \
         ('job1', 200000, 0, 'c1'), \
         ('job2', 100000, 0.5, 'c1'), \
         ('job3', 50000, 1, 'c2')",
    )
    .await?;

    for (username, password, is_admin) in [("u1", "password1", false), ("u2", "password2", false), ("admin", "password3", true)] {
        let hashed = hash_password(password.to_string(), 4).await?;
        sqlx::query(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(username)
        .bind(hashed)
        .bind(format!("{}F", username.to_uppercase()))
        .bind(format!("{}L", username.to_uppercase()))
        .bind(format!("{}@email.com", username))
        .bind(is_admin)
        .execute(&pool)
        .await?;
    }

    Ok(SeededDb { pool, _guard: guard })
}

pub async fn json(resp: reqwest::Response) -> Result<Value> {
    Ok(resp.json::<Value>().await?)
}
