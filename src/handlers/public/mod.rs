// Tier 1: routes behind the Authenticate layer only
pub mod auth;
pub mod companies;
pub mod health;
pub mod jobs;

pub use health::{health, root};
