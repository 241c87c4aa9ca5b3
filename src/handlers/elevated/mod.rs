// Tier 3: admin-only mutations and account management
pub mod companies;
pub mod jobs;
pub mod users;
