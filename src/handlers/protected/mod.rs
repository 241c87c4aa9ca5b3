// Tier 2: routes that need a session, or the account owner's session
pub mod auth;
pub mod users;
