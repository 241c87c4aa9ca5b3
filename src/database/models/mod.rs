pub mod company;
pub mod job;
pub mod user;

pub use company::{Company, CompanyDetail, CompanyJob, CompanyUpdate, NewCompany};
pub use job::{Job, JobUpdate, NewJob};
pub use user::{Credentials, NewUser, User, UserRecord, UserUpdate};

/// A partial-update body. Fields outside `NULLABLE` map to NOT NULL columns.
pub trait PatchFields {
    const NULLABLE: &'static [&'static str];
}
