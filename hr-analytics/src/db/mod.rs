//! Record store access for hr-analytics
//!
//! `records` holds the create/read/delete operations over the five entity
//! tables; `snapshot` holds the scoped bulk loaders the analytics engine
//! runs inside a single read transaction.

use hr_common::Result;
use sqlx::{Executor, Sqlite};

pub mod records;
pub mod snapshot;

pub use records::*;
pub use snapshot::*;

/// Narrows a load to one department, one employee, or everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Department(i64),
    Employee(i64),
}

/// Connectivity check used by the health endpoint
pub async fn ping<'e, E>(executor: E) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("SELECT 1").execute(executor).await?;
    Ok(())
}
