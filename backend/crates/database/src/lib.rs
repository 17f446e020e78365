//! Database Crate - PostgreSQL plumbing
//!
//! - `pool` - connection pool construction from [`platform::config::DatabaseConfig`]
//! - `handle` - [`SqlHandle`], a pooled or transaction-bound query handle
//! - `manager` - create/drop the application database
//! - `migrator` - embedded reversible migrations
//!
//! Transactions are never looked up from ambient state: a transaction-bound
//! [`SqlHandle`] is passed explicitly to whatever needs to run inside it.

pub mod error;
pub mod handle;
pub mod manager;
pub mod migrator;
pub mod pool;

pub use error::{DbError, DbResult};
pub use handle::{SqlConn, SqlHandle};
pub use pool::Database;
