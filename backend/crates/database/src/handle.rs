//! SQL handle - one query surface for pooled and transactional work
//!
//! A [`SqlHandle`] is either backed by the pool (every call checks out a
//! fresh connection) or bound to one open transaction shared by every
//! clone of the handle. Repositories take a handle and never care which.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::error::{DbError, DbResult};

type SharedTx = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

#[derive(Clone)]
enum Inner {
    Pool(PgPool),
    Tx(SharedTx),
}

/// Pool-backed or transaction-bound query handle
#[derive(Clone)]
pub struct SqlHandle {
    inner: Inner,
}

impl std::fmt::Debug for SqlHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.inner {
            Inner::Pool(_) => "pool",
            Inner::Tx(_) => "transaction",
        };
        f.debug_struct("SqlHandle").field("mode", &mode).finish()
    }
}

/// Borrowed connection; dereferences to [`PgConnection`]
///
/// For a transaction-bound handle this holds the transaction lock, so
/// statements on clones of the same handle run one at a time.
pub enum SqlConn<'a> {
    Pooled(PoolConnection<Postgres>),
    Tx(MappedMutexGuard<'a, Transaction<'static, Postgres>>),
}

impl Deref for SqlConn<'_> {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        match self {
            SqlConn::Pooled(conn) => conn,
            SqlConn::Tx(tx) => tx,
        }
    }
}

impl DerefMut for SqlConn<'_> {
    fn deref_mut(&mut self) -> &mut PgConnection {
        match self {
            SqlConn::Pooled(conn) => conn,
            SqlConn::Tx(tx) => tx,
        }
    }
}

impl SqlHandle {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Inner::Pool(pool),
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self.inner, Inner::Tx(_))
    }

    /// Borrow a connection for one or more statements
    pub async fn acquire(&self) -> DbResult<SqlConn<'_>> {
        match &self.inner {
            Inner::Pool(pool) => Ok(SqlConn::Pooled(pool.acquire().await?)),
            Inner::Tx(shared) => {
                let guard = shared.lock().await;
                MutexGuard::try_map(guard, Option::as_mut)
                    .map(SqlConn::Tx)
                    .map_err(|_| DbError::TransactionFinished)
            }
        }
    }

    /// Open a transaction and return a handle bound to it
    pub async fn begin(&self) -> DbResult<SqlHandle> {
        match &self.inner {
            Inner::Pool(pool) => {
                let tx = pool.begin().await?;
                Ok(SqlHandle {
                    inner: Inner::Tx(Arc::new(Mutex::new(Some(tx)))),
                })
            }
            Inner::Tx(_) => Err(DbError::NestedTransaction),
        }
    }

    pub async fn commit(&self) -> DbResult<()> {
        self.take().await?.commit().await?;
        Ok(())
    }

    pub async fn rollback(&self) -> DbResult<()> {
        self.take().await?.rollback().await?;
        Ok(())
    }

    async fn take(&self) -> DbResult<Transaction<'static, Postgres>> {
        match &self.inner {
            Inner::Pool(_) => Err(DbError::NoTransaction),
            Inner::Tx(shared) => shared.lock().await.take().ok_or(DbError::TransactionFinished),
        }
    }

}
