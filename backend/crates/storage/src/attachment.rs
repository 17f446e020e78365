//! Attachment Entity and Repository
//!
//! An attachment is file metadata: the object key in the bucket plus the
//! name shown to users. The bytes live in object storage.

use chrono::{DateTime, Utc};
use database::SqlHandle;
use kernel::id::AttachmentId;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

/// Attachment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: AttachmentId,
    /// Object key in the bucket; unique
    pub object_name: String,
    /// Display file name
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attachment {
    pub fn new(object_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AttachmentId::new(),
            object_name: object_name.into(),
            file_name: file_name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Pre-update hook
    pub fn before_update(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[trait_variant::make(AttachmentRepository: Send)]
pub trait LocalAttachmentRepository {
    async fn find_by_id(&self, id: AttachmentId) -> StorageResult<Option<Attachment>>;

    async fn create(&self, attachment: &Attachment) -> StorageResult<()>;

    /// Persist changes; refreshes `updated_at` first
    async fn update(&self, attachment: &mut Attachment) -> StorageResult<()>;

    /// Returns whether a row was removed
    async fn delete(&self, id: AttachmentId) -> StorageResult<bool>;
}

/// PostgreSQL-backed attachment repository
///
/// Runs inside a transaction when built from a transaction-bound handle.
#[derive(Debug, Clone)]
pub struct PgAttachmentRepository {
    sql: SqlHandle,
}

impl PgAttachmentRepository {
    pub fn new(sql: SqlHandle) -> Self {
        Self { sql }
    }
}

#[derive(sqlx::FromRow)]
struct AttachmentRow {
    id: Uuid,
    object_name: String,
    file_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AttachmentRow> for Attachment {
    fn from(row: AttachmentRow) -> Self {
        Self {
            id: AttachmentId::from_uuid(row.id),
            object_name: row.object_name,
            file_name: row.file_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl AttachmentRepository for PgAttachmentRepository {
    async fn find_by_id(&self, id: AttachmentId) -> StorageResult<Option<Attachment>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, AttachmentRow>(
            r#"
            SELECT id, object_name, file_name, created_at, updated_at
            FROM attachments
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(Attachment::from))
    }

    async fn create(&self, attachment: &Attachment) -> StorageResult<()> {
        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            INSERT INTO attachments (id, object_name, file_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(attachment.id.into_uuid())
        .bind(&attachment.object_name)
        .bind(&attachment.file_name)
        .bind(attachment.created_at)
        .bind(attachment.updated_at)
        .execute(&mut *conn)
        .await?;

        tracing::debug!(attachment_id = %attachment.id, "Attachment created");
        Ok(())
    }

    async fn update(&self, attachment: &mut Attachment) -> StorageResult<()> {
        attachment.before_update();

        let mut conn = self.sql.acquire().await?;
        let result = sqlx::query(
            r#"
            UPDATE attachments
            SET object_name = $2, file_name = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(attachment.id.into_uuid())
        .bind(&attachment.object_name)
        .bind(&attachment.file_name)
        .bind(attachment.updated_at)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(attachment.object_name.clone()));
        }
        Ok(())
    }

    async fn delete(&self, id: AttachmentId) -> StorageResult<bool> {
        let mut conn = self.sql.acquire().await?;
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attachment() {
        let attachment = Attachment::new("uploads/2025/report.pdf", "report.pdf");
        assert_eq!(attachment.object_name, "uploads/2025/report.pdf");
        assert_eq!(attachment.file_name, "report.pdf");
        assert_eq!(attachment.created_at, attachment.updated_at);
    }

    #[test]
    fn test_before_update_moves_updated_at_only() {
        let mut attachment = Attachment::new("k", "f.txt");
        let created = attachment.created_at;
        std::thread::sleep(std::time::Duration::from_millis(2));

        attachment.before_update();
        assert_eq!(attachment.created_at, created);
        assert!(attachment.updated_at > created);
    }
}
