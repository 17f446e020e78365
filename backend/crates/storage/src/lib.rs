//! Storage Crate - Object storage and file attachments
//!
//! - `client` - [`ObjectStorage`] trait and the S3-compatible [`S3Storage`]
//! - `attachment` - attachment entity and its PostgreSQL repository
//! - `dto` - [`AttachmentResponse`], which carries a presigned download URL
//!
//! Presigned URLs are computed when a response is built and never stored.

pub mod attachment;
pub mod client;
pub mod dto;
pub mod error;

pub use attachment::{Attachment, AttachmentRepository, PgAttachmentRepository};
pub use client::{ObjectStorage, S3Storage};
pub use dto::AttachmentResponse;
pub use error::{StorageError, StorageResult};
