//! Attachment DTO

use serde::Serialize;

use crate::attachment::Attachment;
use crate::client::ObjectStorage;
use crate::error::StorageResult;

/// Attachment as rendered in API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub id: String,
    pub file_name: String,
    /// Presigned, time-limited download URL
    pub url: String,
}

impl AttachmentResponse {
    /// Build the DTO, presigning a fresh URL; no attachment gives no DTO
    pub async fn from_attachment<S>(
        storage: &S,
        attachment: Option<&Attachment>,
    ) -> StorageResult<Option<Self>>
    where
        S: ObjectStorage + Sync,
    {
        let Some(attachment) = attachment else {
            return Ok(None);
        };

        let url = storage.presigned_get_url(&attachment.object_name).await?;

        Ok(Some(Self {
            id: attachment.id.to_string(),
            file_name: attachment.file_name.clone(),
            url,
        }))
    }
}
