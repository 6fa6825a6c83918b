//! Media store - Salvataggio dei file caricati
//!
//! Il database conserva solo l'URL restituito dallo store; i byte vivono altrove.
//! `LocalMediaStore` scrive su filesystem sotto `<root>/<invite_id>/` e restituisce
//! un URL relativo servito dal router sotto `/uploads`.

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub const UPLOADS_ROUTE: &str = "/uploads";

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Salva i byte e restituisce l'URL pubblico del file
    async fn save(
        &self,
        invite_id: &str,
        uploader_id: &str,
        body: Bytes,
        original_filename: &str,
    ) -> anyhow::Result<String>;
}

pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Estensione del file originale, solo se alfanumerica
fn safe_extension(original_filename: &str) -> Option<String> {
    Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
}

/// Gli id arrivano dal client: ammessi solo caratteri sicuri per un nome di directory
fn safe_segment(segment: &str) -> anyhow::Result<&str> {
    if segment.is_empty()
        || !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("invalid path segment: {segment:?}");
    }
    Ok(segment)
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    #[instrument(skip(self, body), fields(size = body.len()))]
    async fn save(
        &self,
        invite_id: &str,
        uploader_id: &str,
        body: Bytes,
        original_filename: &str,
    ) -> anyhow::Result<String> {
        let invite_dir = safe_segment(invite_id)?;
        let file_name = match safe_extension(original_filename) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let dir = self.root.join(invite_dir);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create upload dir {}", dir.display()))?;

        let path = dir.join(&file_name);
        debug!("Writing upload from user {} to {}", uploader_id, path.display());
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;

        info!("Stored upload {}", file_name);
        Ok(format!("{UPLOADS_ROUTE}/{invite_dir}/{file_name}"))
    }
}
