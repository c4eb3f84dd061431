//! Upload, process and download flows over an injected artifact store

use crate::artifact::{Artifact, ArtifactId};
use crate::clean::{clean, CleaningOperations};
use crate::config::Config;
use crate::error::CoreResult;
use crate::export::to_csv_bytes;
use crate::ingest::{ingest_with_limit, MAX_UPLOAD_BYTES};
use crate::store::{self, ArtifactStore};
use crate::table::{serialize_records, Table};
use serde::Serialize;
use std::sync::Arc;

/// Name used when an upload does not carry a usable file name
pub const DEFAULT_FILENAME: &str = "data.csv";

/// Prefix added to the file name of cleaned artifacts
pub const CLEANED_PREFIX: &str = "cleaned_";

/// Result of a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadSummary {
    pub file_id: ArtifactId,
    pub filename: String,
    pub size: usize,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    /// Leading rows as column -> value records
    #[serde(rename = "preview_data", serialize_with = "serialize_records")]
    pub preview: Table,
}

/// Result of a successful cleaning request
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    pub file_id: ArtifactId,
    pub filename: String,
    pub size: usize,
    pub rows: usize,
    pub columns: usize,
    pub download_url: String,
}

/// CSV payload of a stored artifact
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Value for the `Content-Disposition` response header
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

/// Entry point for the request flows.
///
/// Holds a handle to the artifact store; clones share the same store.
#[derive(Clone)]
pub struct CleaningService {
    store: Arc<dyn ArtifactStore>,
    max_upload_bytes: usize,
    preview_rows: usize,
}

impl CleaningService {
    /// Service with default limits over the given store
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            store,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            preview_rows: 10,
        }
    }

    /// Service with a store and limits built from configuration
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let store = store::from_config(&config.store)?;
        log::info!(
            "Using {} artifact store (capacity {}, ttl {:?})",
            store.store_type(),
            config.store.capacity,
            config.store.ttl()
        );
        Ok(Self::new(store).with_limits(config.upload.max_bytes, config.upload.preview_rows))
    }

    pub fn with_limits(mut self, max_upload_bytes: usize, preview_rows: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self.preview_rows = preview_rows;
        self
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Parse an uploaded file and register it
    pub fn upload(&self, raw: &[u8], filename: &str) -> CoreResult<UploadSummary> {
        let filename = sanitize_filename(filename);
        log::info!("Receiving upload: {}", filename);

        let (table, metadata) = ingest_with_limit(raw, &filename, self.max_upload_bytes)?;
        let preview = table.head(self.preview_rows);
        let file_id = self
            .store
            .put(Artifact::uploaded(table, filename.clone(), metadata.size))?;

        log::info!(
            "Stored upload {} as {} ({} bytes, {} rows, {} columns)",
            filename,
            file_id,
            metadata.size,
            metadata.rows,
            metadata.columns
        );

        Ok(UploadSummary {
            file_id,
            filename,
            size: metadata.size,
            rows: metadata.rows,
            columns: metadata.columns,
            column_names: metadata.column_names,
            preview,
        })
    }

    /// Clean a stored artifact and register the result under a new id
    pub fn process(
        &self,
        file_id: &str,
        operations: &CleaningOperations,
    ) -> CoreResult<ProcessSummary> {
        let source = self.store.get(file_id)?;
        let cleaned = clean(source.table(), operations)?;

        let size = to_csv_bytes(&cleaned)?.len();
        let filename = format!("{}{}", CLEANED_PREFIX, source.filename());
        let rows = cleaned.row_count();
        let columns = cleaned.column_count();

        let cleaned_id = self.store.put(Artifact::cleaned(
            cleaned,
            filename.clone(),
            size,
            ArtifactId::from(file_id.to_string()),
            operations.clone(),
        ))?;

        log::info!(
            "Cleaned {} into {} ({} -> {} rows)",
            file_id,
            cleaned_id,
            source.table().row_count(),
            rows
        );

        Ok(ProcessSummary {
            download_url: format!("/api/download/{}", cleaned_id),
            file_id: cleaned_id,
            filename,
            size,
            rows,
            columns,
        })
    }

    /// Export a stored artifact as CSV
    pub fn download(&self, file_id: &str) -> CoreResult<Download> {
        let artifact = self.store.get(file_id)?;
        log::info!("Downloading {} ({})", artifact.filename(), file_id);
        Ok(Download {
            filename: artifact.filename().to_string(),
            bytes: to_csv_bytes(artifact.table())?,
        })
    }
}

/// Reduce a client-supplied name to a bare file name safe for headers.
///
/// Drops any directory part and control characters, and replaces characters
/// that would break an unquoted `Content-Disposition` parameter.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if matches!(c, ';' | '"' | ',') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
