//! Stored tables and their identifiers

use crate::clean::CleaningOperations;
use crate::table::{Metadata, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque artifact identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArtifactId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for ArtifactId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How an artifact came to exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ArtifactOrigin {
    /// Parsed from an upload
    Uploaded,
    /// Derived from another artifact by a cleaning request
    Cleaned {
        source: ArtifactId,
        operations: CleaningOperations,
    },
}

/// A stored table plus its metadata. Artifacts are never modified once built.
#[derive(Debug, Clone)]
pub struct Artifact {
    table: Table,
    filename: String,
    size: usize,
    created_at: DateTime<Utc>,
    origin: ArtifactOrigin,
}

impl Artifact {
    /// Artifact for an uploaded file; `size` is the raw upload length
    pub fn uploaded(table: Table, filename: impl Into<String>, size: usize) -> Self {
        Self {
            table,
            filename: filename.into(),
            size,
            created_at: Utc::now(),
            origin: ArtifactOrigin::Uploaded,
        }
    }

    /// Artifact produced by cleaning `source`; `size` is the exported CSV length
    pub fn cleaned(
        table: Table,
        filename: impl Into<String>,
        size: usize,
        source: ArtifactId,
        operations: CleaningOperations,
    ) -> Self {
        Self {
            table,
            filename: filename.into(),
            size,
            created_at: Utc::now(),
            origin: ArtifactOrigin::Cleaned { source, operations },
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn origin(&self) -> &ArtifactOrigin {
        &self.origin
    }

    /// Id of the artifact this one was derived from, if any
    pub fn source(&self) -> Option<&ArtifactId> {
        match &self.origin {
            ArtifactOrigin::Uploaded => None,
            ArtifactOrigin::Cleaned { source, .. } => Some(source),
        }
    }

    pub fn metadata(&self) -> Metadata {
        self.table.metadata(self.filename.clone(), self.size)
    }
}
