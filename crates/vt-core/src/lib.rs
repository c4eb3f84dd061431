//! vt-core - Core library for Veritemiz
//!
//! This crate provides the table model, CSV ingestion and export, the
//! cleaning engine, the artifact store and the service that ties them
//! together for the upload / process / download request flow.

pub mod artifact;
pub mod clean;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod service;
pub mod store;
pub mod table;

pub use artifact::{Artifact, ArtifactId, ArtifactOrigin};
pub use clean::{clean, remove_duplicate_rows, remove_missing_rows, CleaningOperations};
pub use config::{Config, StoreKind};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use export::to_csv_bytes;
pub use ingest::{ingest, ingest_with_limit, MAX_UPLOAD_BYTES};
pub use service::{CleaningService, Download, ProcessSummary, UploadSummary};
pub use store::{ArtifactStore, BoundedStore, MemoryStore};
pub use table::{Cell, Column, ColumnType, Metadata, Row, Table};
