//! cert-cmdb-sync - certificate lifecycle synchronization into a CMDB
//!
//! This library pulls paginated order reports from a certificate vendor,
//! correlates orders with their certificates, decodes issued certificates and
//! submits certificate and DNS name configuration items to a CMDB's
//! identify-and-reconcile API. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`reconciliation`): report parsing, correlation, status
//!   mapping and payload assembly
//! - **Application Layer** (`application`): the synchronization use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): vendor/CMDB HTTP clients, PKCS#7 decoding, console and file output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cert_cmdb_sync::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let config = locate_config(None, Path::new("."))?.into_sync_config(None)?;
//! let vendor = SectigoClient::new(config.vendor.clone())?;
//!
//! let use_case = SyncCertificatesUseCase::new(
//!     vendor.clone(),
//!     vendor,
//!     Pkcs7CertificateDecoder::new(),
//!     ServiceNowClient::new(config.cmdb.clone())?,
//!     RecordingCmdbWriter::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let report = use_case.execute(SyncRequest::default())?;
//! let payloads = use_case.cmdb_writer().payloads();
//! println!("{}", RunSummary::dry_run(report, payloads).to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod reconciliation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::crypto::Pkcs7CertificateDecoder;
    pub use crate::adapters::outbound::dry_run::RecordingCmdbWriter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::network::{SectigoClient, ServiceNowClient};
    pub use crate::application::dto::{
        FailurePolicy, RunSummary, SubmitMode, SyncMode, SyncReport, SyncRequest,
    };
    pub use crate::application::use_cases::SyncCertificatesUseCase;
    pub use crate::config::{locate_config, SyncConfig};
    pub use crate::ports::inbound::CertificateSyncPort;
    pub use crate::ports::outbound::{
        CertificateDecoder, CertificateSource, CmdbReader, CmdbWriter, OutputPresenter,
        ProgressReporter, ReportQuery, ReportSource, UpsertOutcome,
    };
    pub use crate::reconciliation::domain::{
        CertificateDetail, CmdbUpsertPayload, LifecycleState, UniqueCertificate,
    };
    pub use crate::reconciliation::services::{Correlator, PayloadBuilder, ReportExtractor};
    pub use crate::shared::Result;
}
