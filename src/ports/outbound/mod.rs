/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (vendor API, CMDB, console, files).
pub mod certificate_decoder;
pub mod certificate_source;
pub mod cmdb_repository;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_source;

pub use certificate_decoder::CertificateDecoder;
pub use certificate_source::CertificateSource;
pub use cmdb_repository::{CmdbReader, CmdbWriter, UpsertOutcome};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_source::{ReportQuery, ReportSource};
