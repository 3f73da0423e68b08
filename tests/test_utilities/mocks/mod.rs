/// Mock implementations for testing
mod mock_certificate_source;
mod mock_cmdb;
mod mock_progress_reporter;
mod mock_report_source;

pub use mock_certificate_source::MockCertificateSource;
pub use mock_cmdb::{MockCmdbReader, MockCmdbWriter};
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_report_source::MockReportSource;
