use crate::application::dto::{SyncReport, SyncRequest};
use crate::shared::Result;

/// CertificateSyncPort - Inbound port for the certificate synchronization use case
///
/// This port is what the CLI (or any other driver) calls to run one
/// synchronization pass from the vendor report into the CMDB.
pub trait CertificateSyncPort {
    /// Runs one synchronization pass
    ///
    /// # Returns
    /// A report of what was submitted, skipped, rejected or failed
    ///
    /// # Errors
    /// Returns an error (and stops the run) if:
    /// - The vendor answers with a non-zero error code
    /// - A report page does not carry the expected envelope
    /// - A report page or the CMDB read cannot be fetched
    /// - An order-level step fails while the fail-fast policy is selected
    fn sync_certificates(&self, request: SyncRequest) -> Result<SyncReport>;
}
