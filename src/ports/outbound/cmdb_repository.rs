use crate::reconciliation::domain::{CmdbUpsertPayload, UniqueCertificate};
use crate::shared::Result;

/// Result of one identify-and-reconcile submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Accepted,
    /// The CMDB answered with a non-200 status; the body is kept for the log
    Rejected { status: u16, body: String },
}

/// CmdbReader port for querying previously reconciled certificates
pub trait CmdbReader {
    /// Returns the certificate with the most recent `valid_from` that this
    /// integration discovered, or `None` when the CMDB holds none yet
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is not the
    /// expected `{ "result": [...] }` envelope
    fn latest_issued_certificate(&self) -> Result<Option<UniqueCertificate>>;
}

/// CmdbWriter port for submitting payloads to the identify-and-reconcile API
pub trait CmdbWriter {
    /// Submits one payload. A rejection is an `Ok` outcome; only transport
    /// failures are errors.
    fn upsert(&self, payload: &CmdbUpsertPayload) -> Result<UpsertOutcome>;
}
