use super::SyncMode;
use serde::Serialize;

/// A payload the CMDB answered with a non-200 status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdbRejection {
    /// Orders whose certificates were in the rejected payload
    pub order_numbers: Vec<String>,
    pub status: u16,
    pub body: String,
}

/// An order that could not be processed under the isolate policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderFailure {
    pub order_number: String,
    pub reason: String,
}

/// SyncReport - Response DTO summarizing one synchronization run
///
/// Serialized as the machine-readable run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub mode: SyncMode,
    /// `notBefore` filter sent to the vendor in incremental mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    /// Record count announced by the vendor
    pub total_records: u64,
    pub pages_processed: u64,
    pub orders_seen: usize,
    /// Certificate items in payloads the CMDB accepted
    pub certificates_accepted: usize,
    /// Certificate items in payloads the CMDB answered with a non-200 status
    pub certificates_rejected: usize,
    /// Pairs whose vendor status is not actionable
    pub skipped_statuses: usize,
    /// Report fragments dropped for missing required fields
    pub incomplete_fragments: usize,
    /// Orders that carried more than one certificate fragment; only the
    /// first fragment of such an order is reconciled
    pub orders_with_extra_certificates: usize,
    /// Orders without any certificate fragment on their page
    pub orders_without_certificate: usize,
    pub rejections: Vec<CmdbRejection>,
    pub failures: Vec<OrderFailure>,
}

impl SyncReport {
    pub fn new(mode: SyncMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// True when nothing was rejected and no order failed
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty() && self.failures.is_empty()
    }
}
