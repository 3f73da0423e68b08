use crate::reconciliation::domain::PageWindow;
use crate::shared::Result;
use chrono::{DateTime, Utc};

/// Parameters of one report request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub first_result_no: u64,
    pub last_result_no: u64,
    /// Ask the vendor for the short status-only listing
    pub statuses_only: bool,
    /// Only report certificates valid from this instant onwards
    pub not_before: Option<DateTime<Utc>>,
}

impl ReportQuery {
    /// Zero-width request used to read the envelope's record count
    pub fn probe(not_before: Option<DateTime<Utc>>) -> Self {
        Self {
            first_result_no: 0,
            last_result_no: 0,
            statuses_only: true,
            not_before,
        }
    }

    pub fn page(window: &PageWindow, not_before: Option<DateTime<Utc>>) -> Self {
        Self {
            first_result_no: window.first_result_no,
            last_result_no: window.last_result_no,
            statuses_only: false,
            not_before,
        }
    }
}

/// ReportSource port for the vendor's order-reporting endpoint
pub trait ReportSource {
    /// Fetches the raw `key=value&...` report text for a query
    ///
    /// # Errors
    /// Returns an error if the request cannot be completed or the vendor
    /// answers with a non-success HTTP status. Vendor error codes inside the
    /// body are not interpreted here.
    fn fetch_report(&self, query: &ReportQuery) -> Result<String>;
}
