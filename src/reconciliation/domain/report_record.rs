use chrono::{DateTime, Utc};

/// OrderRecord value object - one order block of a vendor report page
///
/// `order_index` is the page-local correlation key shared with the
/// certificate fragments of the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    order_index: String,
    order_number: String,
    order_status: String,
    order_date: DateTime<Utc>,
}

impl OrderRecord {
    pub fn new(
        order_index: String,
        order_number: String,
        order_status: String,
        order_date: DateTime<Utc>,
    ) -> Self {
        Self {
            order_index,
            order_number,
            order_status,
            order_date,
        }
    }

    pub fn order_index(&self) -> &str {
        &self.order_index
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn order_status(&self) -> &str {
        &self.order_status
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }
}

/// CertificateRecord value object - the status/serial fragment of one
/// certificate inside an order, in the vendor's vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    order_index: String,
    cert_index: String,
    status: String,
    serial_number: Option<String>,
}

impl CertificateRecord {
    pub fn new(
        order_index: String,
        cert_index: String,
        status: String,
        serial_number: Option<String>,
    ) -> Self {
        Self {
            order_index,
            cert_index,
            status,
            serial_number: serial_number.filter(|s| !s.is_empty()),
        }
    }

    pub fn order_index(&self) -> &str {
        &self.order_index
    }

    pub fn cert_index(&self) -> &str {
        &self.cert_index
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Serial number as reported; absent while the certificate is pending
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }
}

/// Envelope header carried by every successful report response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEnvelope {
    total_records: u64,
}

impl ReportEnvelope {
    pub fn new(total_records: u64) -> Self {
        Self { total_records }
    }

    /// Total number of orders matching the request (`noOfResults`)
    pub fn total_records(&self) -> u64 {
        self.total_records
    }
}

/// One parsed report page
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage {
    pub envelope: ReportEnvelope,
    pub orders: Vec<OrderRecord>,
    pub certificates: Vec<CertificateRecord>,
    /// Anchored fragments dropped because a required field was missing
    pub incomplete_fragments: usize,
}
