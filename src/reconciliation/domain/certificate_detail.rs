use chrono::{DateTime, Utc};

/// Canonical attributes of an issued certificate
///
/// Always derived from the decoded certificate container, never from the
/// report text (the report carries neither a fingerprint nor SAN entries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetail {
    pub common_name: String,
    /// Lower-case hex SHA-256 of the certificate's DER encoding
    pub fingerprint_sha256: String,
    pub signature_algorithm: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub is_ca: bool,
    /// X.509 version as displayed (3 for v3 certificates)
    pub version: u32,
    pub issuer_common_name: String,
    pub issuer_dn: String,
    pub subject_common_name: String,
    pub subject_dn: String,
    pub dns_names: Vec<String>,
    /// Lower-case hex of the raw serial number bytes
    pub serial_number: String,
}

impl CertificateDetail {
    /// Compares a vendor-reported serial with the decoded one, ignoring case
    /// and leading zero octets
    pub fn serial_matches(&self, reported: &str) -> bool {
        let normalize = |s: &str| {
            s.chars()
                .filter(|c| *c != ':')
                .collect::<String>()
                .to_lowercase()
                .trim_start_matches('0')
                .to_string()
        };
        normalize(&self.serial_number) == normalize(reported)
    }
}
