use crate::shared::Result;

/// CertificateSource port for downloading signed certificate containers
///
/// A container only exists once the vendor has issued the certificate.
pub trait CertificateSource {
    /// Downloads the signed certificate container (PKCS#7) of an order
    ///
    /// # Errors
    /// Returns an error if the request cannot be completed or the vendor
    /// answers with a non-success status
    fn fetch_certificate_container(&self, order_number: &str) -> Result<Vec<u8>>;
}
