use crate::reconciliation::domain::CertificateDetail;
use crate::shared::Result;

/// CertificateDecoder port turning a signed container into certificate metadata
pub trait CertificateDecoder {
    /// Decodes the first certificate of the container's chain
    ///
    /// # Errors
    /// Returns an error if the bytes are not a signed-data container or the
    /// certificate inside cannot be parsed
    fn decode(&self, container: &[u8]) -> Result<CertificateDetail>;
}
