use super::CorrelatedPair;
use crate::reconciliation::domain::{
    CertificateDetail, CmdbUpsertPayload, ConfigurationItem, LifecycleState, UniqueCertificate,
    USES_USED_BY,
};
use crate::shared::Result;

/// PayloadBuilder service assembling identify-and-reconcile payloads
///
/// Holds one payload arena; it may receive a single certificate or every
/// certificate of a page. Relationship indices always point at the real
/// position of the items in the shared `items` array.
#[derive(Debug, Default)]
pub struct PayloadBuilder {
    payload: CmdbUpsertPayload,
    order_numbers: Vec<String>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the certificate item of `pair` and, when a decoded detail is
    /// given, one DNS-name item and one `Uses::Used by` relation per SAN.
    ///
    /// # Returns
    /// The index of the certificate item inside the payload
    pub fn add_certificate(
        &mut self,
        pair: CorrelatedPair<'_>,
        state: LifecycleState,
        detail: Option<&CertificateDetail>,
    ) -> Result<usize> {
        let mut values = UniqueCertificate::observed(pair.order, pair.certificate, state);
        if let Some(detail) = detail {
            values.merge_detail(detail);
        }

        let certificate_index = self.payload.push_item(ConfigurationItem::certificate(values));

        for dns_name in detail.iter().flat_map(|detail| detail.dns_names.iter()) {
            let dns_index = self.payload.push_item(ConfigurationItem::dns_name(dns_name));
            self.payload
                .relate(dns_index, certificate_index, USES_USED_BY)?;
        }

        self.order_numbers.push(pair.order.order_number().to_string());
        Ok(certificate_index)
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Order numbers of the certificates added so far, in insertion order
    pub fn order_numbers(&self) -> &[String] {
        &self.order_numbers
    }

    pub fn build(self) -> CmdbUpsertPayload {
        self.payload
    }
}
