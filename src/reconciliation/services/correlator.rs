use crate::reconciliation::domain::{CertificateRecord, OrderRecord};

/// An order joined with the certificate fragment that shares its index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatedPair<'a> {
    pub order: &'a OrderRecord,
    pub certificate: &'a CertificateRecord,
}

/// Outcome of correlating one report page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlation<'a> {
    /// Pairs in order-extraction order
    pub pairs: Vec<CorrelatedPair<'a>>,
    /// Order numbers that carried more than one certificate fragment
    pub orders_with_extra_certificates: Vec<&'a str>,
    /// Orders without any certificate fragment
    pub orders_without_certificate: usize,
}

/// Correlator service joining orders and certificates by order index
///
/// One certificate per order: the first fragment with a matching index wins
/// and any later fragment for the same order is ignored (and surfaced through
/// `orders_with_extra_certificates`). Certificate fragments whose index
/// matches no order on the page are ignored.
pub struct Correlator;

impl Correlator {
    pub fn correlate<'a>(
        orders: &'a [OrderRecord],
        certificates: &'a [CertificateRecord],
    ) -> Correlation<'a> {
        let mut correlation = Correlation::default();

        for order in orders {
            let mut matches = certificates
                .iter()
                .filter(|certificate| certificate.order_index() == order.order_index());

            match matches.next() {
                Some(certificate) => {
                    correlation.pairs.push(CorrelatedPair { order, certificate });
                    if matches.next().is_some() {
                        correlation
                            .orders_with_extra_certificates
                            .push(order.order_number());
                    }
                }
                None => correlation.orders_without_certificate += 1,
            }
        }

        correlation
    }
}
