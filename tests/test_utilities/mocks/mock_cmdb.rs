use cert_cmdb_sync::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock CmdbReader returning a fixed latest certificate
#[derive(Clone, Default)]
pub struct MockCmdbReader {
    latest: Option<UniqueCertificate>,
}

impl MockCmdbReader {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_latest_valid_from(valid_from: &str) -> Self {
        Self {
            latest: Some(UniqueCertificate {
                po_number: "1000001".to_string(),
                valid_from: Some(valid_from.to_string()),
                state: Some(LifecycleState::Issued),
                ..UniqueCertificate::default()
            }),
        }
    }
}

impl CmdbReader for MockCmdbReader {
    fn latest_issued_certificate(&self) -> Result<Option<UniqueCertificate>> {
        Ok(self.latest.clone())
    }
}

/// Mock CmdbWriter capturing payloads; rejects payloads that contain any of
/// the configured order numbers
#[derive(Clone, Default)]
pub struct MockCmdbWriter {
    rejected_orders: HashSet<String>,
    pub payloads: Arc<Mutex<Vec<CmdbUpsertPayload>>>,
}

impl MockCmdbWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, order_number: &str) -> Self {
        self.rejected_orders.insert(order_number.to_string());
        self
    }

    pub fn get_payloads(&self) -> Vec<CmdbUpsertPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

impl CmdbWriter for MockCmdbWriter {
    fn upsert(&self, payload: &CmdbUpsertPayload) -> Result<UpsertOutcome> {
        self.payloads.lock().unwrap().push(payload.clone());
        let rejected = payload
            .certificates()
            .any(|c| self.rejected_orders.contains(&c.po_number));
        if rejected {
            return Ok(UpsertOutcome::Rejected {
                status: 400,
                body: r#"{"error":{"message":"Identification failed"}}"#.to_string(),
            });
        }
        Ok(UpsertOutcome::Accepted)
    }
}
