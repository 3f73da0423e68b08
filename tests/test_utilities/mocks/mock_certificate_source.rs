use cert_cmdb_sync::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock CertificateSource returning canned containers per order number
#[derive(Clone, Default)]
pub struct MockCertificateSource {
    containers: HashMap<String, Vec<u8>>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockCertificateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, order_number: &str, container: &[u8]) -> Self {
        self.containers
            .insert(order_number.to_string(), container.to_vec());
        self
    }

    pub fn get_requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl CertificateSource for MockCertificateSource {
    fn fetch_certificate_container(&self, order_number: &str) -> Result<Vec<u8>> {
        self.requested
            .lock()
            .unwrap()
            .push(order_number.to_string());
        self.containers
            .get(order_number)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP status 404 Not Found for order {}", order_number))
    }
}
