use cert_cmdb_sync::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ReportSource serving a fixed envelope to the probe and scripted pages
/// in request order
#[derive(Clone)]
pub struct MockReportSource {
    probe: String,
    pages: Vec<String>,
    pub queries: Arc<Mutex<Vec<ReportQuery>>>,
}

impl MockReportSource {
    pub fn new(total_records: u64) -> Self {
        Self {
            probe: format!("errorCode=0&noOfResults={}", total_records),
            pages: Vec::new(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers the probe with an arbitrary body (e.g. a vendor error)
    pub fn with_probe(mut self, body: &str) -> Self {
        self.probe = body.to_string();
        self
    }

    pub fn with_page(mut self, body: impl Into<String>) -> Self {
        self.pages.push(body.into());
        self
    }

    pub fn get_queries(&self) -> Vec<ReportQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl ReportSource for MockReportSource {
    fn fetch_report(&self, query: &ReportQuery) -> Result<String> {
        let mut queries = self.queries.lock().unwrap();
        let served_pages = queries.iter().filter(|q| !q.statuses_only).count();
        queries.push(*query);

        if query.statuses_only {
            return Ok(self.probe.clone());
        }
        self.pages
            .get(served_pages)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unexpected page request #{}", served_pages))
    }
}
