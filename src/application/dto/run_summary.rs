use super::SyncReport;
use crate::reconciliation::domain::CmdbUpsertPayload;
use crate::shared::Result;
use serde::Serialize;

/// RunSummary - the machine-readable document printed after a run
///
/// The report counters sit at the top level; dry runs add the payloads that
/// would have been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub report: SyncReport,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payloads: Option<Vec<CmdbUpsertPayload>>,
}

impl RunSummary {
    pub fn new(report: SyncReport) -> Self {
        Self {
            report,
            dry_run: false,
            payloads: None,
        }
    }

    pub fn dry_run(report: SyncReport, payloads: Vec<CmdbUpsertPayload>) -> Self {
        Self {
            report,
            dry_run: true,
            payloads: Some(payloads),
        }
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
