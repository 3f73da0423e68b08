use crate::ports::outbound::{CmdbWriter, UpsertOutcome};
use crate::reconciliation::domain::CmdbUpsertPayload;
use crate::shared::Result;
use std::cell::RefCell;

/// RecordingCmdbWriter adapter used by `--dry-run`
///
/// Accepts every payload and keeps it in memory so the run summary can show
/// exactly what would have been submitted.
#[derive(Debug, Default)]
pub struct RecordingCmdbWriter {
    payloads: RefCell<Vec<CmdbUpsertPayload>>,
}

impl RecordingCmdbWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads recorded so far, in submission order
    pub fn payloads(&self) -> Vec<CmdbUpsertPayload> {
        self.payloads.borrow().clone()
    }
}

impl CmdbWriter for RecordingCmdbWriter {
    fn upsert(&self, payload: &CmdbUpsertPayload) -> Result<UpsertOutcome> {
        self.payloads.borrow_mut().push(payload.clone());
        Ok(UpsertOutcome::Accepted)
    }
}
