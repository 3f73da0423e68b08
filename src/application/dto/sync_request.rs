use super::{FailurePolicy, SubmitMode, SyncMode};
use crate::reconciliation::domain::DEFAULT_PAGE_SIZE;

/// SyncRequest - Internal request DTO for the synchronization use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub mode: SyncMode,
    /// Orders requested per report page
    pub page_size: u64,
    pub failure_policy: FailurePolicy,
    pub submit_mode: SubmitMode,
}

impl SyncRequest {
    pub fn new(
        mode: SyncMode,
        page_size: u64,
        failure_policy: FailurePolicy,
        submit_mode: SubmitMode,
    ) -> Self {
        Self {
            mode,
            page_size,
            failure_policy,
            submit_mode,
        }
    }
}

impl Default for SyncRequest {
    fn default() -> Self {
        Self::new(
            SyncMode::default(),
            DEFAULT_PAGE_SIZE,
            FailurePolicy::default(),
            SubmitMode::default(),
        )
    }
}
