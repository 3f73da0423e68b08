/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the reconciliation core isolated.
mod run_summary;
mod sync_options;
mod sync_report;
mod sync_request;

pub use run_summary::RunSummary;
pub use sync_options::{FailurePolicy, SubmitMode, SyncMode};
pub use sync_report::{CmdbRejection, OrderFailure, SyncReport};
pub use sync_request::SyncRequest;
