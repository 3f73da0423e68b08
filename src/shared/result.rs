/// Type alias for Result with anyhow::Error as the error type.
/// Domain failures are raised as `SyncError` and travel inside the anyhow error.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
