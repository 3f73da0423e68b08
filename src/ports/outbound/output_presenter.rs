use crate::shared::Result;

/// OutputPresenter port for presenting the run summary
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the JSON run summary is written.
pub trait OutputPresenter {
    /// Presents the rendered summary to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}
