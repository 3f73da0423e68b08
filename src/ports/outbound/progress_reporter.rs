/// ProgressReporter port for run progress and operator-facing log lines
///
/// Everything reported here goes to the operator (stderr in the CLI), never
/// to the machine-readable run summary.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports page progress
    ///
    /// # Arguments
    /// * `current` - Pages completed so far
    /// * `total` - Total number of pages
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning, a CMDB rejection or an isolated order failure
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
