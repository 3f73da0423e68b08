use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const PAGE_BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] page {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it never mixes with the run summary on stdout.
/// Page progress is drawn with an indicatif bar; log lines emitted while the
/// bar is live are printed above it.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            return pb.clone();
        }

        let style = ProgressStyle::default_bar()
            .template(PAGE_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        let pb = ProgressBar::new(total as u64);
        pb.set_style(style);
        *pb_option = Some(pb.clone());
        pb
    }

    /// Prints a line, suspending the progress bar while it is drawn
    fn print_line(&self, message: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) if !pb.is_finished() => pb.suspend(|| eprintln!("{}", message)),
            _ => eprintln!("{}", message),
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print_line(message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.print_line(message);
    }

    fn report_completion(&self, message: &str) {
        if let Some(pb) = self.progress_bar.borrow().as_ref() {
            pb.finish_and_clear();
        }
        eprintln!();
        eprintln!("{}", message);
    }
}
