/// Filesystem adapters for writing the run summary
mod file_writer;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
