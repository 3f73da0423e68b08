/// Dry-run adapters that record instead of writing
mod recording_cmdb_writer;

pub use recording_cmdb_writer::RecordingCmdbWriter;
