mod status_mapping;

pub use status_mapping::StatusMapper;
