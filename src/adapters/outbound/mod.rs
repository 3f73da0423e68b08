/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod crypto;
pub mod dry_run;
pub mod filesystem;
pub mod network;
