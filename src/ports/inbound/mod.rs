/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod certificate_sync_port;

pub use certificate_sync_port::CertificateSyncPort;
