/// Reconciliation core - report parsing, status mapping, correlation and
/// CMDB payload construction. Free of I/O; collaborators live behind ports.
pub mod domain;
pub mod policies;
pub mod services;
