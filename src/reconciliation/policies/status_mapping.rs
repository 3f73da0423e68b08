use crate::reconciliation::domain::LifecycleState;

/// StatusMapper policy translating vendor certificate statuses
///
/// Mapping rules:
/// - `Valid` -> issued
/// - `Expired` -> retired
/// - `Revoked` -> revoked
///
/// Every other status (pending, applied, rejected, unknown or empty) is not
/// actionable and yields `None`.
pub struct StatusMapper;

impl StatusMapper {
    pub fn map(vendor_status: &str) -> Option<LifecycleState> {
        match vendor_status {
            "Valid" => Some(LifecycleState::Issued),
            "Expired" => Some(LifecycleState::Retired),
            "Revoked" => Some(LifecycleState::Revoked),
            _ => None,
        }
    }
}
