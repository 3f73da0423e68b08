use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized certificate lifecycle state stored in the CMDB `state` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Issued,
    Retired,
    Revoked,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Issued => "issued",
            LifecycleState::Retired => "retired",
            LifecycleState::Revoked => "revoked",
        }
    }

    /// Only issued certificates have a downloadable container to decode
    pub fn requires_detail(&self) -> bool {
        matches!(self, LifecycleState::Issued)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
