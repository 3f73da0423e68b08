use serde::Serialize;

/// Which orders a run asks the vendor for
///
/// Shared by the CLI (inbound adapter) and the use case, so it lives in the
/// application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    /// Every order the vendor reports (default)
    #[default]
    Full,
    /// Only certificates valid after the newest one already in the CMDB
    Incremental,
}

impl std::str::FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(SyncMode::Full),
            "incremental" | "inc" => Ok(SyncMode::Incremental),
            _ => Err(format!(
                "Invalid mode: {}. Please specify 'full' or 'incremental'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Full => write!(f, "full"),
            SyncMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// What happens when one order cannot be processed (container download,
/// decoding, or CMDB transport failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure and continue with the next order (default)
    #[default]
    Isolate,
    /// Abort the whole run on the first failing order
    FailFast,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "isolate"),
            FailurePolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

/// Granularity of CMDB submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitMode {
    /// One payload per certificate (default)
    #[default]
    PerCertificate,
    /// One payload holding every certificate of a report page
    PerPage,
}

impl std::str::FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-certificate" | "certificate" => Ok(SubmitMode::PerCertificate),
            "per-page" | "page" => Ok(SubmitMode::PerPage),
            _ => Err(format!(
                "Invalid submit mode: {}. Please specify 'per-certificate' or 'per-page'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitMode::PerCertificate => write!(f, "per-certificate"),
            SubmitMode::PerPage => write!(f, "per-page"),
        }
    }
}
