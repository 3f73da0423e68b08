use clap::Parser;
use std::path::PathBuf;

use cert_cmdb_sync::application::dto::{FailurePolicy, SubmitMode, SyncMode};

/// Synchronize certificate vendor orders into the CMDB
#[derive(Parser, Debug)]
#[command(name = "cert-cmdb-sync")]
#[command(version)]
#[command(
    about = "Reconcile certificate vendor order reports into CMDB certificate and DNS name items",
    long_about = None
)]
pub struct Args {
    /// Configuration file (defaults to cert-cmdb-sync.config.yml in the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sync mode: full or incremental
    #[arg(short, long, default_value = "full")]
    pub mode: SyncMode,

    /// Orders requested per report page (overrides the configuration file)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// CMDB submission granularity: per-certificate or per-page
    #[arg(long, default_value = "per-certificate")]
    pub submit: SubmitMode,

    /// Abort on the first order that cannot be processed
    #[arg(long)]
    pub fail_fast: bool,

    /// Build payloads without writing to the CMDB; payloads are included in the summary
    #[arg(long)]
    pub dry_run: bool,

    /// Run summary file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Isolate
        }
    }
}
