mod cli;

use cert_cmdb_sync::adapters::outbound::console::StderrProgressReporter;
use cert_cmdb_sync::adapters::outbound::crypto::Pkcs7CertificateDecoder;
use cert_cmdb_sync::adapters::outbound::dry_run::RecordingCmdbWriter;
use cert_cmdb_sync::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use cert_cmdb_sync::adapters::outbound::network::{SectigoClient, ServiceNowClient};
use cert_cmdb_sync::application::dto::{RunSummary, SyncRequest};
use cert_cmdb_sync::application::use_cases::SyncCertificatesUseCase;
use cert_cmdb_sync::config::{locate_config, SyncConfig};
use cert_cmdb_sync::ports::outbound::{CmdbWriter, OutputPresenter};
use cert_cmdb_sync::shared::error::ExitCode;
use cert_cmdb_sync::shared::Result;
use cli::Args;
use std::process;

type SyncUseCase<CW> = SyncCertificatesUseCase<
    SectigoClient,
    SectigoClient,
    Pkcs7CertificateDecoder,
    ServiceNowClient,
    CW,
    StderrProgressReporter,
>;

fn main() {
    // Clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    // Load and resolve configuration
    let working_dir = std::env::current_dir()?;
    let config =
        locate_config(args.config.as_deref(), &working_dir)?.into_sync_config(args.page_size)?;

    let request = SyncRequest::new(
        args.mode,
        config.page_size,
        args.failure_policy(),
        args.submit,
    );

    eprintln!(
        "🔄 Starting {} synchronization ({} submission, {} policy{})",
        request.mode,
        request.submit_mode,
        request.failure_policy,
        if args.dry_run { ", dry run" } else { "" }
    );

    // Execute use case with the real or the recording CMDB writer
    let summary = if args.dry_run {
        let use_case = build_use_case(&config, RecordingCmdbWriter::new())?;
        let report = use_case.execute(request)?;
        RunSummary::dry_run(report, use_case.cmdb_writer().payloads())
    } else {
        let use_case = build_use_case(&config, ServiceNowClient::new(config.cmdb.clone())?)?;
        RunSummary::new(use_case.execute(request)?)
    };

    // Present the run summary
    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&summary.to_json()?)?;

    if summary.report.is_clean() {
        Ok(ExitCode::Success)
    } else {
        eprintln!(
            "⚠️  Finished with {} CMDB rejection(s) and {} failed order(s)",
            summary.report.rejections.len(),
            summary.report.failures.len()
        );
        Ok(ExitCode::PartialFailure)
    }
}

/// Wires the network adapters into the use case (Dependency Injection)
fn build_use_case<CW: CmdbWriter>(config: &SyncConfig, cmdb_writer: CW) -> Result<SyncUseCase<CW>> {
    let vendor = SectigoClient::new(config.vendor.clone())?;
    let cmdb_reader = ServiceNowClient::new(config.cmdb.clone())?;

    Ok(SyncCertificatesUseCase::new(
        vendor.clone(),
        vendor,
        Pkcs7CertificateDecoder::new(),
        cmdb_reader,
        cmdb_writer,
        StderrProgressReporter::new(),
    ))
}
