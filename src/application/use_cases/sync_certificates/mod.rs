use crate::application::dto::{
    CmdbRejection, FailurePolicy, OrderFailure, SubmitMode, SyncMode, SyncReport, SyncRequest,
};
use crate::ports::inbound::CertificateSyncPort;
use crate::ports::outbound::{
    CertificateDecoder, CertificateSource, CmdbReader, CmdbWriter, ProgressReporter, ReportQuery,
    ReportSource, UpsertOutcome,
};
use crate::reconciliation::domain::{
    format_cmdb_time, parse_cmdb_time, CertificateDetail, PagePlan, PageWindow, ReportEnvelope,
};
use crate::reconciliation::policies::StatusMapper;
use crate::reconciliation::services::{CorrelatedPair, Correlator, PayloadBuilder, ReportExtractor};
use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::{DateTime, TimeDelta, Utc};

/// SyncCertificatesUseCase - Core use case for certificate synchronization
///
/// Drives the report pagination and, for every page, the
/// extract -> correlate -> map -> decode -> build -> submit pipeline.
/// Everything runs sequentially: a page's CMDB writes complete before the
/// next page is requested.
///
/// # Type Parameters
/// * `RS` - ReportSource implementation
/// * `CS` - CertificateSource implementation
/// * `CD` - CertificateDecoder implementation
/// * `CR` - CmdbReader implementation
/// * `CW` - CmdbWriter implementation
/// * `PR` - ProgressReporter implementation
pub struct SyncCertificatesUseCase<RS, CS, CD, CR, CW, PR> {
    report_source: RS,
    certificate_source: CS,
    certificate_decoder: CD,
    cmdb_reader: CR,
    cmdb_writer: CW,
    progress_reporter: PR,
}

impl<RS, CS, CD, CR, CW, PR> SyncCertificatesUseCase<RS, CS, CD, CR, CW, PR>
where
    RS: ReportSource,
    CS: CertificateSource,
    CD: CertificateDecoder,
    CR: CmdbReader,
    CW: CmdbWriter,
    PR: ProgressReporter,
{
    /// Creates a new SyncCertificatesUseCase with injected dependencies
    pub fn new(
        report_source: RS,
        certificate_source: CS,
        certificate_decoder: CD,
        cmdb_reader: CR,
        cmdb_writer: CW,
        progress_reporter: PR,
    ) -> Self {
        Self {
            report_source,
            certificate_source,
            certificate_decoder,
            cmdb_reader,
            cmdb_writer,
            progress_reporter,
        }
    }

    /// The injected CMDB writer (the dry-run recorder is read back through this)
    pub fn cmdb_writer(&self) -> &CW {
        &self.cmdb_writer
    }

    /// Executes one synchronization run
    ///
    /// # Returns
    /// SyncReport with counters, CMDB rejections and isolated order failures
    pub fn execute(&self, request: SyncRequest) -> Result<SyncReport> {
        let mut report = SyncReport::new(request.mode);

        // Step 1: Resolve the vendor-side filter for incremental runs
        let not_before = self.resolve_not_before(&request)?;
        report.not_before = not_before.map(format_cmdb_time);

        // Step 2: Probe for the record count
        let envelope = self.probe(not_before)?;
        report.total_records = envelope.total_records();

        // Step 3: Plan the pages
        let plan = PagePlan::new(envelope.total_records(), request.page_size)?;
        let page_count = plan.page_count() as usize;
        self.progress_reporter.report(&format!(
            "📋 Vendor reports {} order(s), {} page(s) of {}",
            envelope.total_records(),
            page_count,
            request.page_size
        ));

        // Step 4: Process pages strictly in sequence
        for window in plan.windows() {
            self.process_page(&window, not_before, &request, &mut report)?;
            report.pages_processed += 1;
            self.progress_reporter.report_progress(
                report.pages_processed as usize,
                page_count,
                Some(&format!(
                    "results {}..{}",
                    window.first_result_no, window.last_result_no
                )),
            );
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Synchronization complete: {} certificate(s) accepted, {} rejected, {} skipped, {} failed order(s)",
            report.certificates_accepted,
            report.certificates_rejected,
            report.skipped_statuses,
            report.failures.len()
        ));

        Ok(report)
    }

    /// Returns the `notBefore` filter for incremental runs: one second after
    /// the newest certificate the CMDB already holds
    fn resolve_not_before(&self, request: &SyncRequest) -> Result<Option<DateTime<Utc>>> {
        if request.mode != SyncMode::Incremental {
            return Ok(None);
        }

        self.progress_reporter
            .report("🔎 Looking up the latest certificate in the CMDB...");

        let latest_valid_from = self
            .cmdb_reader
            .latest_issued_certificate()?
            .and_then(|certificate| certificate.valid_from)
            .and_then(|valid_from| parse_cmdb_time(&valid_from));

        match latest_valid_from {
            Some(valid_from) => {
                let not_before = valid_from + TimeDelta::seconds(1);
                self.progress_reporter.report(&format!(
                    "   - Requesting certificates valid from {}",
                    format_cmdb_time(not_before)
                ));
                Ok(Some(not_before))
            }
            None => {
                self.progress_reporter.report(
                    "   - No reconciled certificate found, falling back to a full synchronization",
                );
                Ok(None)
            }
        }
    }

    fn probe(&self, not_before: Option<DateTime<Utc>>) -> Result<ReportEnvelope> {
        let text = self
            .report_source
            .fetch_report(&ReportQuery::probe(not_before))?;
        ReportExtractor::parse_envelope(&text)
    }

    /// Fetches, parses and reconciles one report page
    fn process_page(
        &self,
        window: &PageWindow,
        not_before: Option<DateTime<Utc>>,
        request: &SyncRequest,
        report: &mut SyncReport,
    ) -> Result<()> {
        let text = self
            .report_source
            .fetch_report(&ReportQuery::page(window, not_before))?;
        let page = ReportExtractor::extract(&text)?;

        report.orders_seen += page.orders.len();
        report.incomplete_fragments += page.incomplete_fragments;
        if page.incomplete_fragments > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} incomplete report fragment(s) on page {} were skipped",
                page.incomplete_fragments,
                window.index + 1
            ));
        }

        let correlation = Correlator::correlate(&page.orders, &page.certificates);
        for order_number in &correlation.orders_with_extra_certificates {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Order {} lists more than one certificate; only the first is reconciled",
                order_number
            ));
        }
        report.orders_with_extra_certificates += correlation.orders_with_extra_certificates.len();
        report.orders_without_certificate += correlation.orders_without_certificate;

        let mut page_builder = PayloadBuilder::new();

        for pair in correlation.pairs {
            let Some(state) = StatusMapper::map(pair.certificate.status()) else {
                report.skipped_statuses += 1;
                continue;
            };

            let detail = if state.requires_detail() {
                match self.fetch_detail(pair) {
                    Ok(detail) => Some(detail),
                    Err(error) => {
                        let order_numbers = [pair.order.order_number().to_string()];
                        self.isolate_or_abort(request, report, &order_numbers, error)?;
                        continue;
                    }
                }
            } else {
                None
            };

            match request.submit_mode {
                SubmitMode::PerCertificate => {
                    let mut builder = PayloadBuilder::new();
                    builder.add_certificate(pair, state, detail.as_ref())?;
                    self.submit(builder, request, report)?;
                }
                SubmitMode::PerPage => {
                    page_builder.add_certificate(pair, state, detail.as_ref())?;
                }
            }
        }

        if !page_builder.is_empty() {
            self.submit(page_builder, request, report)?;
        }

        Ok(())
    }

    /// Downloads and decodes the container of an issued certificate
    fn fetch_detail(&self, pair: CorrelatedPair<'_>) -> Result<CertificateDetail> {
        let order_number = pair.order.order_number();
        let container = self
            .certificate_source
            .fetch_certificate_container(order_number)?;

        let detail = self
            .certificate_decoder
            .decode(&container)
            .map_err(|e| SyncError::CertificateDecode {
                order_number: order_number.to_string(),
                details: format!("{:#}", e),
            })?;

        if let Some(reported) = pair.certificate.serial_number() {
            if !detail.serial_matches(reported) {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Order {} reports serial {} but its certificate carries {}",
                    order_number, reported, detail.serial_number
                ));
            }
        }

        Ok(detail)
    }

    /// Submits a payload; rejections are logged and recorded, never fatal
    fn submit(
        &self,
        builder: PayloadBuilder,
        request: &SyncRequest,
        report: &mut SyncReport,
    ) -> Result<()> {
        let order_numbers = builder.order_numbers().to_vec();
        let payload = builder.build();
        let certificate_count = payload.certificates().count();

        match self.cmdb_writer.upsert(&payload) {
            Ok(UpsertOutcome::Accepted) => {
                report.certificates_accepted += certificate_count;
                Ok(())
            }
            Ok(UpsertOutcome::Rejected { status, body }) => {
                report.certificates_rejected += certificate_count;
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: CMDB rejected the payload for order(s) {} (HTTP {}): {}",
                    order_numbers.join(", "),
                    status,
                    body
                ));
                report.rejections.push(CmdbRejection {
                    order_numbers,
                    status,
                    body,
                });
                Ok(())
            }
            Err(error) => self.isolate_or_abort(request, report, &order_numbers, error),
        }
    }

    /// Applies the failure policy to an order-level error
    fn isolate_or_abort(
        &self,
        request: &SyncRequest,
        report: &mut SyncReport,
        order_numbers: &[String],
        error: anyhow::Error,
    ) -> Result<()> {
        match request.failure_policy {
            FailurePolicy::FailFast => {
                Err(error.context(format!("Order(s) {} failed", order_numbers.join(", "))))
            }
            FailurePolicy::Isolate => {
                let reason = format!("{:#}", error);
                for order_number in order_numbers {
                    self.progress_reporter.report_error(&format!(
                        "❌ Order {} skipped: {}",
                        order_number, reason
                    ));
                    report.failures.push(OrderFailure {
                        order_number: order_number.clone(),
                        reason: reason.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}

impl<RS, CS, CD, CR, CW, PR> CertificateSyncPort for SyncCertificatesUseCase<RS, CS, CD, CR, CW, PR>
where
    RS: ReportSource,
    CS: CertificateSource,
    CD: CertificateDecoder,
    CR: CmdbReader,
    CW: CmdbWriter,
    PR: ProgressReporter,
{
    fn sync_certificates(&self, request: SyncRequest) -> Result<SyncReport> {
        self.execute(request)
    }
}
