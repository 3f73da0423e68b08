/// Integration tests for the application layer
mod test_utilities;

use cert_cmdb_sync::prelude::*;
use cert_cmdb_sync::reconciliation::domain::{
    CiValues, CERTIFICATE_CLASS, DNS_NAME_CLASS, USES_USED_BY,
};
use cert_cmdb_sync::shared::error::SyncError;
use test_utilities::mocks::*;

const ISSUED_CHAIN: &[u8] = include_bytes!("fixtures/issued_chain.p7b");
const EMPTY_CHAIN: &[u8] = include_bytes!("fixtures/empty_chain.p7b");
const LEAF_SHA256: &str = "9962045f22f5e6f8ee511b825e77c3491b5347c3ca313ebb536f30b0f9f0a2de";

fn order_block(index: u32, order_number: &str, status: &str, serial: &str) -> String {
    format!(
        "&{i}_orderNumber={order}&{i}_orderStatus=Issued&{i}_dateTime=1700000000\
         &{i}_organizationName=Example+Corp\
         &{i}_1_domain=a.example.com&{i}_1_type=SSL\
         &{i}_1_status={status}&{i}_1_lastStatusChange=1700000100&{i}_1_serialNumber={serial}",
        i = index,
        order = order_number,
        status = status,
        serial = serial,
    )
}

fn report_page(total: u64, blocks: &[String]) -> String {
    format!("errorCode=0&noOfResults={}{}", total, blocks.concat())
}

struct Harness {
    report_source: MockReportSource,
    certificate_source: MockCertificateSource,
    cmdb_reader: MockCmdbReader,
    cmdb_writer: MockCmdbWriter,
    progress_reporter: MockProgressReporter,
}

impl Harness {
    fn new(report_source: MockReportSource) -> Self {
        Self {
            report_source,
            certificate_source: MockCertificateSource::new(),
            cmdb_reader: MockCmdbReader::empty(),
            cmdb_writer: MockCmdbWriter::new(),
            progress_reporter: MockProgressReporter::new(),
        }
    }

    fn run(&self, request: SyncRequest) -> Result<SyncReport> {
        let use_case = SyncCertificatesUseCase::new(
            self.report_source.clone(),
            self.certificate_source.clone(),
            Pkcs7CertificateDecoder::new(),
            self.cmdb_reader.clone(),
            self.cmdb_writer.clone(),
            self.progress_reporter.clone(),
        );
        use_case.sync_certificates(request)
    }
}

#[test]
fn test_sync_happy_path_with_real_decoder() {
    let page = report_page(
        3,
        &[
            order_block(1, "1000001", "Valid", "AB12CD"),
            order_block(2, "1000002", "Expired", "0F0F"),
            order_block(3, "1000003", "Applied", ""),
        ],
    );
    let mut harness = Harness::new(MockReportSource::new(3).with_page(page));
    harness.certificate_source = MockCertificateSource::new().with_container("1000001", ISSUED_CHAIN);

    let report = harness.run(SyncRequest::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.orders_seen, 3);
    assert_eq!(report.certificates_accepted, 2);
    assert_eq!(report.skipped_statuses, 1);
    assert_eq!(harness.certificate_source.get_requested(), vec!["1000001"]);

    let payloads = harness.cmdb_writer.get_payloads();
    assert_eq!(payloads.len(), 2);

    // Issued: certificate + two DNS names, each related to the certificate
    let issued = &payloads[0];
    assert_eq!(issued.items()[0].class_name, CERTIFICATE_CLASS);
    let values = issued.items()[0].as_certificate().unwrap();
    assert_eq!(values.po_number, "1000001");
    assert_eq!(values.serial_number.as_deref(), Some("ab12cd"));
    assert_eq!(values.fingerprint.as_deref(), Some(LEAF_SHA256));
    assert_eq!(values.fingerprint_algorithm.as_deref(), Some("SHA256"));
    assert_eq!(values.name.as_deref(), Some("a.example.com"));
    assert_eq!(values.valid_from.as_deref(), Some("2026-10-16 14:03:12"));
    assert_eq!(values.is_ca, Some(false));
    assert_eq!(values.state, Some(LifecycleState::Issued));

    let dns_names: Vec<&str> = issued
        .items()
        .iter()
        .filter(|item| item.class_name == DNS_NAME_CLASS)
        .filter_map(|item| match &item.values {
            CiValues::DnsName(dns) => Some(dns.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(dns_names, vec!["a.example.com", "b.example.com"]);
    assert_eq!(issued.relations().len(), 2);
    for relation in issued.relations() {
        assert_eq!(relation.relation_type, USES_USED_BY);
        assert_eq!(relation.child, 0);
    }

    // Expired: certificate only, no detail columns
    let retired = &payloads[1];
    assert_eq!(retired.items().len(), 1);
    let values = retired.items()[0].as_certificate().unwrap();
    assert_eq!(values.state, Some(LifecycleState::Retired));
    assert_eq!(values.serial_number.as_deref(), Some("0f0f"));
    assert!(values.fingerprint.is_none());
}

#[test]
fn test_payload_json_shape() {
    let page = report_page(1, &[order_block(1, "1000001", "Valid", "AB12CD")]);
    let mut harness = Harness::new(MockReportSource::new(1).with_page(page));
    harness.certificate_source = MockCertificateSource::new().with_container("1000001", ISSUED_CHAIN);

    harness.run(SyncRequest::default()).unwrap();

    let payload = &harness.cmdb_writer.get_payloads()[0];
    let json = serde_json::to_value(payload).unwrap();
    assert_eq!(json["items"][0]["className"], "cmdb_ci_certificate");
    assert_eq!(json["items"][0]["values"]["po_number"], "1000001");
    assert_eq!(json["items"][0]["values"]["state"], "issued");
    assert_eq!(json["items"][1]["className"], "cmdb_ci_dns_name");
    assert_eq!(json["items"][1]["values"]["name"], "a.example.com");
    assert_eq!(
        json["relations"][0],
        serde_json::json!({"parent": 1, "child": 0, "type": "Uses::Used by"})
    );
}

#[test]
fn test_vendor_error_code_aborts_before_any_write() {
    let harness = Harness::new(
        MockReportSource::new(0).with_probe("errorCode=1&errorMessage=Login+failed"),
    );

    let err = harness.run(SyncRequest::default()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::VendorRejected { error_code: 1, .. })
    ));
    assert!(harness.cmdb_writer.get_payloads().is_empty());
    assert_eq!(harness.report_source.get_queries().len(), 1);
}

#[test]
fn test_error_code_on_later_page_aborts() {
    let first = report_page(2, &[order_block(1, "1000001", "Expired", "01")]);
    let harness = Harness::new(
        MockReportSource::new(2)
            .with_page(first)
            .with_page("errorCode=-1&errorMessage=Temporary+failure"),
    );

    let err = harness
        .run(SyncRequest {
            page_size: 1,
            ..SyncRequest::default()
        })
        .unwrap_err();

    assert!(err.to_string().contains("Temporary failure"));
    assert_eq!(harness.cmdb_writer.get_payloads().len(), 1);
}

#[test]
fn test_pagination_windows() {
    let mut source = MockReportSource::new(250);
    for _ in 0..3 {
        source = source.with_page("errorCode=0&noOfResults=250");
    }
    let harness = Harness::new(source);

    let report = harness.run(SyncRequest::default()).unwrap();

    assert_eq!(report.pages_processed, 3);
    let windows: Vec<(u64, u64)> = harness
        .report_source
        .get_queries()
        .iter()
        .filter(|q| !q.statuses_only)
        .map(|q| (q.first_result_no, q.last_result_no))
        .collect();
    assert_eq!(windows, vec![(0, 100), (100, 200), (200, 250)]);
}

#[test]
fn test_certificate_without_matching_order_is_ignored() {
    let page = format!(
        "{}&9_1_status=Valid&9_1_serialNumber=99",
        report_page(1, &[order_block(7, "1000007", "Expired", "07")])
    );
    let harness = Harness::new(MockReportSource::new(1).with_page(page));

    let report = harness.run(SyncRequest::default()).unwrap();

    assert_eq!(report.certificates_accepted, 1);
    let payloads = harness.cmdb_writer.get_payloads();
    assert_eq!(payloads.len(), 1);
    let values = payloads[0].items()[0].as_certificate().unwrap();
    assert_eq!(values.po_number, "1000007");
    assert!(harness.certificate_source.get_requested().is_empty());
}

#[test]
fn test_undecodable_container_is_isolated() {
    let page = report_page(
        2,
        &[
            order_block(1, "1000001", "Valid", "AB12CD"),
            order_block(2, "1000002", "Revoked", "02"),
        ],
    );
    let mut harness = Harness::new(MockReportSource::new(2).with_page(page));
    harness.certificate_source = MockCertificateSource::new().with_container("1000001", EMPTY_CHAIN);

    let report = harness.run(SyncRequest::default()).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].order_number, "1000001");
    assert!(report.failures[0].reason.contains("no certificates"));
    assert_eq!(report.certificates_accepted, 1);
    assert!(harness
        .progress_reporter
        .errors()
        .iter()
        .any(|e| e.contains("1000001")));
}

#[test]
fn test_fail_fast_stops_on_missing_container() {
    let page = report_page(
        2,
        &[
            order_block(1, "1000001", "Valid", "AB12CD"),
            order_block(2, "1000002", "Revoked", "02"),
        ],
    );
    let harness = Harness::new(MockReportSource::new(2).with_page(page));

    let err = harness
        .run(SyncRequest {
            failure_policy: FailurePolicy::FailFast,
            ..SyncRequest::default()
        })
        .unwrap_err();

    assert!(format!("{:#}", err).contains("404"));
    assert!(harness.cmdb_writer.get_payloads().is_empty());
}

#[test]
fn test_cmdb_rejection_keeps_run_going() {
    let page = report_page(
        2,
        &[
            order_block(1, "1000001", "Expired", "01"),
            order_block(2, "1000002", "Revoked", "02"),
        ],
    );
    let mut harness = Harness::new(MockReportSource::new(2).with_page(page));
    harness.cmdb_writer = MockCmdbWriter::new().rejecting("1000001");

    let report = harness.run(SyncRequest::default()).unwrap();

    assert_eq!(harness.cmdb_writer.get_payloads().len(), 2);
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].order_numbers, vec!["1000001"]);
    assert_eq!(report.rejections[0].status, 400);
    assert_eq!(report.certificates_accepted, 1);
    assert_eq!(report.certificates_rejected, 1);
    assert!(!report.is_clean());
}

#[test]
fn test_orders_without_certificate_are_counted() {
    let page = format!(
        "{}&2_orderNumber=1000002&2_orderStatus=Pending&2_dateTime=1700000000",
        report_page(2, &[order_block(1, "1000001", "Expired", "01")])
    );
    let harness = Harness::new(MockReportSource::new(2).with_page(page));

    let report = harness.run(SyncRequest::default()).unwrap();

    assert_eq!(report.orders_seen, 2);
    assert_eq!(report.orders_without_certificate, 1);
    assert_eq!(report.certificates_accepted, 1);
    assert!(report.is_clean());
}

#[test]
fn test_per_page_submission() {
    let page = report_page(
        3,
        &[
            order_block(1, "1000001", "Valid", "AB12CD"),
            order_block(2, "1000002", "Expired", "02"),
            order_block(3, "1000003", "Valid", "AB12CD"),
        ],
    );
    let mut harness = Harness::new(MockReportSource::new(3).with_page(page));
    harness.certificate_source = MockCertificateSource::new()
        .with_container("1000001", ISSUED_CHAIN)
        .with_container("1000003", ISSUED_CHAIN);

    let report = harness
        .run(SyncRequest {
            submit_mode: SubmitMode::PerPage,
            ..SyncRequest::default()
        })
        .unwrap();

    assert_eq!(report.certificates_accepted, 3);
    let payloads = harness.cmdb_writer.get_payloads();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];

    // [cert1, dns, dns, cert2, cert3, dns, dns]
    assert_eq!(payload.items().len(), 7);
    assert_eq!(payload.certificates().count(), 3);
    let children: Vec<usize> = payload.relations().iter().map(|r| r.child).collect();
    assert_eq!(children, vec![0, 0, 4, 4]);
    let parents: Vec<usize> = payload.relations().iter().map(|r| r.parent).collect();
    assert_eq!(parents, vec![1, 2, 5, 6]);
}

#[test]
fn test_incremental_sync_uses_latest_cmdb_certificate() {
    let mut harness = Harness::new(MockReportSource::new(0));
    harness.cmdb_reader = MockCmdbReader::with_latest_valid_from("2026-10-16 14:03:12");

    let report = harness
        .run(SyncRequest {
            mode: SyncMode::Incremental,
            ..SyncRequest::default()
        })
        .unwrap();

    assert_eq!(report.not_before.as_deref(), Some("2026-10-16 14:03:13"));
    let probe = harness.report_source.get_queries()[0];
    assert!(probe.statuses_only);
    assert_eq!(
        probe.not_before.map(|t| t.timestamp()),
        Some(1_792_159_393)
    );
}

#[test]
fn test_dry_run_recorder_captures_payloads() {
    let page = report_page(1, &[order_block(1, "1000001", "Revoked", "01")]);
    let use_case = SyncCertificatesUseCase::new(
        MockReportSource::new(1).with_page(page),
        MockCertificateSource::new(),
        Pkcs7CertificateDecoder::new(),
        MockCmdbReader::empty(),
        RecordingCmdbWriter::new(),
        MockProgressReporter::new(),
    );

    let report = use_case.execute(SyncRequest::default()).unwrap();
    let summary = RunSummary::dry_run(report, use_case.cmdb_writer().payloads());
    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();

    assert_eq!(json["dry_run"], true);
    assert_eq!(json["certificates_accepted"], 1);
    assert_eq!(json["payloads"][0]["items"][0]["values"]["state"], "revoked");
}
