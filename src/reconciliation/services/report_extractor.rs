use crate::reconciliation::domain::{CertificateRecord, OrderRecord, ReportEnvelope, ReportPage};
use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::{DateTime, TimeZone, Utc};

const ERROR_CODE_KEY: &str = "errorCode";
const ERROR_MESSAGE_KEY: &str = "errorMessage";
const RECORD_COUNT_KEY: &str = "noOfResults";
const ORDER_ANCHOR: &str = "orderNumber";
const CERTIFICATE_ANCHOR: &str = "status";

/// Classified report key
///
/// `7_orderNumber` is an order key, `7_1_status` a certificate key and
/// anything without a numeric index prefix (`errorCode`) an envelope key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKey<'a> {
    Envelope(&'a str),
    Order {
        order_index: &'a str,
        field: &'a str,
    },
    Certificate {
        order_index: &'a str,
        cert_index: &'a str,
        field: &'a str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReportToken<'a> {
    key: TokenKey<'a>,
    value: String,
}

/// Incremental builder for one record kind, driven by `scan`
trait FragmentBuilder: Sized {
    type Record;

    /// Starts a fragment when `token` is this record kind's anchor
    fn start(token: &ReportToken<'_>) -> Option<Self>;

    /// Whether `token` is an optional field of the fragment being built
    fn accepts(&self, token: &ReportToken<'_>) -> bool;

    fn absorb(&mut self, token: &ReportToken<'_>);

    /// Emits the record, or `None` when a required field never showed up
    fn finish(self) -> Option<Self::Record>;
}

enum ScanState<B> {
    ExpectAnchor,
    ConsumeOptionalFields(B),
}

impl<B: FragmentBuilder> ScanState<B> {
    fn expect_anchor(token: &ReportToken<'_>) -> Self {
        B::start(token).map_or(ScanState::ExpectAnchor, ScanState::ConsumeOptionalFields)
    }
}

struct ScanOutcome<R> {
    records: Vec<R>,
    incomplete: usize,
}

impl<R> ScanOutcome<R> {
    fn emit<B: FragmentBuilder<Record = R>>(&mut self, builder: B) {
        match builder.finish() {
            Some(record) => self.records.push(record),
            None => self.incomplete += 1,
        }
    }
}

/// Runs the `ExpectAnchor -> ConsumeOptionalFields -> Emit` machine for one
/// record kind over the whole token stream.
fn scan<B: FragmentBuilder>(tokens: &[ReportToken<'_>]) -> ScanOutcome<B::Record> {
    let mut outcome = ScanOutcome {
        records: Vec::new(),
        incomplete: 0,
    };
    let mut state = ScanState::<B>::ExpectAnchor;

    for token in tokens {
        state = match state {
            ScanState::ConsumeOptionalFields(mut builder) if builder.accepts(token) => {
                builder.absorb(token);
                ScanState::ConsumeOptionalFields(builder)
            }
            ScanState::ConsumeOptionalFields(builder) => {
                outcome.emit(builder);
                ScanState::expect_anchor(token)
            }
            ScanState::ExpectAnchor => ScanState::expect_anchor(token),
        };
    }

    if let ScanState::ConsumeOptionalFields(builder) = state {
        outcome.emit(builder);
    }

    outcome
}

struct OrderFragment {
    order_index: String,
    order_number: String,
    order_status: Option<String>,
    date_time: Option<String>,
}

impl FragmentBuilder for OrderFragment {
    type Record = OrderRecord;

    fn start(token: &ReportToken<'_>) -> Option<Self> {
        match token.key {
            TokenKey::Order { order_index, field } if field == ORDER_ANCHOR => Some(Self {
                order_index: order_index.to_string(),
                order_number: token.value.clone(),
                order_status: None,
                date_time: None,
            }),
            _ => None,
        }
    }

    fn accepts(&self, token: &ReportToken<'_>) -> bool {
        matches!(
            token.key,
            TokenKey::Order { order_index, field }
                if order_index == self.order_index && field != ORDER_ANCHOR
        )
    }

    fn absorb(&mut self, token: &ReportToken<'_>) {
        if let TokenKey::Order { field, .. } = token.key {
            match field {
                "orderStatus" => self.order_status = Some(token.value.clone()),
                "dateTime" => self.date_time = Some(token.value.clone()),
                // organisation and address details are not reconciled
                _ => {}
            }
        }
    }

    fn finish(self) -> Option<OrderRecord> {
        if self.order_number.is_empty() {
            return None;
        }
        let order_date = parse_unix_seconds(self.date_time.as_deref()?)?;
        Some(OrderRecord::new(
            self.order_index,
            self.order_number,
            self.order_status?,
            order_date,
        ))
    }
}

struct CertificateFragment {
    order_index: String,
    cert_index: String,
    status: String,
    serial_number: Option<String>,
}

impl FragmentBuilder for CertificateFragment {
    type Record = CertificateRecord;

    fn start(token: &ReportToken<'_>) -> Option<Self> {
        match token.key {
            TokenKey::Certificate {
                order_index,
                cert_index,
                field,
            } if field == CERTIFICATE_ANCHOR => Some(Self {
                order_index: order_index.to_string(),
                cert_index: cert_index.to_string(),
                status: token.value.clone(),
                serial_number: None,
            }),
            _ => None,
        }
    }

    fn accepts(&self, token: &ReportToken<'_>) -> bool {
        matches!(
            token.key,
            TokenKey::Certificate { order_index, cert_index, field }
                if order_index == self.order_index
                    && cert_index == self.cert_index
                    && field != CERTIFICATE_ANCHOR
        )
    }

    fn absorb(&mut self, token: &ReportToken<'_>) {
        if let TokenKey::Certificate { field, .. } = token.key {
            // lastStatusChange, notBefore, notAfter and the product term
            // fields are informational; the decoded container is authoritative
            if field == "serialNumber" {
                self.serial_number = Some(token.value.clone());
            }
        }
    }

    fn finish(self) -> Option<CertificateRecord> {
        Some(CertificateRecord::new(
            self.order_index,
            self.cert_index,
            self.status,
            self.serial_number,
        ))
    }
}

/// ReportExtractor service turning vendor report text into typed fragments
///
/// The report is a flat `key=value&key=value` text with numeric index
/// prefixes and no nesting. Orders and certificates are interleaved and
/// padded with a variable number of optional fields, so each record kind is
/// collected by its own scan over the same token stream and the two are
/// joined later by order index.
pub struct ReportExtractor;

impl ReportExtractor {
    /// Parses only the envelope header (`errorCode`, `noOfResults`)
    ///
    /// # Errors
    /// - `SyncError::VendorRejected` when `errorCode` is not zero
    /// - `SyncError::MalformedReport` when the header is missing or not numeric
    pub fn parse_envelope(text: &str) -> Result<ReportEnvelope> {
        let tokens = tokenize(text);
        envelope(&tokens)
    }

    /// Parses a full report page
    ///
    /// # Errors
    /// Same as [`ReportExtractor::parse_envelope`]; the record scans themselves
    /// never fail, incomplete fragments are counted and dropped.
    pub fn extract(text: &str) -> Result<ReportPage> {
        let tokens = tokenize(text);
        let envelope = envelope(&tokens)?;

        let orders = scan::<OrderFragment>(&tokens);
        let certificates = scan::<CertificateFragment>(&tokens);

        Ok(ReportPage {
            envelope,
            orders: orders.records,
            certificates: certificates.records,
            incomplete_fragments: orders.incomplete + certificates.incomplete,
        })
    }
}

fn tokenize(text: &str) -> Vec<ReportToken<'_>> {
    text.trim()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, raw_value)| ReportToken {
            key: classify(key.trim()),
            value: decode_value(raw_value),
        })
        .collect()
}

fn classify(key: &str) -> TokenKey<'_> {
    let Some((first, rest)) = key.split_once('_') else {
        return TokenKey::Envelope(key);
    };
    if !is_index(first) {
        return TokenKey::Envelope(key);
    }
    match rest.split_once('_') {
        Some((second, field)) if is_index(second) => TokenKey::Certificate {
            order_index: first,
            cert_index: second,
            field,
        },
        _ => TokenKey::Order {
            order_index: first,
            field: rest,
        },
    }
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Form-decodes a value (`+` is a space, `%XX` escapes); undecodable values
/// are kept as sent.
fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(|value| value.into_owned());
    decoded.unwrap_or(spaced)
}

fn envelope_value<'t>(tokens: &'t [ReportToken<'_>], name: &str) -> Option<&'t str> {
    tokens.iter().find_map(|token| match token.key {
        TokenKey::Envelope(key) if key == name => Some(token.value.as_str()),
        _ => None,
    })
}

fn envelope(tokens: &[ReportToken<'_>]) -> Result<ReportEnvelope> {
    let error_code = envelope_value(tokens, ERROR_CODE_KEY).ok_or_else(|| {
        SyncError::MalformedReport {
            details: format!("response does not start with an {} header", ERROR_CODE_KEY),
        }
    })?;
    let error_code: i32 = error_code
        .trim()
        .parse()
        .map_err(|_| SyncError::MalformedReport {
            details: format!("{} is not numeric: '{}'", ERROR_CODE_KEY, error_code),
        })?;

    if error_code != 0 {
        let message = envelope_value(tokens, ERROR_MESSAGE_KEY)
            .unwrap_or("no error message supplied")
            .to_string();
        return Err(SyncError::VendorRejected {
            error_code,
            message,
        }
        .into());
    }

    let total = envelope_value(tokens, RECORD_COUNT_KEY).ok_or_else(|| {
        SyncError::MalformedReport {
            details: format!("{} header is missing", RECORD_COUNT_KEY),
        }
    })?;
    let total: u64 = total.trim().parse().map_err(|_| SyncError::MalformedReport {
        details: format!("{} is not a record count: '{}'", RECORD_COUNT_KEY, total),
    })?;

    Ok(ReportEnvelope::new(total))
}

fn parse_unix_seconds(value: &str) -> Option<DateTime<Utc>> {
    let seconds: i64 = value.trim().parse().ok()?;
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ORDER_PAGE: &str = "errorCode=0&noOfResults=2\
        &1_orderNumber=1234567&1_orderStatus=Issued&1_dateTime=1700000000\
        &1_organizationName=Example+Corp&1_localityName=Springfield&1_countryName=US\
        &1_1_domain=a.example.com&1_1_type=SSL&1_1_domain=b.example.com&1_1_type=SSL\
        &1_1_status=Valid&1_1_lastStatusChange=1700000100&1_1_notBefore=1700000000\
        &1_1_notAfter=1731536000&1_1_serialNumber=AB12CD\
        &2_orderNumber=7654321&2_orderStatus=Pending%20Validation&2_dateTime=1700003600\
        &2_organizationName=Example+Corp\
        &2_1_domain=c.example.com&2_1_status=Applied&2_1_lastStatusChange=1700003600";

    #[test]
    fn test_extracts_orders_in_order() {
        let page = ReportExtractor::extract(TWO_ORDER_PAGE).unwrap();
        assert_eq!(page.envelope.total_records(), 2);
        assert_eq!(page.orders.len(), 2);

        let first = &page.orders[0];
        assert_eq!(first.order_index(), "1");
        assert_eq!(first.order_number(), "1234567");
        assert_eq!(first.order_status(), "Issued");
        assert_eq!(first.order_date().timestamp(), 1_700_000_000);

        let second = &page.orders[1];
        assert_eq!(second.order_number(), "7654321");
        assert_eq!(second.order_status(), "Pending Validation");
    }

    #[test]
    fn test_extracts_certificates_after_variable_domain_runs() {
        let page = ReportExtractor::extract(TWO_ORDER_PAGE).unwrap();
        assert_eq!(page.certificates.len(), 2);

        let issued = &page.certificates[0];
        assert_eq!(issued.order_index(), "1");
        assert_eq!(issued.cert_index(), "1");
        assert_eq!(issued.status(), "Valid");
        assert_eq!(issued.serial_number(), Some("AB12CD"));

        let pending = &page.certificates[1];
        assert_eq!(pending.order_index(), "2");
        assert_eq!(pending.status(), "Applied");
        assert_eq!(pending.serial_number(), None);
        assert_eq!(page.incomplete_fragments, 0);
    }

    #[test]
    fn test_serial_of_next_certificate_is_not_borrowed() {
        let text = "errorCode=0&noOfResults=1\
            &3_orderNumber=42&3_orderStatus=Issued&3_dateTime=1700000000\
            &3_1_status=Applied&3_1_lastStatusChange=1700000000\
            &3_2_status=Valid&3_2_notBefore=1700000000&3_2_serialNumber=0F0F";
        let page = ReportExtractor::extract(text).unwrap();
        assert_eq!(page.certificates.len(), 2);
        assert_eq!(page.certificates[0].serial_number(), None);
        assert_eq!(page.certificates[1].serial_number(), Some("0F0F"));
    }

    #[test]
    fn test_order_missing_date_is_counted_incomplete() {
        let text = "errorCode=0&noOfResults=1\
            &1_orderNumber=1234567&1_orderStatus=Issued\
            &1_1_status=Valid&1_1_serialNumber=AB12CD";
        let page = ReportExtractor::extract(text).unwrap();
        assert!(page.orders.is_empty());
        assert_eq!(page.certificates.len(), 1);
        assert_eq!(page.incomplete_fragments, 1);
    }

    #[test]
    fn test_order_with_unparseable_date_is_dropped() {
        let text = "errorCode=0&noOfResults=1\
            &1_orderNumber=1&1_orderStatus=Issued&1_dateTime=yesterday";
        let page = ReportExtractor::extract(text).unwrap();
        assert!(page.orders.is_empty());
        assert_eq!(page.incomplete_fragments, 1);
    }

    #[test]
    fn test_empty_page() {
        let page = ReportExtractor::extract("errorCode=0&noOfResults=0\n").unwrap();
        assert_eq!(page.envelope.total_records(), 0);
        assert!(page.orders.is_empty());
        assert!(page.certificates.is_empty());
    }

    #[test]
    fn test_nonzero_error_code_is_vendor_rejection() {
        let err = ReportExtractor::extract("errorCode=1&errorMessage=Invalid+login").unwrap_err();
        match err.downcast_ref::<SyncError>() {
            Some(SyncError::VendorRejected {
                error_code,
                message,
            }) => {
                assert_eq!(*error_code, 1);
                assert_eq!(message, "Invalid login");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_error_code() {
        let err = ReportExtractor::parse_envelope("errorCode=-14").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::VendorRejected { error_code: -14, .. })
        ));
    }

    #[test]
    fn test_missing_envelope_is_malformed() {
        let err = ReportExtractor::extract("<html>Service unavailable</html>").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::MalformedReport { .. })
        ));
    }

    #[test]
    fn test_missing_record_count_is_malformed() {
        let err = ReportExtractor::parse_envelope("errorCode=0").unwrap_err();
        assert!(err.to_string().contains("noOfResults"));
    }

    #[test]
    fn test_parse_envelope_reads_total() {
        let envelope = ReportExtractor::parse_envelope("errorCode=0&noOfResults=250").unwrap();
        assert_eq!(envelope.total_records(), 250);
    }

    #[test]
    fn test_classify_keys() {
        assert_eq!(classify("errorCode"), TokenKey::Envelope("errorCode"));
        assert_eq!(
            classify("7_orderNumber"),
            TokenKey::Order {
                order_index: "7",
                field: "orderNumber"
            }
        );
        assert_eq!(
            classify("7_12_serialNumber"),
            TokenKey::Certificate {
                order_index: "7",
                cert_index: "12",
                field: "serialNumber"
            }
        );
        assert_eq!(
            classify("7_street_address"),
            TokenKey::Order {
                order_index: "7",
                field: "street_address"
            }
        );
    }

    #[test]
    fn test_decode_value_keeps_invalid_escapes() {
        assert_eq!(decode_value("Example+Corp"), "Example Corp");
        assert_eq!(decode_value("a%2Bb"), "a+b");
        assert_eq!(decode_value("100%"), "100%");
    }
}
