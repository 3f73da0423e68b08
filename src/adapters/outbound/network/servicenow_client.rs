use super::http::{build_client, endpoint_url, ensure_success, read_body, transport_error};
use crate::config::CmdbEndpoint;
use crate::ports::outbound::{CmdbReader, CmdbWriter, UpsertOutcome};
use crate::reconciliation::domain::{CmdbUpsertPayload, LifecycleState, UniqueCertificate};
use crate::shared::error::SyncError;
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

const CERTIFICATE_TABLE_PATH: &str = "api/now/table/cmdb_ci_certificate";
const IDENTIFY_RECONCILE_PATH: &str = "api/now/identifyreconcile";

/// Upper bound for CMDB responses (a one-row table query or an
/// identify-and-reconcile result)
const MAX_CMDB_RESPONSE_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct TableResponse {
    result: Vec<CertificateRow>,
}

/// Table API row; every column comes back as a string
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CertificateRow {
    order_date: String,
    po_number: String,
    name: String,
    fingerprint: String,
    fingerprint_algorithm: String,
    serial_number: String,
    valid_from: String,
    valid_to: String,
    state: String,
    issuer_common_name: String,
    subject_common_name: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<CertificateRow> for UniqueCertificate {
    fn from(row: CertificateRow) -> Self {
        let state = match row.state.as_str() {
            "issued" => Some(LifecycleState::Issued),
            "retired" => Some(LifecycleState::Retired),
            "revoked" => Some(LifecycleState::Revoked),
            _ => None,
        };
        UniqueCertificate {
            order_date: row.order_date,
            po_number: row.po_number,
            name: non_empty(row.name),
            fingerprint: non_empty(row.fingerprint),
            fingerprint_algorithm: non_empty(row.fingerprint_algorithm),
            serial_number: non_empty(row.serial_number),
            valid_from: non_empty(row.valid_from),
            valid_to: non_empty(row.valid_to),
            state,
            issuer_common_name: non_empty(row.issuer_common_name),
            subject_common_name: non_empty(row.subject_common_name),
            ..UniqueCertificate::default()
        }
    }
}

/// Parses a `{ "result": [...] }` table response, keeping the first row
fn parse_latest(body: &[u8]) -> Result<Option<UniqueCertificate>> {
    let response: TableResponse =
        serde_json::from_slice(body).map_err(|e| SyncError::CmdbResponse {
            details: format!("certificate table query: {}", e),
        })?;
    Ok(response.result.into_iter().next().map(UniqueCertificate::from))
}

/// ServiceNowClient adapter for the CMDB table and identify-and-reconcile APIs
///
/// Authenticates with HTTP basic auth. All items are submitted with the
/// configured discovery source.
#[derive(Clone)]
pub struct ServiceNowClient {
    client: Client,
    endpoint: CmdbEndpoint,
    table_url: Url,
    reconcile_url: Url,
}

impl ServiceNowClient {
    pub fn new(endpoint: CmdbEndpoint) -> Result<Self> {
        let mut table_url = endpoint_url(&endpoint.base_url, CERTIFICATE_TABLE_PATH)?;
        table_url
            .query_pairs_mut()
            .append_pair(
                "sysparm_query",
                &format!(
                    "discovery_source={}^ORDERBYDESCvalid_from",
                    endpoint.data_source
                ),
            )
            .append_pair("sysparm_limit", "1");

        let mut reconcile_url = endpoint_url(&endpoint.base_url, IDENTIFY_RECONCILE_PATH)?;
        reconcile_url
            .query_pairs_mut()
            .append_pair("sysparm_data_source", &endpoint.data_source);

        Ok(Self {
            client: build_client()?,
            endpoint,
            table_url,
            reconcile_url,
        })
    }
}

impl CmdbReader for ServiceNowClient {
    fn latest_issued_certificate(&self) -> Result<Option<UniqueCertificate>> {
        let response = self
            .client
            .get(self.table_url.clone())
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| transport_error(&self.table_url, e))?;
        let response = ensure_success(response, &self.table_url)?;
        let body = read_body(
            response,
            &self.table_url,
            "CMDB certificate query",
            MAX_CMDB_RESPONSE_SIZE,
        )?;
        parse_latest(&body)
    }
}

impl CmdbWriter for ServiceNowClient {
    fn upsert(&self, payload: &CmdbUpsertPayload) -> Result<UpsertOutcome> {
        let response = self
            .client
            .post(self.reconcile_url.clone())
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .map_err(|e| transport_error(&self.reconcile_url, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            return Ok(UpsertOutcome::Accepted);
        }

        let body = read_body(
            response,
            &self.reconcile_url,
            "CMDB rejection body",
            MAX_CMDB_RESPONSE_SIZE,
        )?;
        Ok(UpsertOutcome::Rejected {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
