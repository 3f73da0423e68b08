use super::http::{build_client, endpoint_url, ensure_success, read_body, transport_error};
use crate::config::VendorEndpoint;
use crate::ports::outbound::{CertificateSource, ReportQuery, ReportSource};
use crate::shared::security::{MAX_CONTAINER_SIZE, MAX_REPORT_PAGE_SIZE};
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::Url;

const REPORT_PATH: &str = "products/!WebHostReport";
const COLLECT_PATH: &str = "products/download/CollectSSL";

/// SectigoClient adapter for the certificate vendor's reporting and
/// collection endpoints
///
/// Implements both the ReportSource and CertificateSource ports. Every
/// request is a form POST carrying the login credentials.
#[derive(Clone)]
pub struct SectigoClient {
    client: Client,
    endpoint: VendorEndpoint,
    report_url: Url,
    collect_url: Url,
}

impl SectigoClient {
    pub fn new(endpoint: VendorEndpoint) -> Result<Self> {
        let report_url = endpoint_url(&endpoint.base_url, REPORT_PATH)?;
        let collect_url = endpoint_url(&endpoint.base_url, COLLECT_PATH)?;
        Ok(Self {
            client: build_client()?,
            endpoint,
            report_url,
            collect_url,
        })
    }

    fn credentials(&self) -> Vec<(&'static str, String)> {
        vec![
            ("loginName", self.endpoint.login_name.clone()),
            ("loginPassword", self.endpoint.login_password.clone()),
        ]
    }

    /// Form fields of a report request
    fn report_form(&self, query: &ReportQuery) -> Vec<(&'static str, String)> {
        let mut form = self.credentials();
        form.push(("firstResultNo", query.first_result_no.to_string()));
        form.push(("lastResultNo", query.last_result_no.to_string()));
        if query.statuses_only {
            form.push(("showStatusesOnly", "Y".to_string()));
        }
        if let Some(not_before) = query.not_before {
            form.push(("notBefore", not_before.timestamp().to_string()));
        }
        form
    }

    /// Form fields of a collection request: PKCS#7, binary, by order number
    fn collect_form(&self, order_number: &str) -> Vec<(&'static str, String)> {
        let mut form = self.credentials();
        form.push(("orderNumber", order_number.to_string()));
        form.push(("queryType", "1".to_string()));
        form.push(("responseType", "2".to_string()));
        form.push(("responseEncoding", "1".to_string()));
        form
    }

    fn post_form(
        &self,
        url: &Url,
        form: &[(&'static str, String)],
        what: &str,
        max_size: usize,
    ) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .map_err(|e| transport_error(url, e))?;
        let response = ensure_success(response, url)?;
        read_body(response, url, what, max_size)
    }
}

impl ReportSource for SectigoClient {
    fn fetch_report(&self, query: &ReportQuery) -> Result<String> {
        let body = self.post_form(
            &self.report_url,
            &self.report_form(query),
            "vendor report page",
            MAX_REPORT_PAGE_SIZE,
        )?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

impl CertificateSource for SectigoClient {
    fn fetch_certificate_container(&self, order_number: &str) -> Result<Vec<u8>> {
        let body = self.post_form(
            &self.collect_url,
            &self.collect_form(order_number),
            "certificate container",
            MAX_CONTAINER_SIZE,
        )?;
        if body.is_empty() {
            anyhow::bail!("Vendor returned an empty certificate container for order {}", order_number);
        }
        Ok(body)
    }
}
