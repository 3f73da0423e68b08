use super::{CertificateDetail, CertificateRecord, LifecycleState, OrderRecord};
use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// CMDB class of the certificate configuration item
pub const CERTIFICATE_CLASS: &str = "cmdb_ci_certificate";

/// CMDB class of a DNS name configuration item
pub const DNS_NAME_CLASS: &str = "cmdb_ci_dns_name";

/// Relationship type linking a DNS name to the certificate it uses
pub const USES_USED_BY: &str = "Uses::Used by";

/// Timestamp layout used by the CMDB for date/time columns
pub const CMDB_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_cmdb_time(time: DateTime<Utc>) -> String {
    time.format(CMDB_TIME_FORMAT).to_string()
}

pub fn parse_cmdb_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), CMDB_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// UniqueCertificate - the CMDB certificate entity, keyed by
/// `(po_number, serial_number)` on the CMDB side
///
/// Detail-derived columns stay `None` for retired/revoked transitions and are
/// left out of the JSON so previously stored metadata is not blanked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UniqueCertificate {
    pub order_date: String,
    pub po_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<LifecycleState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_distinguished_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_distinguished_name: Option<String>,
}

impl UniqueCertificate {
    /// Builds the values observed in the report for one order/certificate pair.
    /// The serial number is lower-cased for stable matching in the CMDB.
    pub fn observed(
        order: &OrderRecord,
        certificate: &CertificateRecord,
        state: LifecycleState,
    ) -> Self {
        Self {
            order_date: format_cmdb_time(order.order_date()),
            po_number: order.order_number().to_string(),
            serial_number: certificate.serial_number().map(str::to_lowercase),
            state: Some(state),
            ..Self::default()
        }
    }

    /// Merges the decoded certificate attributes into the values object
    pub fn merge_detail(&mut self, detail: &CertificateDetail) {
        self.name = Some(detail.common_name.clone());
        self.fingerprint = Some(detail.fingerprint_sha256.clone());
        self.fingerprint_algorithm = Some("SHA256".to_string());
        self.signature_algorithm = Some(detail.signature_algorithm.clone());
        self.valid_from = Some(format_cmdb_time(detail.not_before));
        self.valid_to = Some(format_cmdb_time(detail.not_after));
        self.is_ca = Some(detail.is_ca);
        self.version = Some(detail.version);
        self.issuer_common_name = Some(detail.issuer_common_name.clone());
        self.issuer_distinguished_name = Some(detail.issuer_dn.clone());
        self.subject_common_name = Some(detail.subject_common_name.clone());
        self.subject_distinguished_name = Some(detail.subject_dn.clone());
    }
}

/// Values of a `cmdb_ci_dns_name` item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsNameValues {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CiValues {
    Certificate(Box<UniqueCertificate>),
    DnsName(DnsNameValues),
}

/// One typed record submitted to the identify-and-reconcile API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationItem {
    #[serde(rename = "className")]
    pub class_name: String,
    pub values: CiValues,
}

impl ConfigurationItem {
    pub fn certificate(values: UniqueCertificate) -> Self {
        Self {
            class_name: CERTIFICATE_CLASS.to_string(),
            values: CiValues::Certificate(Box::new(values)),
        }
    }

    pub fn dns_name(name: &str) -> Self {
        Self {
            class_name: DNS_NAME_CLASS.to_string(),
            values: CiValues::DnsName(DnsNameValues {
                name: name.to_string(),
            }),
        }
    }

    pub fn as_certificate(&self) -> Option<&UniqueCertificate> {
        match &self.values {
            CiValues::Certificate(values) => Some(values),
            CiValues::DnsName(_) => None,
        }
    }
}

/// Edge between two items of the same payload, by position in `items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub parent: usize,
    pub child: usize,
    #[serde(rename = "type")]
    pub relation_type: String,
}

/// Identify-and-reconcile request body
///
/// Items form an arena: `push_item` returns the index the item was stored at,
/// and relations may only reference indices already handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CmdbUpsertPayload {
    items: Vec<ConfigurationItem>,
    relations: Vec<Relationship>,
}

impl CmdbUpsertPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_item(&mut self, item: ConfigurationItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn relate(&mut self, parent: usize, child: usize, relation_type: &str) -> Result<()> {
        let len = self.items.len();
        if parent >= len || child >= len {
            return Err(SyncError::Validation {
                message: format!(
                    "relation {} -> {} references an item outside the payload ({} item(s))",
                    parent, child, len
                ),
            }
            .into());
        }
        self.relations.push(Relationship {
            parent,
            child,
            relation_type: relation_type.to_string(),
        });
        Ok(())
    }

    pub fn items(&self) -> &[ConfigurationItem] {
        &self.items
    }

    pub fn relations(&self) -> &[Relationship] {
        &self.relations
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn certificates(&self) -> impl Iterator<Item = &UniqueCertificate> {
        self.items.iter().filter_map(ConfigurationItem::as_certificate)
    }
}
