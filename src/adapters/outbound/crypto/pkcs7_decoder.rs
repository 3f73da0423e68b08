use crate::ports::outbound::CertificateDecoder;
use crate::reconciliation::domain::CertificateDetail;
use crate::shared::Result;
use asn1_rs::{Any, Class, FromBer, Oid, Tag};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fmt::Debug;
use x509_parser::extensions::GeneralName;
use x509_parser::objects::{oid2sn, oid_registry};
use x509_parser::prelude::*;

/// `pkcs7-signedData` content type
const SIGNED_DATA_OID: &str = "1.2.840.113549.1.7.2";

const PEM_ARMOR: &[u8] = b"-----BEGIN";

/// Pkcs7CertificateDecoder adapter decoding signed-data certificate containers
///
/// Accepts DER or PEM-armored PKCS#7. The first certificate of the container's
/// certificate set is decoded; the vendor places the issued certificate there.
pub struct Pkcs7CertificateDecoder;

impl Pkcs7CertificateDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Pkcs7CertificateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn malformed(what: &str, error: impl Debug) -> anyhow::Error {
    anyhow::anyhow!("Malformed PKCS#7 container: {} ({:?})", what, error)
}

/// Strips PEM armor when present
fn container_der(input: &[u8]) -> Result<Vec<u8>> {
    let trimmed = input.trim_ascii_start();
    if trimmed.starts_with(PEM_ARMOR) {
        let block = ::pem::parse(trimmed).map_err(|e| malformed("invalid PEM armor", e))?;
        return Ok(block.contents().to_vec());
    }
    Ok(input.to_vec())
}

/// Walks ContentInfo -> [0] SignedData -> [0] certificates and returns the
/// concatenated certificate encodings
fn certificate_set(der: &[u8]) -> Result<&[u8]> {
    let (_, content_info) =
        Any::from_ber(der).map_err(|e| malformed("ContentInfo is not ASN.1", e))?;
    if content_info.header.tag() != Tag::Sequence {
        anyhow::bail!("Malformed PKCS#7 container: ContentInfo is not a SEQUENCE");
    }

    let (rest, content_type) = Oid::from_ber(content_info.data)
        .map_err(|e| malformed("missing content type", e))?;
    if content_type.to_id_string() != SIGNED_DATA_OID {
        anyhow::bail!(
            "Not a PKCS#7 signed-data container (content type {})",
            content_type.to_id_string()
        );
    }

    let (_, explicit) = Any::from_ber(rest).map_err(|e| malformed("missing content", e))?;
    if !is_context_tag(&explicit, 0) {
        anyhow::bail!("Malformed PKCS#7 container: signed-data content is not tagged [0]");
    }

    let (_, signed_data) =
        Any::from_ber(explicit.data).map_err(|e| malformed("SignedData is not ASN.1", e))?;
    if signed_data.header.tag() != Tag::Sequence {
        anyhow::bail!("Malformed PKCS#7 container: SignedData is not a SEQUENCE");
    }

    let mut fields = signed_data.data;
    while !fields.is_empty() {
        let (remaining, field) =
            Any::from_ber(fields).map_err(|e| malformed("truncated SignedData", e))?;
        if is_context_tag(&field, 0) {
            return Ok(field.data);
        }
        fields = remaining;
    }

    anyhow::bail!("PKCS#7 container carries no certificates")
}

fn is_context_tag(any: &Any<'_>, tag: u32) -> bool {
    any.header.class() == Class::ContextSpecific && any.header.tag() == Tag(tag)
}

fn is_ca(certificate: &X509Certificate<'_>) -> bool {
    matches!(certificate.basic_constraints(), Ok(Some(bc)) if bc.value.ca)
}

/// Parses every certificate of the set, keeping each one's exact DER bytes
fn parse_certificates(mut set: &[u8]) -> Result<Vec<(&[u8], X509Certificate<'_>)>> {
    let mut certificates = Vec::new();
    while !set.is_empty() {
        let (rest, certificate) = parse_x509_certificate(set)
            .map_err(|e| malformed("certificate is not valid X.509", e))?;
        certificates.push((&set[..set.len() - rest.len()], certificate));
        set = rest;
    }
    Ok(certificates)
}

fn timestamp(seconds: i64, what: &str) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| anyhow::anyhow!("Certificate {} is out of range", what))
}

fn common_name(name: &X509Name<'_>) -> Option<String> {
    name.iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string)
}

fn dns_names(certificate: &X509Certificate<'_>) -> Vec<String> {
    let Ok(Some(san)) = certificate.subject_alternative_name() else {
        return Vec::new();
    };
    san.value
        .general_names
        .iter()
        .filter_map(|name| match name {
            GeneralName::DNSName(dns) => Some(dns.to_string()),
            _ => None,
        })
        .collect()
}

fn detail(der: &[u8], certificate: &X509Certificate<'_>) -> Result<CertificateDetail> {
    let fingerprint_sha256 = hex::encode(Sha256::digest(der));

    let algorithm = &certificate.signature_algorithm.algorithm;
    let signature_algorithm = oid2sn(algorithm, oid_registry())
        .map(str::to_string)
        .unwrap_or_else(|_| algorithm.to_id_string());

    let validity = certificate.validity();
    let dns_names = dns_names(certificate);
    let subject_common_name = common_name(certificate.subject()).unwrap_or_default();
    let common_name = if subject_common_name.is_empty() {
        dns_names.first().cloned().unwrap_or_default()
    } else {
        subject_common_name.clone()
    };

    Ok(CertificateDetail {
        common_name,
        fingerprint_sha256,
        signature_algorithm,
        not_before: timestamp(validity.not_before.timestamp(), "notBefore")?,
        not_after: timestamp(validity.not_after.timestamp(), "notAfter")?,
        is_ca: is_ca(certificate),
        version: certificate.version().0 + 1,
        issuer_common_name: self::common_name(certificate.issuer()).unwrap_or_default(),
        issuer_dn: certificate.issuer().to_string(),
        subject_common_name,
        subject_dn: certificate.subject().to_string(),
        dns_names,
        serial_number: format!("{:x}", certificate.serial),
    })
}

impl CertificateDecoder for Pkcs7CertificateDecoder {
    fn decode(&self, container: &[u8]) -> Result<CertificateDetail> {
        let der = container_der(container)?;
        let certificates = parse_certificates(certificate_set(&der)?)?;

        let (der, certificate) = certificates
            .first()
            .ok_or_else(|| anyhow::anyhow!("PKCS#7 container carries no certificates"))?;

        detail(der, certificate)
    }
}
