//! Configuration file support for cert-cmdb-sync.
//!
//! Provides YAML-based configuration through `cert-cmdb-sync.config.yml`
//! files, including data structures, file loading, validation and resolution
//! into the endpoints handed to the network adapters.

use anyhow::{bail, Context};
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::reconciliation::domain::DEFAULT_PAGE_SIZE;
use crate::shared::error::SyncError;
use crate::shared::security::validate_config_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cert-cmdb-sync.config.yml";

/// Vendor base URL used when the file does not name one
pub const DEFAULT_VENDOR_BASE_URL: &str = "https://secure.trust-provider.com";

/// Discovery source used when the file does not name one
pub const DEFAULT_DATA_SOURCE: &str = "Sectigo";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub vendor: Option<VendorSection>,
    pub cmdb: Option<CmdbSection>,
    pub page_size: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// `vendor:` section: certificate vendor API access.
#[derive(Debug, Deserialize, Default)]
pub struct VendorSection {
    pub base_url: Option<String>,
    pub login_name: Option<String>,
    pub login_password: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// `cmdb:` section: CMDB API access.
#[derive(Debug, Deserialize, Default)]
pub struct CmdbSection {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub data_source: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Resolved vendor endpoint and credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct VendorEndpoint {
    pub base_url: Url,
    pub login_name: String,
    pub login_password: String,
}

/// Resolved CMDB endpoint and credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct CmdbEndpoint {
    pub base_url: Url,
    pub username: String,
    pub password: String,
    /// Discovery source recorded on reconciled items
    pub data_source: String,
}

// Credentials stay out of debug output.
impl fmt::Debug for VendorEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorEndpoint")
            .field("base_url", &self.base_url.as_str())
            .field("login_name", &self.login_name)
            .field("login_password", &"***")
            .finish()
    }
}

impl fmt::Debug for CmdbEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmdbEndpoint")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"***")
            .field("data_source", &self.data_source)
            .finish()
    }
}

/// Everything a run needs from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub vendor: VendorEndpoint,
    pub cmdb: CmdbEndpoint,
    pub page_size: u64,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Err(SyncError::ConfigNotFound {
            path: path.to_path_buf(),
            suggestion: format!(
                "Create the file or pass an existing one with --config (see {} in the README)",
                CONFIG_FILENAME
            ),
        }
        .into());
    }
    validate_config_file(path)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads the explicit config when given, otherwise discovers one in `dir`.
/// A run cannot proceed without credentials, so a missing file is an error.
pub fn locate_config(explicit: Option<&Path>, dir: &Path) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    discover_config(dir)?.ok_or_else(|| {
        SyncError::ConfigNotFound {
            path: dir.join(CONFIG_FILENAME),
            suggestion: "Create the file in the working directory or pass one with --config"
                .to_string(),
        }
        .into()
    })
}

impl ConfigFile {
    /// Resolves the file into endpoints. `page_size_override` (the CLI flag)
    /// takes precedence over the file's `page_size`.
    pub fn into_sync_config(self, page_size_override: Option<u64>) -> Result<SyncConfig> {
        let vendor = self.vendor.unwrap_or_default();
        let cmdb = self.cmdb.unwrap_or_default();

        let vendor = VendorEndpoint {
            base_url: parse_base_url(
                "vendor.base_url",
                vendor
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_VENDOR_BASE_URL),
            )?,
            login_name: required("vendor.login_name", vendor.login_name)?,
            login_password: required("vendor.login_password", vendor.login_password)?,
        };

        let cmdb = CmdbEndpoint {
            base_url: parse_base_url(
                "cmdb.base_url",
                &required("cmdb.base_url", cmdb.base_url)?,
            )?,
            username: required("cmdb.username", cmdb.username)?,
            password: required("cmdb.password", cmdb.password)?,
            data_source: cmdb
                .data_source
                .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string()),
        };

        let page_size = page_size_override
            .or(self.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(SyncError::Validation {
                message: "page size must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(SyncConfig {
            vendor,
            cmdb,
            page_size,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid config: '{}' is required.\n\n💡 Hint: Add it to {}.",
            field,
            CONFIG_FILENAME
        )
    })
}

fn parse_base_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value.trim()).with_context(|| {
        format!(
            "Invalid config: '{}' is not a valid URL: {}",
            field, value
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "Invalid config: '{}' must be an http(s) URL, got scheme '{}'.",
            field,
            url.scheme()
        );
    }
    Ok(url)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.page_size == Some(0) {
        bail!(
            "Invalid config: page_size must be greater than zero.\n\n\
             💡 Hint: Omit page_size to use the default of {}.",
            DEFAULT_PAGE_SIZE
        );
    }

    let mut fields: Vec<(&str, &Option<String>)> = Vec::new();
    if let Some(vendor) = &config.vendor {
        fields.push(("vendor.base_url", &vendor.base_url));
        fields.push(("vendor.login_name", &vendor.login_name));
        fields.push(("vendor.login_password", &vendor.login_password));
    }
    if let Some(cmdb) = &config.cmdb {
        fields.push(("cmdb.base_url", &cmdb.base_url));
        fields.push(("cmdb.username", &cmdb.username));
        fields.push(("cmdb.password", &cmdb.password));
        fields.push(("cmdb.data_source", &cmdb.data_source));
    }

    for (field, value) in fields {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            bail!(
                "Invalid config: '{}' must not be empty.\n\n\
                 💡 Hint: Remove the key or give it a value.",
                field
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let top = config.unknown_fields.keys().cloned();
    let vendor = config
        .vendor
        .iter()
        .flat_map(|v| v.unknown_fields.keys().map(|k| format!("vendor.{}", k)));
    let cmdb = config
        .cmdb
        .iter()
        .flat_map(|c| c.unknown_fields.keys().map(|k| format!("cmdb.{}", k)));

    for key in top.chain(vendor).chain(cmdb) {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
