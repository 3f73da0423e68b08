use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum configuration file size (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum accepted size of one vendor report page (16 MB)
pub const MAX_REPORT_PAGE_SIZE: usize = 16 * 1024 * 1024;

/// Maximum accepted size of one certificate container (1 MB)
pub const MAX_CONTAINER_SIZE: usize = 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// Configuration files carry credentials and must not be swapped through a link.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `MAX_CONFIG_FILE_SIZE`
pub fn validate_config_file(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file metadata for {}: {}",
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, configuration files may not be symbolic links.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        );
    }

    Ok(())
}

/// Validates that a downloaded body stays within its size limit
///
/// # Arguments
/// * `len` - Body length in bytes
/// * `what` - Description of the body (e.g., "report page") for error messages
/// * `max_size` - Maximum allowed size in bytes
pub fn validate_body_size(len: usize, what: &str, max_size: usize) -> Result<()> {
    if len > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            what,
            len,
            max_size
        );
    }
    Ok(())
}
