//! Binary fetch and atomic installation into the cache

use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::platform::HostTarget;
use super::release::download_url;
use crate::cache::{binary_path_in, cache_dir};
use crate::config::LauncherConfig;
use crate::error::LaunchError;

/// Return the cached binary for `target`, downloading it first if absent.
///
/// A file at the expected path is a cache hit: it is returned as-is with no
/// network access and no re-validation. Otherwise the release asset is
/// streamed into a temp file in the cache directory and renamed over the
/// final path, so the canonical name never holds a partial download.
///
/// There is no checksum or signature check on the downloaded artifact. A
/// corrupted or tampered download is cached and trusted for that version.
pub fn ensure_binary(config: &LauncherConfig, target: HostTarget) -> Result<PathBuf, LaunchError> {
    let dir = cache_dir(config, target.platform)?;
    let binary_path = binary_path_in(&dir, config, target.platform);

    if binary_path.exists() {
        debug!("Cache hit: {}", binary_path.display());
        return Ok(binary_path);
    }

    let url = download_url(config, target);
    eprintln!("Downloading {} v{}...", config.binary_stem, config.version);
    eprintln!("  Platform: {}", target.platform);
    eprintln!("  Architecture: {}", target.arch);
    info!("Fetching {url}");

    download_to(&url, config, &dir, &binary_path)?;

    #[cfg(unix)]
    mark_executable(&binary_path)?;

    eprintln!(
        "Successfully installed {} to {}",
        config.binary_stem,
        binary_path.display()
    );
    Ok(binary_path)
}

fn download_to(
    url: &str,
    config: &LauncherConfig,
    dir: &Path,
    binary_path: &Path,
) -> Result<(), LaunchError> {
    // Redirects are followed by default (GitHub serves assets via a redirect)
    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent())
        .timeout(config.download_timeout)
        .build()
        .map_err(|e| download_failed(url, &e))?;

    let mut response = client.get(url).send().map_err(|e| download_failed(url, &e))?;

    if !response.status().is_success() {
        return Err(LaunchError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    // Same directory as the final path so the rename stays on one filesystem
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}-", config.binary_stem))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            LaunchError::io(format!("Failed to create temp file in {}", dir.display()), dir, e)
        })?;

    let written = response
        .copy_to(tmp.as_file_mut())
        .map_err(|e| download_failed(url, &e))?;

    if written == 0 {
        return Err(LaunchError::DownloadFailed {
            url: url.to_string(),
            reason: "empty response body".to_string(),
        });
    }
    debug!("Downloaded {written} bytes to {}", tmp.path().display());

    tmp.as_file()
        .sync_all()
        .map_err(|e| {
            LaunchError::io(format!("Failed to flush {}", tmp.path().display()), tmp.path(), e)
        })?;

    match tmp.persist(binary_path) {
        Ok(_) => Ok(()),
        Err(err) => settle_failed_persist(err, binary_path),
    }
}

/// A concurrent launcher may have installed the same version first; on
/// windows its running `agnt.exe` cannot be replaced. A file at the final
/// path is as good as ours, so keep it and discard the temp file.
fn settle_failed_persist(
    err: tempfile::PersistError,
    binary_path: &Path,
) -> Result<(), LaunchError> {
    if binary_path.is_file() {
        debug!(
            "Keeping existing {} ({}); discarding {}",
            binary_path.display(),
            err.error,
            err.file.path().display()
        );
        return Ok(());
    }
    Err(LaunchError::io(
        format!("Failed to move download into place at {}", binary_path.display()),
        binary_path,
        err.error,
    ))
}

/// Add execute permission for owner, group and other
#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), LaunchError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| {
            LaunchError::io(format!("Failed to read metadata: {}", path.display()), path, e)
        })?
        .permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms)
        .map_err(|e| {
            LaunchError::io(format!("Failed to set permissions: {}", path.display()), path, e)
        })
}

fn download_failed(url: &str, err: &reqwest::Error) -> LaunchError {
    // reqwest's top-level message is generic; the cause chain says what broke
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    LaunchError::DownloadFailed {
        url: url.to_string(),
        reason,
    }
}
