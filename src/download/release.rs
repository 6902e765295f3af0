//! Release asset naming and URL construction
//!
//! Assets are published on the GitHub release for each pinned version as
//! bare executables named `<stem>-<platform>-<arch>[.exe]`. No discovery or
//! negotiation happens: the URL is a pure function of config and target.

use super::platform::{HostTarget, PlatformTag};
use crate::config::LauncherConfig;

/// File name of the cached executable on `platform`
pub fn binary_file_name(config: &LauncherConfig, platform: PlatformTag) -> String {
    format!("{}{}", config.binary_stem, platform.exe_suffix())
}

/// Release asset name for `target`
pub fn asset_name(config: &LauncherConfig, target: HostTarget) -> String {
    format!(
        "{}-{}-{}{}",
        config.binary_stem,
        target.platform,
        target.arch,
        target.platform.exe_suffix()
    )
}

/// Direct download URL of the release asset for `target`
pub fn download_url(config: &LauncherConfig, target: HostTarget) -> String {
    format!(
        "{}/{}/releases/download/{}/{}",
        config.release_base_url,
        config.repo,
        config.release_tag(),
        asset_name(config, target)
    )
}
