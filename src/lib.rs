//! Bootstrap launcher for agnt
//!
//! Resolves the host platform, makes sure the pinned agnt release binary is
//! in the local cache (downloading it on first use), then hands control to
//! it with the caller's arguments.
//!
//! The downloaded artifact is not checksum- or signature-verified. Whatever
//! lands in the cache is trusted for that version until the cache directory
//! is removed.

pub mod cache;
pub mod config;
pub mod download;
pub mod error;
pub mod launch;

use std::ffi::OsString;
use std::path::PathBuf;

pub use config::LauncherConfig;
pub use download::{ensure_binary, ArchTag, HostTarget, PlatformTag};
pub use error::LaunchError;
pub use launch::{default_launcher, Launcher, SpawnLauncher};

/// Path of the cached binary for this host, downloading it if needed
pub fn binary_path(config: &LauncherConfig) -> Result<PathBuf, LaunchError> {
    let target = HostTarget::detect()?;
    ensure_binary(config, target)
}

/// Run the binary as a child process and return its exit code
pub fn run(config: &LauncherConfig, args: &[OsString]) -> Result<i32, LaunchError> {
    let path = binary_path(config)?;
    SpawnLauncher.launch(&path, args)
}

/// Ensure the binary and launch it with the host's default strategy.
///
/// On unix this replaces the current process and only returns on failure.
pub fn bootstrap(config: &LauncherConfig, args: &[OsString]) -> Result<i32, LaunchError> {
    let target = HostTarget::detect()?;
    bootstrap_with(config, target, default_launcher().as_ref(), args)
}

/// [`bootstrap`] with an explicit target and launch strategy
pub fn bootstrap_with(
    config: &LauncherConfig,
    target: HostTarget,
    launcher: &dyn Launcher,
    args: &[OsString],
) -> Result<i32, LaunchError> {
    let path = ensure_binary(config, target)?;
    launcher.launch(&path, args)
}
