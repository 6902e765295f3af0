//! Spawn-and-wait launch, for hosts without process replacement

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use log::{debug, warn};

use super::{check_launchable, Launcher};
use crate::error::LaunchError;

/// Runs the binary as a child with inherited stdio and returns its exit code.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpawnLauncher;

impl Launcher for SpawnLauncher {
    fn launch(&self, binary: &Path, args: &[OsString]) -> Result<i32, LaunchError> {
        check_launchable(binary)?;

        debug!("spawn {} with {} argument(s)", binary.display(), args.len());

        let status = Command::new(binary).args(args).status().map_err(|e| match e.kind() {
            ErrorKind::NotFound => LaunchError::BinaryNotFound(binary.to_path_buf()),
            ErrorKind::PermissionDenied => LaunchError::BinaryNotExecutable(binary.to_path_buf()),
            _ => LaunchError::LaunchFailed {
                path: binary.to_path_buf(),
                source: e,
            },
        })?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                // Terminated by a signal
                warn!("{} exited without a status code ({status})", binary.display());
                Ok(1)
            }
        }
    }
}
