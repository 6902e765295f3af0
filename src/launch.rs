//! Process launch strategies
//!
//! Provides a unified interface for handing control to the cached binary:
//! - Unix: replace the current process image (`execvp`), keeping the pid
//!   and standard streams
//! - Windows: spawn a child, wait, and report its exit code

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::LaunchError;

mod spawn_launcher;
pub use spawn_launcher::SpawnLauncher;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod exec_launcher;
        pub use exec_launcher::ExecLauncher;
    }
}

/// Hands control to a binary with the caller's arguments.
pub trait Launcher {
    /// Run `binary` with `args` (argv[0] excluded).
    ///
    /// Returns the exit code the launcher should exit with. Strategies that
    /// replace the process never return on success.
    fn launch(&self, binary: &Path, args: &[OsString]) -> Result<i32, LaunchError>;
}

/// Strategy for the host: process replacement where supported, spawn-and-wait otherwise
pub fn default_launcher() -> Box<dyn Launcher> {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            Box::new(ExecLauncher)
        } else {
            Box::new(SpawnLauncher)
        }
    }
}

/// Fail early with a precise error if `binary` cannot be launched
pub(crate) fn check_launchable(binary: &Path) -> Result<(), LaunchError> {
    let meta = match fs::metadata(binary) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LaunchError::BinaryNotFound(binary.to_path_buf()));
        }
        Err(e) => {
            return Err(LaunchError::io(
                format!("Failed to read metadata: {}", binary.display()),
                binary,
                e,
            ));
        }
    };

    if !meta.is_file() {
        return Err(LaunchError::BinaryNotExecutable(binary.to_path_buf()));
    }

    #[cfg(unix)]
    {
        use nix::unistd::{access, AccessFlags};

        if access(binary, AccessFlags::X_OK).is_err() {
            return Err(LaunchError::BinaryNotExecutable(binary.to_path_buf()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("agnt");
        assert!(matches!(
            check_launchable(&path),
            Err(LaunchError::BinaryNotFound(p)) if p == path
        ));
    }

    #[test]
    fn directory_is_not_executable() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            check_launchable(temp.path()),
            Err(LaunchError::BinaryNotExecutable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn file_without_exec_bits_is_not_executable() {
        use std::os::unix::fs::PermissionsExt;

        // root passes access(X_OK) only when some x bit is set, so 0o644 fails for everyone
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("agnt");
        fs::write(&path, b"#!/bin/sh\n").expect("write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        assert!(matches!(
            check_launchable(&path),
            Err(LaunchError::BinaryNotExecutable(_))
        ));
    }
}
