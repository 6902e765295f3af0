//! Unix process replacement

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use log::debug;

use super::{check_launchable, Launcher};
use crate::error::LaunchError;

/// Replaces the launcher with the target binary via `execvp`.
///
/// On success the pid, environment and standard streams pass to the binary
/// and control never comes back.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecLauncher;

impl Launcher for ExecLauncher {
    fn launch(&self, binary: &Path, args: &[OsString]) -> Result<i32, LaunchError> {
        check_launchable(binary)?;

        debug!("exec {} with {} argument(s)", binary.display(), args.len());

        // Nothing buffered may be lost when the image is replaced
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();

        let err = exec::Command::new(binary).args(args).exec();

        // If we reach here, exec failed
        Err(map_exec_error(binary, err))
    }
}

fn map_exec_error(binary: &Path, err: exec::Error) -> LaunchError {
    match err {
        exec::Error::Errno(errno) => match errno.0 {
            libc::ENOENT => LaunchError::BinaryNotFound(binary.to_path_buf()),
            libc::EACCES | libc::EPERM => LaunchError::BinaryNotExecutable(binary.to_path_buf()),
            code => LaunchError::LaunchFailed {
                path: binary.to_path_buf(),
                source: std::io::Error::from_raw_os_error(code),
            },
        },
        exec::Error::BadArgument(nul) => LaunchError::LaunchFailed {
            path: binary.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, nul),
        },
    }
}
