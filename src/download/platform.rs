//! Host platform and architecture resolution

use std::fmt;

use once_cell::sync::OnceCell;

use crate::error::LaunchError;

/// Operating system family, as named in release asset file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformTag {
    Darwin,
    Linux,
    Windows,
}

/// CPU architecture, as named in release asset file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchTag {
    Amd64,
    Arm64,
}

impl PlatformTag {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformTag::Darwin => "darwin",
            PlatformTag::Linux => "linux",
            PlatformTag::Windows => "windows",
        }
    }

    /// Suffix appended to executable file names on this platform
    pub fn exe_suffix(self) -> &'static str {
        match self {
            PlatformTag::Windows => ".exe",
            PlatformTag::Darwin | PlatformTag::Linux => "",
        }
    }
}

impl ArchTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ArchTag::Amd64 => "amd64",
            ArchTag::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ArchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw OS name (`uname -s` style or Rust's `std::env::consts::OS`)
/// to a platform tag. Case-insensitive.
pub fn resolve_platform(raw_os: &str) -> Result<PlatformTag, LaunchError> {
    match raw_os.trim().to_ascii_lowercase().as_str() {
        "darwin" | "macos" => Ok(PlatformTag::Darwin),
        "linux" => Ok(PlatformTag::Linux),
        "windows" => Ok(PlatformTag::Windows),
        _ => Err(LaunchError::UnsupportedPlatform(raw_os.to_string())),
    }
}

/// Map a raw machine identifier to an architecture tag, accepting the
/// common synonyms. Case-insensitive.
pub fn resolve_arch(raw_machine: &str) -> Result<ArchTag, LaunchError> {
    match raw_machine.trim().to_ascii_lowercase().as_str() {
        "x86_64" | "amd64" => Ok(ArchTag::Amd64),
        "arm64" | "aarch64" => Ok(ArchTag::Arm64),
        _ => Err(LaunchError::UnsupportedArchitecture(raw_machine.to_string())),
    }
}

/// Resolved (platform, architecture) pair for the running host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTarget {
    pub platform: PlatformTag,
    pub arch: ArchTag,
}

/// Global cache for host detection (initialized once, used everywhere)
static HOST_CACHE: OnceCell<HostTarget> = OnceCell::new();

impl HostTarget {
    /// Detect current host (cached after first call)
    pub fn detect() -> Result<Self, LaunchError> {
        HOST_CACHE
            .get_or_try_init(|| Self::from_raw(std::env::consts::OS, std::env::consts::ARCH))
            .copied()
    }

    pub fn from_raw(raw_os: &str, raw_machine: &str) -> Result<Self, LaunchError> {
        Ok(Self {
            platform: resolve_platform(raw_os)?,
            arch: resolve_arch(raw_machine)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_os_names_resolve_in_any_case() {
        let cases = [
            ("darwin", PlatformTag::Darwin),
            ("Darwin", PlatformTag::Darwin),
            ("DARWIN", PlatformTag::Darwin),
            ("macos", PlatformTag::Darwin),
            ("linux", PlatformTag::Linux),
            ("Linux", PlatformTag::Linux),
            ("windows", PlatformTag::Windows),
            ("Windows", PlatformTag::Windows),
            ("WINDOWS", PlatformTag::Windows),
        ];
        for (raw, expected) in cases {
            assert_eq!(resolve_platform(raw).unwrap(), expected, "raw={raw}");
        }
    }

    #[test]
    fn unsupported_os_names_fail() {
        for raw in ["freebsd", "sunos", "", "win32", "cygwin_nt-10.0"] {
            match resolve_platform(raw) {
                Err(LaunchError::UnsupportedPlatform(value)) => assert_eq!(value, raw),
                other => panic!("expected UnsupportedPlatform for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn machine_synonyms_resolve_in_any_case() {
        let cases = [
            ("x86_64", ArchTag::Amd64),
            ("X86_64", ArchTag::Amd64),
            ("amd64", ArchTag::Amd64),
            ("AMD64", ArchTag::Amd64),
            ("arm64", ArchTag::Arm64),
            ("ARM64", ArchTag::Arm64),
            ("aarch64", ArchTag::Arm64),
            ("AArch64", ArchTag::Arm64),
        ];
        for (raw, expected) in cases {
            assert_eq!(resolve_arch(raw).unwrap(), expected, "raw={raw}");
        }
    }

    #[test]
    fn unsupported_machines_fail() {
        for raw in ["i386", "i686", "armv7l", "riscv64", "ppc64le", ""] {
            assert!(
                matches!(resolve_arch(raw), Err(LaunchError::UnsupportedArchitecture(_))),
                "raw={raw:?}"
            );
        }
    }

    #[test]
    fn darwin_arm64_host() {
        let target = HostTarget::from_raw("Darwin", "arm64").unwrap();
        assert_eq!(target.platform.to_string(), "darwin");
        assert_eq!(target.arch.to_string(), "arm64");
    }

    #[test]
    fn detect_is_stable_across_calls() {
        let first = HostTarget::detect();
        let second = HostTarget::detect();
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => panic!("host detection changed between calls"),
        }
    }
}
