use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// GitHub `owner/name` the release assets are published under.
pub const RELEASE_REPO: &str = "standardbeagle/agnt";

/// File name stem of the launched binary and the cache namespace.
pub const BINARY_STEM: &str = "agnt";

/// Version of the binary this launcher pins, embedded at build time.
pub const PINNED_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com";

pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub const ENV_CACHE_DIR: &str = "AGNT_CACHE_DIR";
pub const ENV_RELEASE_BASE_URL: &str = "AGNT_RELEASE_BASE_URL";
pub const ENV_DOWNLOAD_TIMEOUT: &str = "AGNT_DOWNLOAD_TIMEOUT";

/// Launcher configuration, built once at startup and passed by reference
/// to every stage of the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub repo: String,
    pub version: String,
    pub binary_stem: String,
    /// Scheme and host prefix of release URLs, without trailing slash
    pub release_base_url: String,
    pub download_timeout: Duration,
    /// Replaces the per-platform cache root when set
    pub cache_root: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            repo: RELEASE_REPO.to_string(),
            version: PINNED_VERSION.to_string(),
            binary_stem: BINARY_STEM.to_string(),
            release_base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            cache_root: None,
        }
    }
}

impl LauncherConfig {
    /// Defaults with the `AGNT_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            config.cache_root = Some(PathBuf::from(dir));
        }

        if let Some(base) = lookup(ENV_RELEASE_BASE_URL)
            .and_then(|v| v.into_string().ok())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
        {
            config.release_base_url = base;
        }

        // Unparsable or zero values keep the default
        if let Some(timeout) = lookup(ENV_DOWNLOAD_TIMEOUT)
            .and_then(|v| v.into_string().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
        {
            config.download_timeout = timeout;
        }

        config
    }

    /// Release tag, e.g. `v0.7.12`
    pub fn release_tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Human-facing release page, used in manual download instructions
    pub fn release_page_url(&self) -> String {
        format!(
            "{}/{}/releases/tag/{}",
            self.release_base_url,
            self.repo,
            self.release_tag()
        )
    }

    pub fn user_agent(&self) -> String {
        format!("agnt-launcher/{}", self.version)
    }
}
