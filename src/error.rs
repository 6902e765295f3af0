//! Launcher error kinds
//!
//! Every failure the launcher can detect on its own maps to one variant here.
//! None of them are retried: `main` renders the error plus its remediation
//! text and exits with status 1.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::LauncherConfig;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("Could not determine cache directory: {0}")]
    CacheUnavailable(String),

    #[error("Failed to download agnt from {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Binary not found at {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("Binary at {} is not executable", .0.display())]
    BinaryNotExecutable(PathBuf),

    #[error("Failed to launch {}: {source}", .path.display())]
    LaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    pub(crate) fn io(
        context: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    /// Actionable follow-up lines printed under the error message.
    pub fn remediation(&self, config: &LauncherConfig) -> Vec<String> {
        match self {
            Self::DownloadFailed { .. }
            | Self::UnsupportedPlatform(_)
            | Self::UnsupportedArchitecture(_) => {
                let mut lines = vec![
                    "You can manually download the binary from:".to_string(),
                    format!("  {}", config.release_page_url()),
                    String::new(),
                ];
                lines.extend(source_build_steps(config));
                lines
            }
            Self::BinaryNotFound(path)
            | Self::BinaryNotExecutable(path)
            | Self::LaunchFailed { path, .. } => {
                let dir = path
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                vec![
                    "Remove the cached version so it is downloaded again:".to_string(),
                    format!("  {dir}"),
                ]
            }
            Self::CacheUnavailable(_) => vec![
                "Set AGNT_CACHE_DIR to a writable directory and try again.".to_string(),
            ],
            Self::Io { path, .. } => match version_dir_of(path, config) {
                Some(dir) => vec![
                    format!("Check that {} is writable,", dir.display()),
                    "or set AGNT_CACHE_DIR to a writable directory and try again.".to_string(),
                ],
                None => Vec::new(),
            },
        }
    }
}

/// The `<root>/<stem>/<version>` cache directory containing `path`, if any
fn version_dir_of<'a>(path: &'a Path, config: &LauncherConfig) -> Option<&'a Path> {
    let suffix = Path::new(&config.binary_stem).join(&config.version);
    path.ancestors().find(|dir| dir.ends_with(&suffix))
}

fn source_build_steps(config: &LauncherConfig) -> Vec<String> {
    vec![
        "Or build from source:".to_string(),
        format!("  git clone https://github.com/{}.git", config.repo),
        format!("  cd {}", config.binary_stem),
        "  make build".to_string(),
    ]
}
