//! Versioned binary cache location
//!
//! Layout: `<cache_root>/<stem>/<version>/<stem>[.exe]`. The presence of the
//! binary at that path is the only cache state; nothing else is recorded.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::LauncherConfig;
use crate::download::platform::PlatformTag;
use crate::download::release::binary_file_name;
use crate::error::LaunchError;

/// Base cache directory for `platform`, honoring `config.cache_root` first
/// and then the platform's own override variable.
pub fn cache_root(config: &LauncherConfig, platform: PlatformTag) -> Result<PathBuf, LaunchError> {
    if let Some(root) = &config.cache_root {
        return Ok(root.clone());
    }
    platform_cache_root(platform, |key| std::env::var_os(key), dirs::home_dir())
}

fn platform_cache_root<F>(
    platform: PlatformTag,
    lookup: F,
    home: Option<PathBuf>,
) -> Result<PathBuf, LaunchError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let home_dir = || {
        home.clone().ok_or_else(|| {
            LaunchError::CacheUnavailable("home directory could not be determined".to_string())
        })
    };

    match platform {
        PlatformTag::Windows => match lookup("LOCALAPPDATA").filter(|v| !v.is_empty()) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(home_dir()?.join("AppData").join("Local")),
        },
        PlatformTag::Darwin => Ok(home_dir()?.join("Library").join("Caches")),
        PlatformTag::Linux => {
            // Relative XDG values are invalid and ignored
            match lookup("XDG_CACHE_HOME")
                .map(PathBuf::from)
                .filter(|p| p.is_absolute())
            {
                Some(dir) => Ok(dir),
                None => Ok(home_dir()?.join(".cache")),
            }
        }
    }
}

/// Directory holding the pinned version's binary. Created (with parents) if
/// missing; an existing directory is not an error.
pub fn cache_dir(config: &LauncherConfig, platform: PlatformTag) -> Result<PathBuf, LaunchError> {
    let dir = versioned_dir(&cache_root(config, platform)?, config);

    fs::create_dir_all(&dir).map_err(|e| {
        LaunchError::io(format!("Failed to create cache directory {}", dir.display()), &dir, e)
    })?;

    debug!("Using cache directory {}", dir.display());
    Ok(dir)
}

/// Expected path of the cached binary inside `dir`
pub fn binary_path_in(dir: &Path, config: &LauncherConfig, platform: PlatformTag) -> PathBuf {
    dir.join(binary_file_name(config, platform))
}

fn versioned_dir(root: &Path, config: &LauncherConfig) -> PathBuf {
    root.join(&config.binary_stem).join(&config.version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    #[test]
    fn linux_defaults_to_dot_cache() {
        let root = platform_cache_root(PlatformTag::Linux, no_env, Some("/home/u".into())).unwrap();
        assert_eq!(root, PathBuf::from("/home/u/.cache"));
    }

    #[test]
    fn linux_honors_absolute_xdg_cache_home() {
        let lookup = |key: &str| (key == "XDG_CACHE_HOME").then(|| OsString::from("/var/cache/u"));
        let root = platform_cache_root(PlatformTag::Linux, lookup, Some("/home/u".into())).unwrap();
        assert_eq!(root, PathBuf::from("/var/cache/u"));
    }

    #[test]
    fn linux_ignores_relative_xdg_cache_home() {
        let lookup = |key: &str| (key == "XDG_CACHE_HOME").then(|| OsString::from("rel/cache"));
        let root = platform_cache_root(PlatformTag::Linux, lookup, Some("/home/u".into())).unwrap();
        assert_eq!(root, PathBuf::from("/home/u/.cache"));
    }

    #[test]
    fn darwin_uses_library_caches() {
        let lookup = |_: &str| Some(OsString::from("/ignored"));
        let root =
            platform_cache_root(PlatformTag::Darwin, lookup, Some("/Users/u".into())).unwrap();
        assert_eq!(root, PathBuf::from("/Users/u/Library/Caches"));
    }

    #[test]
    fn windows_prefers_local_app_data() {
        let lookup = |key: &str| (key == "LOCALAPPDATA").then(|| OsString::from("D:/Local"));
        let root = platform_cache_root(PlatformTag::Windows, lookup, Some("C:/Users/u".into()))
            .unwrap();
        assert_eq!(root, PathBuf::from("D:/Local"));

        let root =
            platform_cache_root(PlatformTag::Windows, no_env, Some("C:/Users/u".into())).unwrap();
        assert_eq!(root, PathBuf::from("C:/Users/u").join("AppData").join("Local"));
    }

    #[test]
    fn missing_home_is_cache_unavailable() {
        assert!(matches!(
            platform_cache_root(PlatformTag::Darwin, no_env, None),
            Err(LaunchError::CacheUnavailable(_))
        ));
    }

    #[test]
    fn cache_dir_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let config = LauncherConfig {
            version: "9.9.9".into(),
            cache_root: Some(temp.path().to_path_buf()),
            ..LauncherConfig::default()
        };

        let first = cache_dir(&config, PlatformTag::Linux).unwrap();
        let second = cache_dir(&config, PlatformTag::Linux).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, temp.path().join("agnt").join("9.9.9"));
        assert!(first.is_dir());
    }

    #[test]
    fn binary_path_sits_inside_versioned_dir() {
        let config = LauncherConfig {
            version: "1.0.0".into(),
            ..LauncherConfig::default()
        };
        let dir = PathBuf::from("/c/agnt/1.0.0");
        assert_eq!(
            binary_path_in(&dir, &config, PlatformTag::Windows),
            PathBuf::from("/c/agnt/1.0.0/agnt.exe")
        );
    }
}
