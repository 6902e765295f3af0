//! Release download for the pinned agnt binary
//!
//! ## Module Organization
//!
//! - `platform` - Host OS and CPU resolution into release tags
//! - `release` - Release asset naming and URL construction
//! - `core` - Cache hit check, HTTP fetch and atomic installation

pub mod platform;
pub mod release;
mod core;

// Re-export public API
pub use self::core::ensure_binary;
pub use platform::{resolve_arch, resolve_platform, ArchTag, HostTarget, PlatformTag};
pub use release::download_url;
