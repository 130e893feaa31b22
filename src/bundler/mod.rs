//! Framework bundler for Apple platforms.
//!
//! Assembles a `<name>.framework` bundle from artifacts an upstream build has
//! already staged: a shared library, per-architecture module metadata and an
//! Info.plist manifest. The bundle is then code signed and, optionally,
//! compressed into a `tar.xz` archive.
//!
//! # Supported Platforms
//!
//! | Platform | Layout | Notes |
//! |----------|--------|-------|
//! | `osx` | versioned | `Versions/A` with top-level symlinks |
//! | `ios` | flat | four architecture slices |
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_framework::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBuilder::new()
//!     .platform("osx")
//!     .name("Foo")
//!     .manifest("Info.plist")
//!     .staging_root(".atllbuild/products")
//!     .compress(true)
//!     .package_version("1.0.0")
//!     .build()?;
//!
//! let framework = Bundler::new(settings).bundle().await?;
//! if let Some(archive) = framework.archive {
//!     println!("{} ({} bytes, sha256 {})", archive.path.display(), archive.size, archive.checksum);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
mod checksum;
mod error;
pub mod layout;
pub mod platform;
mod settings;
mod tools;
mod utils;

// Public re-exports
pub use builder::Bundler;
pub use error::{ConfigError, Context, Error, ErrorExt, Result};
pub use layout::{BundleLayout, StagingPaths, Symlink};
pub use platform::apple::{ArchiveRequest, Archiver, CodeSigner, Codesign, TarXz};
pub use platform::{LayoutKind, Platform, Slice};
pub use settings::{
    AD_HOC_IDENTITY, ArchitectureMap, CompressionLevel, DEFAULT_OUTPUT_DIRECTORY, Settings,
    SettingsBuilder,
};

use std::path::PathBuf;

/// The compressed archive produced from a framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledArtifact {
    /// Path of the archive.
    pub path: PathBuf,

    /// Size of the archive in bytes.
    pub size: u64,

    /// SHA-256 checksum of the archive, hex encoded.
    pub checksum: String,
}

/// Result of a successful bundling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledFramework {
    /// Platform the framework was built for.
    pub platform: Platform,

    /// Bundle root, `<out>/<name>.framework`.
    pub root: PathBuf,

    /// Signed payload directory.
    pub version_dir: PathBuf,

    /// Embedded primary binary.
    pub binary: PathBuf,

    /// Module metadata files embedded, in slice order.
    pub modules: Vec<PathBuf>,

    /// Resource files placed.
    pub resources: Vec<PathBuf>,

    /// Archive, when compression was enabled.
    pub archive: Option<BundledArtifact>,
}
