//! # Kodegen Bundler Framework
//!
//! Packages pre-built artifacts into an Apple `.framework` bundle.
//!
//! An upstream build stages `<name>.atbin/` containing the shared library and
//! per-architecture module metadata. This crate lays those out as a framework
//! for the target platform, adds the Info.plist and any extra resources, signs
//! the result with `codesign` and optionally compresses it with `tar`/xz.
//!
//! ## Layouts
//!
//! - **osx**: versioned bundle (`Versions/A/...` plus `Versions/Current`,
//!   binary, `Modules` and `Resources` symlinks at the root)
//! - **ios**: flat bundle with the Info.plist at the root
//!
//! ## Usage
//!
//! ```bash
//! ATBUILD_PLATFORM=osx ATBUILD_BIN_PATH=.atllbuild/products \
//!     kodegen_bundler_framework --name Foo --info-plist Info.plist
//! kodegen_bundler_framework --platform ios --name Foo --info-plist Info.plist \
//!     --bin-path out --compress true --package-version 1.2.0
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;

pub use bundler::{BundledArtifact, BundledFramework, Bundler, Platform, Settings, SettingsBuilder};
pub use cli::Args;
pub use error::{FrameworkError, Result};
