//! Framework assembly for Apple platforms.
//!
//! The stages run strictly in order, each working on the tree the previous
//! one left behind:
//!
//! 1. [`embed`]: fresh root, primary binary, per-slice module metadata
//! 2. [`resources`]: manifest and other resources
//! 3. [`sign`]: `codesign` over the version directory
//! 4. [`archive`]: optional `tar.xz` of the bundle root
//!
//! Signing and archiving are reached through the [`CodeSigner`] and
//! [`Archiver`] traits so the layout logic can run without the real tools.

pub mod archive;
pub mod embed;
pub mod resources;
pub mod sign;

pub use archive::{ArchiveRequest, Archiver, TarXz};
pub use sign::{CodeSigner, Codesign};
