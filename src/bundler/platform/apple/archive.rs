//! Compressed archive of the finished framework.

use crate::{
    bail,
    bundler::{
        error::{Error, ErrorExt, Result},
        layout::{self, BundleLayout},
        settings::{CompressionLevel, Settings},
        tools,
    },
};
use path_absolutize::Absolutize;
use std::{
    ffi::OsString,
    future::Future,
    path::{Path, PathBuf},
};

/// What to archive and where.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArchiveRequest {
    /// Directory the archived entry is relative to
    pub base_dir: PathBuf,
    /// Entry to archive, relative to `base_dir` (the bundle root's name)
    pub entry: PathBuf,
    /// Archive file to write
    pub destination: PathBuf,
    /// Compression tier
    pub level: CompressionLevel,
}

impl ArchiveRequest {
    /// Request archiving the bundle root of `layout` as
    /// `<out>/<name>-<version>.tar.xz`.
    pub fn for_bundle(settings: &Settings, layout: &BundleLayout, version: &str) -> Result<Self> {
        let Some(entry) = layout.root().file_name() else {
            bail!("invalid bundle root {}", layout.root().display());
        };

        Ok(Self {
            base_dir: settings.output_directory().to_path_buf(),
            entry: PathBuf::from(entry),
            destination: layout::archive_path(settings.output_directory(), settings.name(), version),
            level: settings.compression(),
        })
    }
}

/// Produces a single compressed archive.
pub trait Archiver {
    /// Writes the archive described by `request`. Any failure is fatal for the run.
    fn archive(&self, request: &ArchiveRequest) -> impl Future<Output = Result<()>> + Send;
}

/// `tar` with xz compression.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarXz;

impl TarXz {
    /// Arguments passed to `tar`; `destination` must already be absolute
    /// since `-C` changes directory before the entry is read.
    pub fn args(request: &ArchiveRequest, destination: &Path) -> Vec<OsString> {
        vec![
            "-c".into(),
            "--options".into(),
            format!("xz:compression-level={}", request.level.xz_level()).into(),
            "-J".into(),
            "-f".into(),
            destination.into(),
            "-C".into(),
            request.base_dir.as_os_str().into(),
            request.entry.as_os_str().into(),
        ]
    }
}

impl Archiver for TarXz {
    async fn archive(&self, request: &ArchiveRequest) -> Result<()> {
        let tool = tools::require(tools::TAR)?;
        let destination = request
            .destination
            .absolutize()
            .fs_context("failed to resolve archive path", &request.destination)?
            .into_owned();

        log::info!(
            "Compressing {} into {} (xz level {})",
            request.entry.display(),
            destination.display(),
            request.level.xz_level()
        );

        let output = tokio::process::Command::new(&tool)
            .args(Self::args(request, &destination))
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: tools::TAR.to_string(),
                error,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Archive {
                path: destination,
                message: format!("tar exited with {}: {}", output.status, stderr.trim()),
            });
        }

        log::info!("✓ Created {}", destination.display());
        Ok(())
    }
}
