//! Primary binary and module metadata embedding.

use crate::bundler::{
    error::{Context, Result},
    layout::{BundleLayout, MODULE_METADATA_EXTENSIONS, StagingPaths},
    settings::ArchitectureMap,
    utils::fs,
};
use std::path::PathBuf;

/// Removes any previous bundle at the layout root and recreates the
/// version directory.
///
/// On versioned layouts `Versions/Current` is linked right away; codesign
/// rejects the bundle without it.
pub async fn prepare_root(layout: &BundleLayout) -> Result<()> {
    fs::remove_dir_all(layout.root()).await?;
    fs::create_dir_all(layout.version_dir(), false).await?;

    if let Some(link) = layout.current_link() {
        fs::create_symlink(&link).await?;
    }
    Ok(())
}

/// Copies the staged `<name>.dylib` into the bundle as `<name>`.
///
/// The binary is required: a missing or unreadable source aborts the run.
pub async fn embed_binary(staging: &StagingPaths, layout: &BundleLayout) -> Result<PathBuf> {
    let src = staging.binary();
    let dst = layout.binary();

    fs::copy_file(&src, &dst)
        .await
        .with_context(|| format!("failed to embed primary binary {}", src.display()))?;
    log::debug!("Embedded {} as {}", src.display(), dst.display());

    if let Some(link) = layout.binary_link() {
        fs::create_symlink(&link).await?;
    }
    Ok(dst)
}

/// Copies per-slice interface and documentation files into the module
/// directory, renamed to their bundle architecture.
///
/// Slices may be partially built, so absent metadata files are skipped.
/// Returns the files that were embedded.
pub async fn embed_modules(
    architectures: &ArchitectureMap,
    staging: &StagingPaths,
    layout: &BundleLayout,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(layout.module_dir(), false).await?;

    let mut embedded = Vec::new();
    for (slice, arch) in architectures.iter() {
        for extension in MODULE_METADATA_EXTENSIONS {
            let src = staging.slice_file(slice, extension);
            let dst = layout.module_file(arch, extension);

            if fs::copy_file_if_exists(&src, &dst).await? {
                log::debug!("  {} -> {}", src.display(), dst.display());
                embedded.push(dst);
            } else {
                log::debug!("  no {} for slice {}, skipping", extension, slice);
            }
        }
    }

    if let Some(link) = layout.modules_link() {
        fs::create_symlink(&link).await?;
    }

    log::info!(
        "Embedded {} module file(s) for {} slice(s)",
        embedded.len(),
        architectures.len()
    );
    Ok(embedded)
}
