//! Resource placement.

use crate::bundler::{
    error::{Context, Error, Result},
    layout::{BundleLayout, StagingPaths},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Copies every configured resource into the resource directory under its
/// own file name.
///
/// Flat layouts also get the manifest as `Info.plist` directly in the
/// version directory. Versioned layouts get the top-level `Resources` link
/// once all copies succeeded. Returns the placed files.
///
/// Destinations are checked before anything is copied: a resource may not
/// land on the binary, the module tree, the flat `Info.plist` (unless it is
/// the manifest itself) or another resource.
pub async fn place_resources(settings: &Settings, layout: &BundleLayout) -> Result<Vec<PathBuf>> {
    let plan = plan_resources(settings, layout)?;

    let resource_dir = layout.resource_dir();
    fs::ensure_dir(resource_dir).await?;

    let mut placed = Vec::new();
    for (resource, dst) in plan {
        fs::copy_file(resource, &dst)
            .await
            .with_context(|| format!("failed to copy resource {}", resource.display()))?;
        placed.push(dst);
    }

    if let Some(info_plist) = layout.info_plist()
        && !placed.contains(&info_plist)
    {
        fs::copy_file(settings.manifest(), &info_plist)
            .await
            .with_context(|| format!("failed to copy manifest {}", settings.manifest().display()))?;
        placed.push(info_plist);
    }

    if let Some(link) = layout.resources_link() {
        fs::create_symlink(&link).await?;
    }

    log::info!("Placed {} resource file(s)", placed.len());
    Ok(placed)
}

/// Pairs each resource with its destination, rejecting any destination
/// already owned by another input.
fn plan_resources<'a>(
    settings: &'a Settings,
    layout: &BundleLayout,
) -> Result<Vec<(&'a Path, PathBuf)>> {
    let staging = StagingPaths::from_settings(settings);

    let mut owners: Vec<(PathBuf, PathBuf)> = vec![
        (layout.binary(), staging.binary()),
        (
            layout.version_dir().join("Modules"),
            staging.build_unit().to_path_buf(),
        ),
    ];
    if let Some(info_plist) = layout.info_plist() {
        owners.push((info_plist, settings.manifest().to_path_buf()));
    }

    let mut plan = Vec::new();
    for resource in settings.resources() {
        let file_name = resource
            .file_name()
            .with_context(|| format!("resource {} has no file name", resource.display()))?;
        let dst = layout.resource_dir().join(file_name);

        match owners.iter().find(|(taken, _)| *taken == dst) {
            // The manifest landing on the flat Info.plist is the same file.
            Some((_, owner)) if owner.as_path() == resource => {}
            Some((_, owner)) => {
                return Err(Error::ResourceConflict {
                    resource: resource.to_path_buf(),
                    existing: owner.clone(),
                    destination: dst,
                });
            }
            None => owners.push((dst.clone(), resource.to_path_buf())),
        }
        plan.push((resource, dst));
    }

    Ok(plan)
}
