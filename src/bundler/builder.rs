//! Bundle orchestration.
//!
//! [`Bundler`] runs the assembly stages in order against one [`Settings`]:
//!
//! 1. Compute the [`BundleLayout`]
//! 2. Recreate the bundle root, embed the binary and module metadata
//! 3. Place resources
//! 4. Sign the version directory
//! 5. Archive the bundle root if compression is enabled
//!
//! The first failing stage aborts the run and leaves the partial tree on
//! disk. A rerun starts by removing it.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_framework::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_framework::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .platform("ios")
//!     .name("Foo")
//!     .manifest("Info.plist")
//!     .staging_root(".atllbuild/products")
//!     .build()?;
//!
//! let framework = Bundler::new(settings).bundle().await?;
//! println!("Created {}", framework.root.display());
//! # Ok(())
//! # }
//! ```

use crate::bundler::{
    BundledArtifact, BundledFramework,
    checksum::calculate_sha256,
    error::{ErrorExt, Result},
    layout::{BundleLayout, StagingPaths},
    platform::apple::{ArchiveRequest, Archiver, CodeSigner, Codesign, TarXz, embed, resources},
    settings::Settings,
};

/// Framework bundle orchestrator.
///
/// Generic over the signing and archiving capabilities; [`Bundler::new`]
/// wires in the real `codesign` and `tar`.
#[derive(Debug)]
pub struct Bundler<S = Codesign, A = TarXz> {
    settings: Settings,
    signer: S,
    archiver: A,
}

impl Bundler {
    /// Creates a bundler using `codesign` and `tar`.
    pub fn new(settings: Settings) -> Self {
        let signer = Codesign::new(settings.signing_identity());
        Self::with_tools(settings, signer, TarXz)
    }
}

impl<S: CodeSigner, A: Archiver> Bundler<S, A> {
    /// Creates a bundler with explicit signing and archiving capabilities.
    pub fn with_tools(settings: Settings, signer: S, archiver: A) -> Self {
        Self {
            settings,
            signer,
            archiver,
        }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Layout of the bundle this bundler produces.
    pub fn layout(&self) -> BundleLayout {
        BundleLayout::from_settings(&self.settings)
    }

    /// Assembles, signs and optionally archives the framework.
    pub async fn bundle(&self) -> Result<BundledFramework> {
        let settings = &self.settings;
        let layout = self.layout();
        let staging = StagingPaths::from_settings(settings);

        log::info!(
            "Bundling {} framework at {}",
            settings.platform(),
            layout.root().display()
        );

        embed::prepare_root(&layout).await?;
        let binary = embed::embed_binary(&staging, &layout).await?;
        let modules = embed::embed_modules(settings.architectures(), &staging, &layout).await?;
        let resources = resources::place_resources(settings, &layout).await?;

        self.signer.sign(layout.version_dir()).await?;

        let archive = match settings.package_version() {
            Some(version) if settings.compress() => Some(self.archive(&layout, version).await?),
            _ => None,
        };

        Ok(BundledFramework {
            platform: settings.platform(),
            root: layout.root().to_path_buf(),
            version_dir: layout.version_dir().to_path_buf(),
            binary,
            modules,
            resources,
            archive,
        })
    }

    async fn archive(&self, layout: &BundleLayout, version: &str) -> Result<BundledArtifact> {
        let request = ArchiveRequest::for_bundle(&self.settings, layout, version)?;
        self.archiver.archive(&request).await?;

        let size = tokio::fs::metadata(&request.destination)
            .await
            .fs_context("reading archive metadata", &request.destination)?
            .len();
        let checksum = calculate_sha256(&request.destination).await?;

        Ok(BundledArtifact {
            path: request.destination,
            size,
            checksum,
        })
    }
}
