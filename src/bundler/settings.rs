//! Bundle configuration.
//!
//! [`Settings`] is the immutable, validated configuration of one packaging
//! run. It is produced once by [`SettingsBuilder::build`] from raw inputs and
//! then passed by reference through every stage; nothing in the bundler reads
//! the process environment.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_framework::bundler::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .platform("osx")
//!     .name("Foo")
//!     .manifest("Info.plist")
//!     .staging_root(".atllbuild/products")
//!     .build()?;
//!
//! assert_eq!(settings.architectures().len(), 1);
//! # Ok::<(), kodegen_bundler_framework::bundler::ConfigError>(())
//! ```

use crate::bundler::{
    error::ConfigError,
    platform::{Platform, Slice},
};
use std::path::{Path, PathBuf};

/// Default directory the framework and archive are written to.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "bin";

/// Ad-hoc code signing identity.
pub const AD_HOC_IDENTITY: &str = "-";

/// Compression tier for the optional archive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionLevel {
    /// Fastest compression (xz level 0), for fast-compile configurations.
    Fast,
    /// Smallest output (xz level 9).
    #[default]
    Maximum,
}

impl CompressionLevel {
    /// Numeric xz preset for this tier.
    pub fn xz_level(&self) -> u32 {
        match self {
            CompressionLevel::Fast => 0,
            CompressionLevel::Maximum => 9,
        }
    }
}

/// Mapping from upstream slice labels to bundle architecture names.
///
/// Derived statically from the platform; one entry per supported slice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArchitectureMap {
    slices: &'static [Slice],
}

impl ArchitectureMap {
    /// Architecture map for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            slices: platform.slices(),
        }
    }

    /// Iterates `(slice label, bundle architecture name)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.slices.iter().map(|s| (s.slice, s.bundle_arch()))
    }

    /// Bundle architecture name for a slice label, if the slice is known.
    pub fn bundle_arch(&self, slice: &str) -> Option<&'static str> {
        self.slices
            .iter()
            .find(|s| s.slice == slice)
            .map(Slice::bundle_arch)
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the map has no slices.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Validated configuration of one framework packaging run.
#[derive(Clone, Debug)]
pub struct Settings {
    platform: Platform,
    name: String,
    manifest: PathBuf,
    extra_resources: Vec<PathBuf>,
    staging_root: PathBuf,
    output_directory: PathBuf,
    compress: bool,
    package_version: Option<String>,
    compression: CompressionLevel,
    signing_identity: String,
    architectures: ArchitectureMap,
}

impl Settings {
    /// Target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Bundle name; also the name of the embedded binary.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Manifest (Info.plist) source path.
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// All resource files to place, manifest first.
    pub fn resources(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.manifest.as_path()).chain(self.extra_resources.iter().map(PathBuf::as_path))
    }

    /// Directory holding the upstream build's staged artifacts.
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Directory the framework (and archive) are written to.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Whether an archive is produced after signing.
    pub fn compress(&self) -> bool {
        self.compress
    }

    /// Package version embedded in the archive name.
    ///
    /// Always `Some` when [`compress`](Self::compress) is set.
    pub fn package_version(&self) -> Option<&str> {
        self.package_version.as_deref()
    }

    /// Archive compression tier.
    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }

    /// Code signing identity passed to `codesign --sign`.
    pub fn signing_identity(&self) -> &str {
        &self.signing_identity
    }

    /// Architecture slices embedded for this platform.
    pub fn architectures(&self) -> &ArchitectureMap {
        &self.architectures
    }
}

/// Builder collecting raw configuration inputs.
///
/// Every field is optional until [`build`](Self::build) validates them.
#[derive(Clone, Debug, Default)]
pub struct SettingsBuilder {
    platform: Option<String>,
    name: Option<String>,
    manifest: Option<PathBuf>,
    extra_resources: Vec<PathBuf>,
    staging_root: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    compress: bool,
    package_version: Option<String>,
    compression: CompressionLevel,
    signing_identity: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the platform identifier (`osx` or `ios`).
    ///
    /// # Required
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Sets the bundle name.
    ///
    /// # Required
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the manifest file embedded in the bundle.
    ///
    /// # Required
    pub fn manifest<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a resource file placed next to the manifest.
    pub fn resource<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.extra_resources.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging root containing `<name>.atbin`.
    ///
    /// # Required
    pub fn staging_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    ///
    /// Default: `bin`
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables or disables the archive step.
    ///
    /// Default: false
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Sets the package version used in the archive name.
    ///
    /// Required when compressing.
    pub fn package_version(mut self, version: impl Into<String>) -> Self {
        self.package_version = Some(version.into());
        self
    }

    /// Sets the archive compression tier.
    ///
    /// Default: [`CompressionLevel::Maximum`]
    pub fn compression(mut self, level: CompressionLevel) -> Self {
        self.compression = level;
        self
    }

    /// Sets the code signing identity.
    ///
    /// Default: ad-hoc (`-`)
    pub fn signing_identity(mut self, identity: impl Into<String>) -> Self {
        self.signing_identity = Some(identity.into());
        self
    }

    /// Validates the inputs and builds the settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required input is missing or invalid.
    /// Checks run in a fixed order: platform, name, manifest, staging root,
    /// package version.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let platform: Platform = self
            .platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPlatform)?
            .parse()?;

        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(ConfigError::MissingName)?;
        validate_name(&name)?;

        let manifest = self
            .manifest
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingManifest)?;

        let staging_root = self
            .staging_root
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingStagingRoot)?;

        let package_version = self.package_version.filter(|v| !v.is_empty());
        if self.compress && package_version.is_none() {
            return Err(ConfigError::MissingPackageVersion);
        }

        Ok(Settings {
            platform,
            name,
            manifest,
            extra_resources: self.extra_resources,
            staging_root,
            output_directory: self
                .output_directory
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)),
            compress: self.compress,
            package_version,
            compression: self.compression,
            signing_identity: self
                .signing_identity
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| AD_HOC_IDENTITY.to_string()),
            architectures: ArchitectureMap::for_platform(platform),
        })
    }
}

/// The name becomes a directory and a file name; it must be one path component.
fn validate_name(name: &str) -> Result<(), ConfigError> {
    let bad = name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if bad {
        return Err(ConfigError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SettingsBuilder {
        SettingsBuilder::new()
            .platform("ios")
            .name("Foo")
            .manifest("Info.plist")
            .staging_root("stage")
    }

    #[test]
    fn test_build_defaults() {
        let settings = base().build().unwrap();
        assert_eq!(settings.platform(), Platform::Ios);
        assert_eq!(settings.name(), "Foo");
        assert_eq!(settings.output_directory(), Path::new("bin"));
        assert_eq!(settings.signing_identity(), "-");
        assert_eq!(settings.compression(), CompressionLevel::Maximum);
        assert!(!settings.compress());
        assert_eq!(settings.package_version(), None);
        assert_eq!(settings.architectures().len(), 4);
    }

    #[test]
    fn test_missing_platform() {
        let err = SettingsBuilder::new().name("Foo").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingPlatform);

        let err = base().platform("").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingPlatform);
    }

    #[test]
    fn test_unsupported_platform() {
        let err = base().platform("tvos").build().unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedPlatform("tvos".into()));
    }

    #[test]
    fn test_missing_name_and_manifest() {
        let err = SettingsBuilder::new().platform("osx").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingName);

        let err = SettingsBuilder::new()
            .platform("osx")
            .name("Foo")
            .staging_root("stage")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingManifest);
    }

    #[test]
    fn test_invalid_names() {
        for name in ["..", ".", "a/b", "a\\b"] {
            let err = base().name(name).build().unwrap_err();
            assert_eq!(err, ConfigError::InvalidName(name.into()));
        }
    }

    #[test]
    fn test_missing_staging_root() {
        let err = SettingsBuilder::new()
            .platform("osx")
            .name("Foo")
            .manifest("Info.plist")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingStagingRoot);
    }

    #[test]
    fn test_compress_requires_version() {
        let err = base().compress(true).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingPackageVersion);

        let err = base().compress(true).package_version("").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingPackageVersion);

        let settings = base().compress(true).package_version("1.2.0").build().unwrap();
        assert_eq!(settings.package_version(), Some("1.2.0"));
    }

    #[test]
    fn test_version_ignored_without_compress() {
        let settings = base().package_version("1.0").build().unwrap();
        assert!(!settings.compress());
        assert_eq!(settings.package_version(), Some("1.0"));
    }

    #[test]
    fn test_resources_manifest_first() {
        let settings = base().resource("extra/LICENSE").build().unwrap();
        let resources: Vec<_> = settings.resources().collect();
        assert_eq!(resources, [Path::new("Info.plist"), Path::new("extra/LICENSE")]);
    }

    #[test]
    fn test_architecture_map_lookup() {
        let map = ArchitectureMap::for_platform(Platform::Ios);
        assert_eq!(map.bundle_arch("ios-armv7"), Some("arm"));
        assert_eq!(map.bundle_arch("ios-arm64"), Some("arm64"));
        assert_eq!(map.bundle_arch("osx"), None);

        let osx = ArchitectureMap::for_platform(Platform::Osx);
        assert_eq!(osx.iter().collect::<Vec<_>>(), [("osx", "x86_64")]);
    }

    #[test]
    fn test_compression_levels() {
        assert_eq!(CompressionLevel::Fast.xz_level(), 0);
        assert_eq!(CompressionLevel::Maximum.xz_level(), 9);
    }
}
