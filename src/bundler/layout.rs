//! Framework bundle paths.
//!
//! [`BundleLayout`] is a pure function of platform, name and output
//! directory: it computes every path the assembly stages touch without
//! looking at the filesystem. [`StagingPaths`] does the same for the
//! upstream build's staged inputs.
//!
//! Versioned layout (`osx`):
//!
//! ```text
//! bin/Foo.framework/
//! ├── Foo -> Versions/A/Foo
//! ├── Modules -> Versions/A/Modules
//! ├── Resources -> Versions/A/Resources
//! └── Versions/
//!     ├── Current -> A
//!     └── A/
//!         ├── Foo
//!         ├── Modules/Foo.module/x86_64.swiftmodule
//!         └── Resources/Info.plist
//! ```
//!
//! Flat layout (`ios`):
//!
//! ```text
//! bin/Foo.framework/
//! ├── Foo
//! ├── Info.plist
//! └── Modules/Foo.module/{arm64,arm,i386,x86_64}.swiftmodule
//! ```

use crate::bundler::{
    platform::{LayoutKind, Platform},
    settings::Settings,
};
use std::path::{Path, PathBuf};

/// Extension of the bundle root directory.
pub const FRAMEWORK_EXTENSION: &str = "framework";
/// Extension of the per-name staging directory.
pub const BUILD_UNIT_EXTENSION: &str = "atbin";
/// Extension of the staged primary binary.
pub const BINARY_EXTENSION: &str = "dylib";
/// Extension of the module directory inside `Modules/`.
pub const MODULE_DIR_EXTENSION: &str = "module";
/// Extension of per-slice interface files.
pub const INTERFACE_EXTENSION: &str = "swiftmodule";
/// Extension of per-slice documentation files.
pub const DOC_EXTENSION: &str = "swiftdoc";
/// Fixed manifest file name on flat layouts.
pub const INFO_PLIST: &str = "Info.plist";
/// Letter of the single version directory.
pub const VERSION_LETTER: &str = "A";
/// Extension of the compressed archive.
pub const ARCHIVE_EXTENSION: &str = "tar.xz";

/// Per-slice metadata file extensions, in copy order.
pub const MODULE_METADATA_EXTENSIONS: [&str; 2] = [INTERFACE_EXTENSION, DOC_EXTENSION];

/// A relative symlink inside the bundle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Symlink {
    /// Where the link is created
    pub link: PathBuf,
    /// Link target, relative to the link's parent directory
    pub target: PathBuf,
}

/// Every path of one framework bundle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundleLayout {
    kind: LayoutKind,
    name: String,
    root: PathBuf,
    version_dir: PathBuf,
    module_dir: PathBuf,
    resource_dir: PathBuf,
}

impl BundleLayout {
    /// Computes the layout of `<output_directory>/<name>.framework`.
    pub fn new(platform: Platform, name: &str, output_directory: &Path) -> Self {
        let kind = platform.layout_kind();
        let root = output_directory.join(format!("{name}.{FRAMEWORK_EXTENSION}"));

        let version_dir = match kind {
            LayoutKind::Versioned => root.join(versioned_dir()),
            LayoutKind::Flat => root.clone(),
        };
        let module_dir = version_dir
            .join("Modules")
            .join(format!("{name}.{MODULE_DIR_EXTENSION}"));
        let resource_dir = match kind {
            LayoutKind::Versioned => version_dir.join("Resources"),
            LayoutKind::Flat => version_dir.clone(),
        };

        Self {
            kind,
            name: name.to_string(),
            root,
            version_dir,
            module_dir,
            resource_dir,
        }
    }

    /// Layout for a validated configuration.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.platform(), settings.name(), settings.output_directory())
    }

    /// Layout convention in use.
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Bundle root, `<out>/<name>.framework`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Payload directory: `Versions/A` (versioned) or the root (flat).
    pub fn version_dir(&self) -> &Path {
        &self.version_dir
    }

    /// `<version_dir>/Modules/<name>.module`.
    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    /// `<version_dir>/Resources` (versioned) or the version dir (flat).
    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Destination of the primary binary.
    pub fn binary(&self) -> PathBuf {
        self.version_dir.join(&self.name)
    }

    /// Module metadata file for one bundle architecture.
    pub fn module_file(&self, bundle_arch: &str, extension: &str) -> PathBuf {
        self.module_dir.join(format!("{bundle_arch}.{extension}"))
    }

    /// Fixed-name manifest copy; only flat layouts have one.
    pub fn info_plist(&self) -> Option<PathBuf> {
        match self.kind {
            LayoutKind::Flat => Some(self.version_dir.join(INFO_PLIST)),
            LayoutKind::Versioned => None,
        }
    }

    /// `Versions/Current -> A`.
    pub fn current_link(&self) -> Option<Symlink> {
        self.versioned(|root| Symlink {
            link: root.join("Versions").join("Current"),
            target: PathBuf::from(VERSION_LETTER),
        })
    }

    /// `<name> -> Versions/A/<name>`.
    pub fn binary_link(&self) -> Option<Symlink> {
        self.top_level_link(&self.name)
    }

    /// `Modules -> Versions/A/Modules`.
    pub fn modules_link(&self) -> Option<Symlink> {
        self.top_level_link("Modules")
    }

    /// `Resources -> Versions/A/Resources`.
    pub fn resources_link(&self) -> Option<Symlink> {
        self.top_level_link("Resources")
    }

    /// All symlinks of the layout, in creation order.
    pub fn symlinks(&self) -> Vec<Symlink> {
        [
            self.current_link(),
            self.binary_link(),
            self.modules_link(),
            self.resources_link(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn top_level_link(&self, entry: &str) -> Option<Symlink> {
        self.versioned(|root| Symlink {
            link: root.join(entry),
            target: versioned_dir().join(entry),
        })
    }

    fn versioned(&self, f: impl FnOnce(&Path) -> Symlink) -> Option<Symlink> {
        match self.kind {
            LayoutKind::Versioned => Some(f(&self.root)),
            LayoutKind::Flat => None,
        }
    }
}

fn versioned_dir() -> PathBuf {
    Path::new("Versions").join(VERSION_LETTER)
}

/// Paths of the upstream build's staged artifacts for one bundle.
///
/// `<staging_root>/<name>.atbin/{<name>.dylib, <slice>.swiftmodule, <slice>.swiftdoc}`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StagingPaths {
    name: String,
    build_unit: PathBuf,
}

impl StagingPaths {
    /// Staging paths for `name` under `staging_root`.
    pub fn new(staging_root: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            build_unit: staging_root.join(format!("{name}.{BUILD_UNIT_EXTENSION}")),
        }
    }

    /// Staging paths for a validated configuration.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.staging_root(), settings.name())
    }

    /// `<staging_root>/<name>.atbin`.
    pub fn build_unit(&self) -> &Path {
        &self.build_unit
    }

    /// The primary binary, `<name>.dylib`.
    pub fn binary(&self) -> PathBuf {
        self.build_unit
            .join(format!("{}.{BINARY_EXTENSION}", self.name))
    }

    /// Metadata file of one slice, e.g. `ios-armv7.swiftmodule`.
    pub fn slice_file(&self, slice: &str, extension: &str) -> PathBuf {
        self.build_unit.join(format!("{slice}.{extension}"))
    }
}

/// Archive path, `<out>/<name>-<version>.tar.xz`.
pub fn archive_path(output_directory: &Path, name: &str, version: &str) -> PathBuf {
    output_directory.join(format!("{name}-{version}.{ARCHIVE_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_layout() {
        let layout = BundleLayout::new(Platform::Osx, "Foo", Path::new("bin"));

        assert_eq!(layout.root(), Path::new("bin/Foo.framework"));
        assert_eq!(layout.version_dir(), Path::new("bin/Foo.framework/Versions/A"));
        assert_eq!(
            layout.module_dir(),
            Path::new("bin/Foo.framework/Versions/A/Modules/Foo.module")
        );
        assert_eq!(
            layout.resource_dir(),
            Path::new("bin/Foo.framework/Versions/A/Resources")
        );
        assert_eq!(layout.binary(), Path::new("bin/Foo.framework/Versions/A/Foo"));
        assert_eq!(layout.info_plist(), None);
    }

    #[test]
    fn test_flat_layout() {
        let layout = BundleLayout::new(Platform::Ios, "Foo", Path::new("bin"));

        assert_eq!(layout.root(), Path::new("bin/Foo.framework"));
        assert_eq!(layout.version_dir(), layout.root());
        assert_eq!(layout.resource_dir(), layout.version_dir());
        assert_eq!(
            layout.module_dir(),
            Path::new("bin/Foo.framework/Modules/Foo.module")
        );
        assert_eq!(layout.binary(), Path::new("bin/Foo.framework/Foo"));
        assert_eq!(
            layout.info_plist(),
            Some(PathBuf::from("bin/Foo.framework/Info.plist"))
        );
        assert!(layout.symlinks().is_empty());
    }

    #[test]
    fn test_versioned_symlinks_are_relative() {
        let layout = BundleLayout::new(Platform::Osx, "Foo", Path::new("/out"));
        let links = layout.symlinks();

        let expected = [
            ("/out/Foo.framework/Versions/Current", "A"),
            ("/out/Foo.framework/Foo", "Versions/A/Foo"),
            ("/out/Foo.framework/Modules", "Versions/A/Modules"),
            ("/out/Foo.framework/Resources", "Versions/A/Resources"),
        ];
        assert_eq!(links.len(), expected.len());
        for (link, (path, target)) in links.iter().zip(expected) {
            assert_eq!(link.link, Path::new(path));
            assert_eq!(link.target, Path::new(target));
            assert!(link.target.is_relative());
        }
    }

    #[test]
    fn test_symlink_targets_resolve_into_version_dir() {
        let layout = BundleLayout::new(Platform::Osx, "Foo", Path::new("bin"));
        for link in layout.symlinks() {
            let resolved = link.link.parent().unwrap().join(&link.target);
            assert!(
                resolved.starts_with(layout.version_dir()),
                "{} does not point into Versions/A",
                link.link.display()
            );
        }
    }

    #[test]
    fn test_module_file_names() {
        let layout = BundleLayout::new(Platform::Ios, "Foo", Path::new("bin"));
        assert_eq!(
            layout.module_file("arm", INTERFACE_EXTENSION),
            Path::new("bin/Foo.framework/Modules/Foo.module/arm.swiftmodule")
        );
    }

    #[test]
    fn test_staging_paths() {
        let staging = StagingPaths::new(Path::new("/stage"), "Foo");
        assert_eq!(staging.build_unit(), Path::new("/stage/Foo.atbin"));
        assert_eq!(staging.binary(), Path::new("/stage/Foo.atbin/Foo.dylib"));
        assert_eq!(
            staging.slice_file("ios-armv7", DOC_EXTENSION),
            Path::new("/stage/Foo.atbin/ios-armv7.swiftdoc")
        );
    }

    #[test]
    fn test_archive_path() {
        assert_eq!(
            archive_path(Path::new("bin"), "Foo", "1.0.0"),
            Path::new("bin/Foo-1.0.0.tar.xz")
        );
    }
}
