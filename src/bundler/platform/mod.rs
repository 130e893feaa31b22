//! Target platforms and their bundle conventions.
//!
//! Each [`Platform`] carries a static policy: which [`LayoutKind`] its
//! frameworks use and which architecture slices the upstream build produces
//! for it.
//!
//! | Platform | Layout | Slices |
//! |----------|--------|--------|
//! | `osx` | versioned (`Versions/A` + top-level symlinks) | `osx` |
//! | `ios` | flat | `ios-arm64`, `ios-armv7`, `ios-i386`, `ios-x86_64` |
//!
//! The assembly stages live in [`apple`].

pub mod apple;

use crate::bundler::error::ConfigError;
use std::{fmt, str::FromStr};

/// How the bundle directory tree is organised.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LayoutKind {
    /// `Versions/A` holds the payload; the root only has symlinks into it.
    Versioned,
    /// The root is the payload directory; no symlinks.
    Flat,
}

/// One architecture variant produced by the upstream build.
///
/// `slice` is the build-time label (the staged file stem), `arch` the
/// architecture it was compiled for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Slice {
    /// Upstream slice label, e.g. `ios-armv7`
    pub slice: &'static str,
    /// Build architecture, e.g. `armv7`
    pub arch: &'static str,
}

impl Slice {
    /// Architecture name as used inside the bundle's module directory.
    ///
    /// Frameworks call `armv7` plain `arm`; everything else passes through.
    pub fn bundle_arch(&self) -> &'static str {
        match self.arch {
            "armv7" => "arm",
            other => other,
        }
    }
}

const OSX_SLICES: &[Slice] = &[Slice {
    slice: "osx",
    arch: "x86_64",
}];

const IOS_SLICES: &[Slice] = &[
    Slice {
        slice: "ios-arm64",
        arch: "arm64",
    },
    Slice {
        slice: "ios-armv7",
        arch: "armv7",
    },
    Slice {
        slice: "ios-i386",
        arch: "i386",
    },
    Slice {
        slice: "ios-x86_64",
        arch: "x86_64",
    },
];

/// Supported target platforms.
///
/// New platforms are added as variants together with their policy below.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Platform {
    /// macOS; versioned framework layout.
    Osx,
    /// iOS; flat framework layout, multiple architecture slices.
    Ios,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 2] = [Platform::Osx, Platform::Ios];

    /// Identifier used on the command line and in `$ATBUILD_PLATFORM`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Osx => "osx",
            Platform::Ios => "ios",
        }
    }

    /// Bundle layout convention for this platform.
    pub fn layout_kind(&self) -> LayoutKind {
        match self {
            Platform::Osx => LayoutKind::Versioned,
            Platform::Ios => LayoutKind::Flat,
        }
    }

    /// Architecture slices the upstream build produces for this platform,
    /// in processing order.
    pub fn slices(&self) -> &'static [Slice] {
        match self {
            Platform::Osx => OSX_SLICES,
            Platform::Ios => IOS_SLICES,
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.short_name() == s)
            .ok_or_else(|| ConfigError::UnsupportedPlatform(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_platform() {
        assert_eq!("osx".parse::<Platform>(), Ok(Platform::Osx));
        assert_eq!("ios".parse::<Platform>(), Ok(Platform::Ios));
        assert_eq!(
            "linux".parse::<Platform>(),
            Err(ConfigError::UnsupportedPlatform("linux".into()))
        );
        // case-sensitive, like the environment variable it comes from
        assert!("OSX".parse::<Platform>().is_err());
    }

    #[test]
    fn test_layout_kinds() {
        assert_eq!(Platform::Osx.layout_kind(), LayoutKind::Versioned);
        assert_eq!(Platform::Ios.layout_kind(), LayoutKind::Flat);
    }

    #[test]
    fn test_osx_has_single_slice() {
        let slices = Platform::Osx.slices();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].slice, "osx");
        assert_eq!(slices[0].bundle_arch(), "x86_64");
    }

    #[test]
    fn test_slice_labels_unique_per_platform() {
        for platform in Platform::ALL {
            let labels: HashSet<_> = platform.slices().iter().map(|s| s.slice).collect();
            assert_eq!(labels.len(), platform.slices().len(), "{platform}");
        }
    }

    #[test]
    fn test_armv7_is_arm_in_bundle() {
        let bundle_archs: Vec<_> = Platform::Ios.slices().iter().map(Slice::bundle_arch).collect();
        assert_eq!(bundle_archs, ["arm64", "arm", "i386", "x86_64"]);
    }
}
