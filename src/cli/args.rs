//! Command line argument parsing.
//!
//! Arguments and environment variables are gathered here and turned into
//! [`Settings`] exactly once; the bundler never reads either.

use crate::bundler::{
    AD_HOC_IDENTITY, CompressionLevel, ConfigError, DEFAULT_OUTPUT_DIRECTORY, Settings, SettingsBuilder,
};
use clap::Parser;
use std::path::PathBuf;

/// Package pre-built artifacts into a signed .framework bundle
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_framework",
    version,
    about = "Package pre-built artifacts into a signed .framework bundle",
    long_about = "Assemble a macOS or iOS .framework from artifacts staged by an upstream build.

Reads <bin-path>/<name>.atbin/{<name>.dylib, <slice>.swiftmodule, <slice>.swiftdoc},
writes bin/<name>.framework, signs it, and optionally compresses it.

Usage:
  ATBUILD_PLATFORM=osx kodegen_bundler_framework --name Foo --info-plist Info.plist --bin-path .atllbuild/products
  kodegen_bundler_framework --platform ios --name Foo --info-plist Info.plist --bin-path out --compress true --package-version 1.2.0"
)]
pub struct Args {
    /// Target platform: osx or ios
    #[arg(long, env = "ATBUILD_PLATFORM", value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Framework name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Info.plist embedded in the framework
    #[arg(long = "info-plist", value_name = "PATH")]
    pub info_plist: Option<PathBuf>,

    /// Additional resource files placed next to the Info.plist
    #[arg(long = "resource", value_name = "PATH")]
    pub resources: Vec<PathBuf>,

    /// Directory containing <name>.atbin
    #[arg(long, env = "ATBUILD_BIN_PATH", value_name = "DIR")]
    pub bin_path: Option<PathBuf>,

    /// Output directory for the framework and archive
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIRECTORY)]
    pub output_dir: PathBuf,

    /// Compress the framework into <name>-<version>.tar.xz ("true" to enable)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub compress: Option<String>,

    /// Package version used in the archive name
    #[arg(long, env = "ATBUILD_PACKAGE_VERSION", value_name = "VERSION")]
    pub package_version: Option<String>,

    /// Use the fast compression tier ("1" to enable)
    #[arg(long, env = "ATBUILD_CONFIGURATION_FAST_COMPILE", value_name = "FLAG")]
    pub fast_compile: Option<String>,

    /// Code signing identity ("-" signs ad-hoc)
    #[arg(long, value_name = "IDENTITY", default_value = AD_HOC_IDENTITY)]
    pub sign_identity: String,

    /// Print per-step details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the archive step was requested.
    pub fn compress_enabled(&self) -> bool {
        is_enabled(self.compress.as_deref())
    }

    /// Compression tier selected by the fast-compile flag.
    pub fn compression(&self) -> CompressionLevel {
        if is_enabled(self.fast_compile.as_deref()) {
            CompressionLevel::Fast
        } else {
            CompressionLevel::Maximum
        }
    }

    /// Validates the raw inputs into bundle settings.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut builder = SettingsBuilder::new()
            .output_directory(&self.output_dir)
            .compress(self.compress_enabled())
            .compression(self.compression())
            .signing_identity(&self.sign_identity);

        if let Some(platform) = &self.platform {
            builder = builder.platform(platform);
        }
        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if let Some(manifest) = &self.info_plist {
            builder = builder.manifest(manifest);
        }
        if let Some(bin_path) = &self.bin_path {
            builder = builder.staging_root(bin_path);
        }
        if let Some(version) = &self.package_version {
            builder = builder.package_version(version);
        }
        for resource in &self.resources {
            builder = builder.resource(resource);
        }

        builder.build()
    }
}

/// Flags arrive as strings from the build environment; only `true`/`1` enable.
fn is_enabled(value: Option<&str>) -> bool {
    matches!(value, Some("true" | "1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Platform;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kodegen_bundler_framework").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_flag_values() {
        assert!(is_enabled(Some("true")));
        assert!(is_enabled(Some("1")));
        assert!(!is_enabled(Some("false")));
        assert!(!is_enabled(Some("0")));
        assert!(!is_enabled(None));
    }

    #[test]
    fn test_compress_forms() {
        let base = [
            "--platform", "osx", "--name", "Foo", "--info-plist", "Info.plist", "--bin-path", "stage",
        ];

        let args = parse(&base);
        assert!(!args.compress_enabled());

        let mut bare = base.to_vec();
        bare.extend(["--package-version", "1.0", "--compress"]);
        assert!(parse(&bare).compress_enabled());

        let mut explicit = base.to_vec();
        explicit.extend(["--compress", "false"]);
        assert!(!parse(&explicit).compress_enabled());
    }

    #[test]
    fn test_settings_from_args() {
        let args = parse(&[
            "--platform",
            "ios",
            "--name",
            "Foo",
            "--info-plist",
            "res/Info.plist",
            "--bin-path",
            "stage",
            "--output-dir",
            "out",
            "--resource",
            "res/LICENSE",
            "--compress",
            "true",
            "--package-version",
            "3.0.1",
            "--fast-compile",
            "1",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.platform(), Platform::Ios);
        assert_eq!(settings.output_directory(), std::path::Path::new("out"));
        assert!(settings.compress());
        assert_eq!(settings.package_version(), Some("3.0.1"));
        assert_eq!(settings.compression(), CompressionLevel::Fast);
        assert_eq!(settings.resources().count(), 2);
    }

    #[test]
    fn test_settings_missing_version() {
        // Clear any ATBUILD_PACKAGE_VERSION picked up from the environment
        let args = Args {
            package_version: None,
            ..parse(&[
                "--platform", "ios", "--name", "Foo", "--info-plist", "Info.plist", "--bin-path", "stage",
                "--compress", "true",
            ])
        };
        assert_eq!(args.settings().unwrap_err(), ConfigError::MissingPackageVersion);
    }
}
