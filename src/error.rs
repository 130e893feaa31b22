//! Top-level error type for the framework packager.
//!
//! Wraps configuration and bundler errors and attaches actionable recovery
//! suggestions for the CLI.

use crate::bundler::{ConfigError, Error as BundlerError};
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, FrameworkError>;

/// Main error type for all packager operations
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// Missing or invalid input
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem or external tool failure while assembling the bundle
    #[error("Bundler error: {0}")]
    Bundler(#[from] BundlerError),

    /// Terminal output errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameworkError {
    /// Whether the run was rejected before touching the filesystem.
    pub fn is_configuration(&self) -> bool {
        match self {
            FrameworkError::Config(_) => true,
            FrameworkError::Bundler(e) => e.is_configuration(),
            FrameworkError::Io(_) => false,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            FrameworkError::Config(e) => config_suggestions(e),
            FrameworkError::Bundler(e) => bundler_suggestions(innermost(e)),
            FrameworkError::Io(_) => vec![],
        }
    }
}

fn innermost(error: &BundlerError) -> &BundlerError {
    match error {
        BundlerError::Context(_, inner) => innermost(inner),
        other => other,
    }
}

fn config_suggestions(error: &ConfigError) -> Vec<String> {
    match error {
        ConfigError::MissingPlatform | ConfigError::UnsupportedPlatform(_) => vec![
            "Pass --platform osx|ios or export ATBUILD_PLATFORM".to_string(),
        ],
        ConfigError::MissingStagingRoot => vec![
            "Pass --bin-path or export ATBUILD_BIN_PATH pointing at the build products".to_string(),
        ],
        ConfigError::MissingPackageVersion => vec![
            "Pass --package-version or export ATBUILD_PACKAGE_VERSION".to_string(),
            "Or run without --compress".to_string(),
        ],
        _ => vec!["Run with --help to see the required options".to_string()],
    }
}

fn bundler_suggestions(error: &BundlerError) -> Vec<String> {
    match error {
        BundlerError::Config(e) => config_suggestions(e),
        BundlerError::ToolNotFound { tool } => vec![format!(
            "Install the Xcode Command Line Tools (xcode-select --install) to get '{tool}'"
        )],
        BundlerError::Fs { .. } | BundlerError::GenericError(_) => vec![
            "Check that the upstream build staged <name>.atbin under --bin-path".to_string(),
        ],
        BundlerError::ResourceConflict { .. } => vec![
            "Rename one of the resources; each must have a unique file name".to_string(),
            "Resources may not share a name with the framework binary, Modules or Info.plist"
                .to_string(),
        ],
        BundlerError::Sign { .. } | BundlerError::Archive { .. } => vec![
            "The partially built bundle was left on disk for inspection".to_string(),
            "Rerun the full packaging step once the tool error is fixed".to_string(),
        ],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Context;

    #[test]
    fn test_config_errors_classified() {
        let err = FrameworkError::from(ConfigError::UnsupportedPlatform("tvos".into()));
        assert!(err.is_configuration());
        assert!(err.to_string().contains("unsupported platform 'tvos'"));
        assert_eq!(err.recovery_suggestions().len(), 1);
    }

    #[test]
    fn test_suggestions_look_through_context() {
        let inner: crate::bundler::Result<()> = Err(BundlerError::ToolNotFound { tool: "codesign" });
        let err = FrameworkError::from(inner.context("signing").unwrap_err());

        assert!(!err.is_configuration());
        let suggestions = err.recovery_suggestions();
        assert!(suggestions[0].contains("codesign"));
    }

    #[test]
    fn test_resource_conflict_suggestions() {
        let err = FrameworkError::from(BundlerError::ResourceConflict {
            resource: "res/Foo".into(),
            existing: "stage/Foo.atbin/Foo.dylib".into(),
            destination: "bin/Foo.framework/Foo".into(),
        });

        assert!(!err.is_configuration());
        assert_eq!(err.recovery_suggestions().len(), 2);
    }
}
