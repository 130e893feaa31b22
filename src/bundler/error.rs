//! Error types for framework bundling.
//!
//! Two tiers are kept apart:
//!
//! - [`ConfigError`]: a required input is missing or invalid. Raised by
//!   [`SettingsBuilder::build`](crate::bundler::SettingsBuilder::build) before
//!   anything on disk is touched.
//! - [`Error`]: a filesystem operation or an external tool failed while the
//!   bundle was being assembled.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_framework::bundler::{ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path).fs_context("reading manifest", path)
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::PathBuf,
};
use thiserror::Error as DeriveError;

/// Configuration errors.
///
/// Every variant is detected eagerly, before any directory is created or removed.
#[derive(Debug, Clone, PartialEq, Eq, DeriveError)]
pub enum ConfigError {
    /// No target platform was given.
    #[error("no target platform set (use --platform or $ATBUILD_PLATFORM)")]
    MissingPlatform,

    /// The target platform is not one of the supported values.
    #[error("unsupported platform '{0}' (expected one of: osx, ios)")]
    UnsupportedPlatform(String),

    /// No bundle name was given.
    #[error("no bundle name set (use --name)")]
    MissingName,

    /// The bundle name cannot be used as a file name.
    #[error("invalid bundle name '{0}': must be a single path component")]
    InvalidName(String),

    /// No manifest (Info.plist) path was given.
    #[error("no manifest set (use --info-plist)")]
    MissingManifest,

    /// No staging root was given.
    #[error("no staging root set (use --bin-path or $ATBUILD_BIN_PATH)")]
    MissingStagingRoot,

    /// Compression was requested without a package version.
    #[error("compression requested but no package version set (use --package-version or $ATBUILD_PACKAGE_VERSION)")]
    MissingPackageVersion,
}

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying binary")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// Required external tool is not on `PATH`.
    #[error("required tool '{tool}' not found in PATH")]
    ToolNotFound {
        /// Tool name
        tool: &'static str,
    },

    /// Code signing exited with a non-zero status.
    #[error("failed to sign {path}: {message}")]
    Sign {
        /// Directory that was being signed
        path: PathBuf,
        /// Exit status and captured stderr
        message: String,
    },

    /// Archiver exited with a non-zero status.
    #[error("failed to compress {path}: {message}")]
    Archive {
        /// Archive that was being written
        path: PathBuf,
        /// Exit status and captured stderr
        message: String,
    },

    /// Two inputs would be placed at the same bundle path.
    #[error("{resource} and {existing} would both be placed at {destination}")]
    ResourceConflict {
        /// Resource being placed
        resource: PathBuf,
        /// Input that already owns the destination
        existing: PathBuf,
        /// Contested path inside the bundle
        destination: PathBuf,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Whether this error belongs to the configuration tier.
    ///
    /// Looks through [`Error::Context`] wrappers.
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::Context(_, inner) => inner.is_configuration(),
            _ => false,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with bundler's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying binary".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_configuration() {
        let err: Error = ConfigError::MissingName.into();
        assert!(err.is_configuration());

        let wrapped: Result<()> = Err(err);
        let wrapped = wrapped.context("resolving settings").unwrap_err();
        assert!(wrapped.is_configuration());
    }

    #[test]
    fn test_fs_error_names_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("copying binary", "/tmp/Foo.dylib").unwrap_err();

        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "copying binary /tmp/Foo.dylib: gone");
    }

    #[test]
    fn test_option_context() {
        let missing: Option<u8> = None;
        let err = missing.context("no file name").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "no file name"));
    }
}
