//! Code signing of the assembled framework.

use crate::bundler::{
    error::{Error, Result},
    tools,
};
use std::{ffi::OsString, future::Future, path::Path};

/// Signs a directory in place.
pub trait CodeSigner {
    /// Signs `path`. Any failure is fatal for the run.
    fn sign(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// `codesign` invoked with a fixed identity and no secure timestamp.
#[derive(Clone, Debug)]
pub struct Codesign {
    identity: String,
}

impl Codesign {
    /// Signer using `identity` (`-` for ad-hoc).
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }

    /// Signing identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Arguments passed to `codesign` for `path`.
    pub fn args(&self, path: &Path) -> Vec<OsString> {
        vec![
            "--force".into(),
            "--deep".into(),
            "--sign".into(),
            self.identity.clone().into(),
            "--timestamp=none".into(),
            path.into(),
        ]
    }
}

impl Default for Codesign {
    fn default() -> Self {
        Self::new(crate::bundler::settings::AD_HOC_IDENTITY)
    }
}

impl CodeSigner for Codesign {
    async fn sign(&self, path: &Path) -> Result<()> {
        let tool = tools::require(tools::CODESIGN)?;

        log::info!("Signing {} with identity '{}'", path.display(), self.identity);

        let output = tokio::process::Command::new(&tool)
            .args(self.args(path))
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: tools::CODESIGN.to_string(),
                error,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Sign {
                path: path.to_path_buf(),
                message: format!("codesign exited with {}: {}", output.status, stderr.trim()),
            });
        }

        log::info!("✓ Successfully signed {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_hoc_args() {
        let args = Codesign::default().args(Path::new("bin/Foo.framework/Versions/A"));
        assert_eq!(
            args,
            [
                "--force",
                "--deep",
                "--sign",
                "-",
                "--timestamp=none",
                "bin/Foo.framework/Versions/A"
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_identity_args() {
        let signer = Codesign::new("Developer ID Application: Example (TEAMID)");
        let args = signer.args(Path::new("x"));
        assert_eq!(args[3], "Developer ID Application: Example (TEAMID)");
    }
}
