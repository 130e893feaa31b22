//! Command line interface for kodegen_bundler_framework.
//!
//! Parses arguments, validates them into [`Settings`](crate::bundler::Settings)
//! and drives a single bundling run with user feedback.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{BundledFramework, Bundler};
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Package the framework described by `args`.
///
/// Configuration errors are returned before any file is touched.
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);
    let settings = args.settings()?;

    output.progress(&format!(
        "Packaging {} for {}",
        settings.name(),
        settings.platform()
    ))?;
    output.verbose(&format!(
        "Staging root: {}",
        settings.staging_root().display()
    ))?;

    let framework = Bundler::new(settings).bundle().await?;
    report(&output, &framework)?;

    Ok(0)
}

fn report(output: &OutputManager, framework: &BundledFramework) -> std::io::Result<()> {
    output.verbose(&format!("Binary: {}", framework.binary.display()))?;
    for module in &framework.modules {
        output.verbose(&format!("Module: {}", module.display()))?;
    }
    for resource in &framework.resources {
        output.verbose(&format!("Resource: {}", resource.display()))?;
    }

    output.success(&format!("Signed {}", framework.root.display()))?;

    if let Some(archive) = &framework.archive {
        output.success(&format!(
            "Archived {} ({} bytes)",
            archive.path.display(),
            archive.size
        ))?;
        output.println(&format!("  sha256: {}", archive.checksum))?;
    }

    Ok(())
}
