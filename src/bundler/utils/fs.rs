//! File system utilities for bundling.
//!
//! Every helper attaches the failing path to its error. The few failures
//! that are tolerated are spelled out as predicates instead of being
//! swallowed wholesale:
//!
//! - [`remove_dir_all`]: the directory not existing ([`is_absent`])
//! - [`ensure_dir`]: the directory already existing ([`is_existing_dir`])

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    layout::Symlink,
};
use std::{io, path::Path};
use tokio::fs;

/// Removal of a path that is not there.
pub fn is_absent(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::NotFound
}

/// Creation of a directory that is already there as a directory.
pub fn is_existing_dir(error: &io::Error, path: &Path) -> bool {
    error.kind() == io::ErrorKind::AlreadyExists && path.is_dir()
}

/// Removes the directory and its contents. A missing directory is not an error.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if is_absent(&e) => Ok(()),
        Err(e) => Err(Error::Fs {
            context: "failed to remove",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }
    fs::create_dir_all(path)
        .await
        .fs_context("failed to create directory", path)
}

/// Creates a single directory (parents included), tolerating one that
/// already exists.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path).await {
        Ok(()) => Ok(()),
        Err(e) if is_existing_dir(&e, path) => Ok(()),
        Err(e) if is_absent(&e) => create_dir_all(path, false).await,
        Err(e) => Err(Error::Fs {
            context: "failed to create directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("failed to create directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("failed to copy", from)?;
    Ok(())
}

/// Copies `from` to `to` if `from` is a file. Returns whether a copy happened.
pub async fn copy_file_if_exists(from: &Path, to: &Path) -> Result<bool> {
    if !from.is_file() {
        return Ok(false);
    }
    copy_file(from, to).await?;
    Ok(true)
}

/// Creates a relative symlink as described by `link`.
pub async fn create_symlink(link: &Symlink) -> Result<()> {
    log::debug!("Linking {} -> {}", link.link.display(), link.target.display());
    let (target, path) = (link.target.clone(), link.link.clone());
    tokio::task::spawn_blocking(move || symlink(&target, &path))
        .await
        .map_err(|e| Error::GenericError(format!("symlink task panicked: {e}")))?
        .fs_context("failed to create symlink", &link.link)
}

/// Makes a symbolic link.
#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Makes a symbolic link; directory targets are resolved against the link's parent.
#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link.parent().map(|p| p.join(target));
    if resolved.is_some_and(|p| p.is_dir()) {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_remove_missing_dir_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        remove_dir_all(&tmp.path().join("nope")).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_file_in_place_of_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file");
        std::fs::write(&file, b"x").unwrap();

        let err = remove_dir_all(&file).await.unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
    }

    #[tokio::test]
    async fn test_ensure_dir_tolerates_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a/b");

        ensure_dir(&dir).await.unwrap();
        ensure_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_dir_rejects_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Resources");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_dir(&file).await.unwrap_err();
        assert!(err.to_string().contains("Resources"));
    }

    #[tokio::test]
    async fn test_copy_file_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(&tmp.path().join("missing"), &tmp.path().join("out"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_copy_file_if_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("nested/dst.txt");

        assert!(!copy_file_if_exists(&src, &dst).await.unwrap());
        assert!(!dst.exists());

        std::fs::write(&src, b"payload").unwrap();
        assert!(copy_file_if_exists(&src, &dst).await.unwrap());
        assert_eq!(std::fs::read(&dst).unwrap(), b"payload");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_create_symlink_relative() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("A")).unwrap();

        let link = Symlink {
            link: tmp.path().join("Current"),
            target: PathBuf::from("A"),
        };
        create_symlink(&link).await.unwrap();

        assert_eq!(std::fs::read_link(&link.link).unwrap(), Path::new("A"));
        assert!(link.link.is_dir());
    }
}
