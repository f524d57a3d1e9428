//! All-or-nothing writer.
//!
//! Writing happens in two phases. Every file is first staged next to its
//! target as `<name>.tmp`; only when all stages succeeded are the temp files
//! renamed over the targets. Existing targets are moved aside to
//! `<name>.bak` during the rename phase so a failed rename can restore them.

use crate::types::{FilesError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use twc_codegen::GeneratedCode;

/// Collects generated files and writes them below an output directory.
///
/// # Examples
///
/// ```
/// use twc_files::OutputWriter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let written = OutputWriter::new()
///     .add_file("slackTypes.ts", "export namespace Paths {}")
///     .add_file("typedSlackWebClient.ts", "export class TypedWebClient {}")
///     .write_to(dir.path())
///     .unwrap();
///
/// assert_eq!(written.len(), 2);
/// assert!(dir.path().join("slackTypes.ts").exists());
/// ```
#[derive(Debug, Default)]
pub struct OutputWriter {
    files: Vec<(String, String)>,
}

#[derive(Debug)]
struct Staged {
    temp: PathBuf,
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl OutputWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Creates a writer holding every file of `code`.
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode) -> Self {
        Self {
            files: code
                .files
                .into_iter()
                .map(|file| (file.path, file.content))
                .collect(),
        }
    }

    /// Adds a file at `path`, relative to the output directory.
    #[must_use]
    pub fn add_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Number of files to write.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Writes every file below `base`, overwriting existing files.
    ///
    /// Either all files are replaced or none is: on failure, staged temp
    /// files are removed and targets already replaced are restored.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidPath`] or
    /// [`FilesError::InvalidPathComponent`] before touching the disk if a
    /// path is unusable, and [`FilesError::IoError`] if staging or renaming
    /// fails.
    pub fn write_to(self, base: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let base = base.as_ref();
        let targets = self
            .files
            .iter()
            .map(|(path, _)| resolve(base, path))
            .collect::<Result<Vec<_>>>()?;

        let mut staged = Vec::with_capacity(targets.len());
        for (target, (_, content)) in targets.into_iter().zip(&self.files) {
            match stage(target, content) {
                Ok(stage) => staged.push(stage),
                Err(e) => {
                    discard(&staged);
                    return Err(e);
                }
            }
        }
        tracing::debug!("Staged {} files in {}", staged.len(), base.display());

        for index in 0..staged.len() {
            if let Err(e) = commit(&mut staged[index]) {
                rollback(&staged[..index]);
                discard(&staged[index..]);
                return Err(e);
            }
        }

        for stage in &staged {
            if let Some(backup) = &stage.backup
                && let Err(e) = fs::remove_file(backup)
            {
                tracing::warn!("Failed to remove backup {}: {}", backup.display(), e);
            }
        }

        let written: Vec<PathBuf> = staged.into_iter().map(|stage| stage.target).collect();
        for path in &written {
            tracing::info!("Wrote {}", path.display());
        }
        Ok(written)
    }
}

fn resolve(base: &Path, path: &str) -> Result<PathBuf> {
    let relative = Path::new(path);
    if path.is_empty() || relative.is_absolute() {
        return Err(FilesError::InvalidPath {
            path: path.to_string(),
        });
    }
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return Err(FilesError::InvalidPathComponent {
            path: path.to_string(),
        });
    }
    Ok(base.join(relative))
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

fn stage(target: PathBuf, content: &str) -> Result<Staged> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| FilesError::io(parent, e))?;
    }
    let temp = sibling(&target, ".tmp");
    fs::write(&temp, content).map_err(|e| FilesError::io(&temp, e))?;
    Ok(Staged {
        temp,
        target,
        backup: None,
    })
}

fn commit(stage: &mut Staged) -> Result<()> {
    if stage.target.exists() {
        let backup = sibling(&stage.target, ".bak");
        fs::rename(&stage.target, &backup).map_err(|e| FilesError::io(&stage.target, e))?;
        stage.backup = Some(backup);
    }
    fs::rename(&stage.temp, &stage.target).map_err(|e| FilesError::io(&stage.target, e))?;
    Ok(())
}

/// Restores targets that were already replaced, newest first.
fn rollback(committed: &[Staged]) {
    for stage in committed.iter().rev() {
        let restored = match &stage.backup {
            Some(backup) => fs::rename(backup, &stage.target),
            None => fs::remove_file(&stage.target),
        };
        if let Err(e) = restored {
            tracing::error!("Failed to restore {}: {}", stage.target.display(), e);
        }
    }
}

/// Removes temp files that were never renamed, restoring a moved-aside
/// target if the rename itself failed.
fn discard(pending: &[Staged]) {
    for stage in pending {
        if let Some(backup) = &stage.backup
            && let Err(e) = fs::rename(backup, &stage.target)
        {
            tracing::error!("Failed to restore {}: {}", stage.target.display(), e);
        }
        if stage.temp.exists()
            && let Err(e) = fs::remove_file(&stage.temp)
        {
            tracing::warn!("Failed to remove {}: {}", stage.temp.display(), e);
        }
    }
}
