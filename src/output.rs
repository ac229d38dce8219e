use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use tempfile::NamedTempFile;

/// Exit status used when a signal interrupts generation.
pub const INTERRUPTED: i32 = 130;

/// Staged files still alive, reachable from the signal handler.
static STAGED: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

fn registry() -> MutexGuard<'static, Vec<PathBuf>> {
    STAGED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A staged script. The file is removed when this is dropped, or by the
/// handler from [`cleanup_on_signal`] if the process is interrupted first.
#[derive(Debug)]
pub struct Staged {
    file: NamedTempFile,
}

impl Staged {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        let path = self.file.path();
        registry().retain(|p| p != path);
    }
}

/// Paths of the staged files that have not been dropped yet.
#[must_use]
pub fn staged_paths() -> Vec<PathBuf> {
    registry().clone()
}

/// Removes every staged file. Returns how many were removed.
pub fn remove_staged() -> usize {
    registry()
        .drain(..)
        .filter(|path| fs::remove_file(path).is_ok())
        .count()
}

/// Installs a SIGINT/SIGTERM/SIGHUP handler that removes staged files and
/// exits with [`INTERRUPTED`].
///
/// # Errors
///
/// Returns an [`Err`] if a handler is already installed or the signal
/// handler can not be registered
pub fn cleanup_on_signal() -> Result<()> {
    ctrlc::set_handler(|| {
        let removed = remove_staged();
        crate::trace!("Interrupted, removed {removed} staged file(s)");
        std::process::exit(INTERRUPTED);
    })
    .context("Failed to install signal handler")
}

/// Writes `script` to a temporary file that is removed when the returned
/// handle is dropped.
///
/// # Errors
///
/// Returns an [`Err`] if the temporary file can not be created or written
pub fn stage(script: &str) -> Result<Staged> {
    let file = tempfile::Builder::new()
        .prefix("shgen-")
        .suffix(".sh")
        .tempfile()
        .context("Failed to create temporary file")?;

    registry().push(file.path().to_path_buf());
    let staged = Staged { file };

    write_staged(&staged, script)?;

    crate::trace!("Staged script at {}", staged.path().display());

    Ok(staged)
}

fn write_staged(staged: &Staged, script: &str) -> Result<()> {
    let mut handle = staged.file.as_file();

    handle
        .write_all(script.as_bytes())
        .and_then(|()| handle.flush())
        .with_context(|| format!("Failed to write {}", staged.path().display()))
}

/// Writes the dry run summary: destination, line count and the first
/// `lines` lines of the script.
///
/// # Errors
///
/// Returns an [`Err`] if writing to `out` fails
pub fn preview(
    mut out: impl Write,
    destination: &str,
    script: &str,
    lines: usize,
) -> std::io::Result<()> {
    let total = script.lines().count();

    writeln!(out, "Destination: {destination}")?;
    writeln!(out, "Lines:       {total}")?;
    writeln!(out, "--- first {} lines ---", lines.min(total))?;
    for line in script.lines().take(lines) {
        writeln!(out, "{line}")?;
    }
    if total > lines {
        writeln!(out, "--- {} more lines not shown ---", total - lines)?;
    }

    Ok(())
}

/// Copies the staged script to `destination`, creating missing parent
/// directories, and marks it executable.
///
/// # Errors
///
/// Returns an [`Err`] if any directory, copy or permission operation fails
pub fn install(staged: &Path, destination: &Path) -> Result<PathBuf> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            crate::trace!("Creating {}", parent.display());
            fs_extra::dir::create_all(parent, false)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    fs::copy(staged, destination).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            staged.display(),
            destination.display()
        )
    })?;

    make_executable(destination)?;

    Ok(destination.to_path_buf())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("Failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
