use anyhow::Context;
use std::{io::ErrorKind, path::Path, process::Command};

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The linter accepted the script.
    Passed,
    /// The linter rejected the script, with everything it printed.
    Failed(String),
    /// The linter is not installed.
    Unavailable,
}

/// Runs `program <path>` and classifies the result.
///
/// # Errors
///
/// Returns an [`Err`] if the linter exists but could not be started
pub fn check(program: &str, path: &Path) -> anyhow::Result<Outcome> {
    crate::trace!("Running {program} {}", path.display());

    let output = match Command::new(program).arg(path).output() {
        Ok(output) => output,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Outcome::Unavailable),
        Err(err) => return Err(err).with_context(|| format!("Failed to run {program}")),
    };

    if output.status.success() {
        return Ok(Outcome::Passed);
    }

    let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
    report.push_str(&String::from_utf8_lossy(&output.stderr));

    if report.trim().is_empty() {
        report = format!("{program} exited with {}", output.status);
    }

    Ok(Outcome::Failed(report.trim_end().to_string()))
}

/// Validates `path` with the configured linter. Only a failed check the user
/// declines to continue past is an error.
///
/// # Errors
///
/// Returns an [`Err`] if the user declines to continue, the prompt is
/// interrupted, or the linter could not be started
pub fn advise(program: &str, path: &Path, assume_yes: bool) -> anyhow::Result<()> {
    match check(program, path)? {
        Outcome::Passed => {
            crate::info!("{program} found no problems");
            Ok(())
        }
        Outcome::Unavailable => {
            crate::warn!("{program} is not installed, skipping validation");
            Ok(())
        }
        Outcome::Failed(report) => {
            crate::warn!("{program} reported problems:\n{report}");

            if assume_yes {
                crate::info!("Continuing anyway (--yes)");
                return Ok(());
            }

            let proceed = inquire::Confirm::new("Continue with the generated script anyway?")
                .with_default(false)
                .prompt()
                .context("Failed to read confirmation")?;

            anyhow::ensure!(proceed, "Aborted after {program} reported problems");
            Ok(())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;

    fn script(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_linter_is_unavailable() {
        let file = script("echo hi\n");

        assert_eq!(
            check("shgen-no-such-linter", file.path()).unwrap(),
            Outcome::Unavailable
        );
    }

    #[test]
    fn missing_linter_does_not_abort() {
        let file = script("echo hi\n");

        assert!(advise("shgen-no-such-linter", file.path(), false).is_ok());
    }

    #[test]
    fn zero_exit_passes() {
        let file = script("echo hi\n");

        assert_eq!(check("true", file.path()).unwrap(), Outcome::Passed);
    }

    #[test]
    fn nonzero_exit_fails_with_output() {
        let file = script("echo 'SC2086: quote this'\nexit 3\n");

        assert_eq!(
            check("sh", file.path()).unwrap(),
            Outcome::Failed("SC2086: quote this".into())
        );
    }

    #[test]
    fn silent_failure_reports_exit_status() {
        let file = script("echo hi\n");
        let outcome = check("false", file.path()).unwrap();

        assert!(matches!(outcome, Outcome::Failed(ref r) if r.contains("exited with")));
    }

    #[test]
    fn failed_check_continues_with_assume_yes() {
        let file = script("echo hi\n");

        assert!(advise("false", file.path(), true).is_ok());
    }
}
