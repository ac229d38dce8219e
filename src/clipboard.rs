use anyhow::{anyhow, bail, Context};
use std::{
    io::{ErrorKind, Write},
    process::{Command, Stdio},
};

/// Characters of the copied text echoed back to the user.
pub const ECHO_LIMIT: usize = 80;

/// Clipboard utilities tried in order, with the arguments that make them read
/// stdin into the clipboard.
pub const UTILITIES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Pipes `text` into `program`.
///
/// Returns `Ok(false)` when the program is not installed.
fn pipe_into(program: &str, args: &[&str], text: &str) -> anyhow::Result<bool> {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err).with_context(|| format!("Failed to start {program}")),
    };

    child
        .stdin
        .take()
        .ok_or(anyhow!("No stdin for {program}"))?
        .write_all(text.as_bytes())
        .with_context(|| format!("Failed to write to {program}"))?;

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for {program}"))?;

    if !status.success() {
        bail!("{program} exited with {status}");
    }

    Ok(true)
}

/// Copies `text` with the first utility in `utilities` that is installed and
/// succeeds, and returns its name. A utility that fails (for example
/// `wl-copy` without a Wayland display) falls through to the next one.
///
/// # Errors
///
/// Returns an [`Err`] if none is installed or every installed one fails
pub fn publish_with(utilities: &[(&'static str, &[&str])], text: &str) -> anyhow::Result<&'static str> {
    let mut failures = Vec::new();

    for &(program, args) in utilities {
        match pipe_into(program, args, text) {
            Ok(true) => {
                crate::trace!("Copied {} bytes with {program}", text.len());
                return Ok(program);
            }
            Ok(false) => crate::trace!("{program} is not installed"),
            Err(err) => {
                crate::trace!("{program} failed: {err:#}");
                failures.push(format!("{err:#}"));
            }
        }
    }

    if failures.is_empty() {
        bail!(
            "no clipboard utility found (tried {})",
            utilities
                .iter()
                .map(|(p, _)| *p)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    bail!("every clipboard utility failed: {}", failures.join("; "))
}

/// Copies `text` to the system clipboard.
///
/// # Errors
///
/// Returns an [`Err`] if no clipboard utility is installed or all of them fail
pub fn publish(text: &str) -> anyhow::Result<&'static str> {
    publish_with(UTILITIES, text)
}

/// The start of `text` on a single line, cut at [`ECHO_LIMIT`] characters.
#[must_use]
pub fn echo(text: &str) -> String {
    let mut chars = text.chars().map(|c| if c == '\n' { ' ' } else { c });
    let mut echoed: String = chars.by_ref().take(ECHO_LIMIT).collect();

    if chars.next().is_some() {
        echoed.push_str("...");
    }

    echoed
}

/// Best effort copy of the generated script, warns instead of failing.
pub fn offer(text: &str) {
    match publish(text) {
        Ok(program) => crate::info!("Copied to clipboard via {program}: {}", echo(text)),
        Err(err) => crate::warn!("Could not copy to clipboard: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_echoed_whole() {
        assert_eq!(echo("#!/usr/bin/env bash\n#\n"), "#!/usr/bin/env bash # ");
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        let text = "é".repeat(200);
        let echoed = echo(&text);

        assert_eq!(echoed.chars().count(), ECHO_LIMIT + 3);
        assert!(echoed.ends_with("..."));
        assert_eq!(echo(&"x".repeat(ECHO_LIMIT)), "x".repeat(ECHO_LIMIT));
    }

    #[test]
    fn no_utility_is_an_error_naming_candidates() {
        let err = publish_with(&[("shgen-no-such-clip", &[])], "hi").unwrap_err();

        assert!(err.to_string().contains("shgen-no-such-clip"));
    }

    #[cfg(unix)]
    #[test]
    fn first_installed_utility_wins() {
        let used = publish_with(&[("shgen-no-such-clip", &[]), ("cat", &[])], "hi").unwrap();

        assert_eq!(used, "cat");
    }

    #[cfg(unix)]
    #[test]
    fn failing_utility_falls_through_to_the_next() {
        let used = publish_with(
            &[("false", &[]), ("shgen-no-such-clip", &[]), ("cat", &[])],
            "hi",
        )
        .unwrap();

        assert_eq!(used, "cat");
    }

    #[cfg(unix)]
    #[test]
    fn all_failing_utilities_is_an_error() {
        let err = publish_with(&[("false", &[]), ("shgen-no-such-clip", &[])], "hi").unwrap_err();

        assert!(err.to_string().contains("every clipboard utility failed"));
        assert!(err.to_string().contains("false"));
    }
}
