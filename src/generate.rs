use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{clipboard, config::Settings, lint, output, request::GenerationRequest, template};

/// Result of one generation.
#[derive(Debug)]
pub struct Generated {
    pub script: String,
    /// Where the script was written, `None` for a dry run.
    pub written: Option<PathBuf>,
}

/// Renders, validates and writes (or previews) the script described by
/// `request`, then offers it to the clipboard.
///
/// # Errors
///
/// Returns an [`Err`] if rendering, staging or writing fails, or the user
/// declines to continue after a failed lint
pub fn generate(
    request: &GenerationRequest,
    settings: &Settings,
    timestamp: &str,
) -> Result<Generated> {
    let script = template::render(request, timestamp)?;
    let staged = output::stage(&script)?;

    if let Some(linter) = settings.linter() {
        lint::advise(linter, staged.path(), settings.assume_yes())?;
    }

    let destination = settings.display_path(&request.output_path);

    let written = if request.dry_run {
        crate::info!("Dry run, nothing will be written");
        output::preview(
            std::io::stdout().lock(),
            &destination,
            &script,
            settings.preview_lines(),
        )
        .context("Failed to print preview")?;

        None
    } else {
        let path = output::install(staged.path(), &request.output_path)?;
        crate::info!("Created {destination}");

        Some(path)
    };

    drop(staged);

    if settings.clipboard() {
        clipboard::offer(&script);
    }

    Ok(Generated { script, written })
}
