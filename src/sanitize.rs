use anyhow::ensure;

/// Whether `c` may appear in a script name.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Removes every character outside `[A-Za-z0-9_-]`.
#[must_use]
pub fn strip_name(raw: &str) -> String {
    raw.chars().filter(|&c| is_name_char(c)).collect()
}

/// Sanitizes a script name, refusing names that collapse to nothing.
///
/// # Errors
///
/// Returns an [`Err`] if no allowed character remains after stripping
pub fn script_name(raw: &str) -> anyhow::Result<String> {
    let name = strip_name(raw);

    ensure!(
        !name.is_empty(),
        "name '{}' is empty after removing disallowed characters, use only [A-Za-z0-9_-]",
        raw.escape_default()
    );

    if name != raw {
        crate::trace!("Sanitized name '{raw}' to '{name}'");
    }

    Ok(name)
}

/// Replaces control characters with a space so the value stays on the
/// comment line it is rendered into.
#[must_use]
pub fn comment_text(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Quotes `raw` as a single shell word that expands to exactly `raw`.
#[must_use]
pub fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}
