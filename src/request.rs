use std::path::PathBuf;

use crate::{args::Args, config::Settings, sanitize};

/// Text rendered in place of a missing `--description`.
pub const NO_DESCRIPTION: &str = "No description provided";

/// What to generate and where. Built once from the arguments and read
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub name: String,
    pub description: Option<String>,
    pub author: String,
    pub dry_run: bool,
    pub output_path: PathBuf,
}

impl GenerationRequest {
    /// Sanitizes the name and fills in the author and output path defaults
    /// from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the name has no allowed characters
    pub fn new(args: &Args, settings: &Settings) -> anyhow::Result<Self> {
        let name = sanitize::script_name(&args.name)?;
        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| settings.default_output(&name));

        Ok(GenerationRequest {
            description: args.description.clone(),
            author: args
                .author
                .clone()
                .unwrap_or_else(|| settings.user().to_string()),
            dry_run: args.dry_run,
            output_path,
            name,
        })
    }

    /// Description as it goes into the template.
    #[must_use]
    pub fn description_text(&self) -> String {
        sanitize::comment_text(self.description.as_deref().unwrap_or(NO_DESCRIPTION))
    }

    /// Author as it goes into the template.
    #[must_use]
    pub fn author_text(&self) -> String {
        sanitize::comment_text(&self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Parser;

    fn settings() -> Settings {
        Settings::builder()
            .user_home("/home/bob")
            .scripts_dir("/home/bob/scripts")
            .user("bob")
            .build()
            .unwrap()
    }

    fn request(argv: &[&str]) -> anyhow::Result<GenerationRequest> {
        let args = Args::try_parse_from(std::iter::once("shgen").chain(argv.iter().copied()))?;
        GenerationRequest::new(&args, &settings())
    }

    #[test]
    fn defaults_come_from_settings() {
        let req = request(&["-n", "my tool!"]).unwrap();

        assert_eq!(req.name, "mytool");
        assert_eq!(req.author, "bob");
        assert_eq!(req.output_path, PathBuf::from("/home/bob/scripts/mytool.sh"));
        assert_eq!(req.description_text(), NO_DESCRIPTION);
        assert!(!req.dry_run);
    }

    #[test]
    fn explicit_values_win() {
        let req = request(&[
            "-n",
            "backup_tool",
            "-d",
            "System backup utility",
            "-a",
            "alice",
            "-o",
            "/srv/bin/backup",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(req.author, "alice");
        assert_eq!(req.output_path, PathBuf::from("/srv/bin/backup"));
        assert_eq!(req.description_text(), "System backup utility");
        assert!(req.dry_run);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(request(&["-n", "$$$"]).is_err());
    }

    #[test]
    fn comment_fields_are_flattened() {
        let req = request(&["-n", "x", "-d", "two\nlines", "-a", "eve\r"]).unwrap();

        assert_eq!(req.description_text(), "two lines");
        assert_eq!(req.author_text(), "eve ");
    }
}
