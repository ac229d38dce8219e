use anyhow::Context;
use derive_builder::Builder;
use directories::UserDirs;
use std::path::{Path, PathBuf};

use crate::args::Args;

/// Number of lines shown by a dry run preview.
pub const PREVIEW_LINES: usize = 20;

/// Linter invoked on generated scripts unless `SHGEN_LINTER` says otherwise.
pub const DEFAULT_LINTER: &str = "shellcheck";

/// Everything the generator needs to know about the environment it runs in.
///
/// Populated once at startup by [`Settings::from_env`] and passed down
/// explicitly. Tests build it through [`Settings::builder`] instead.
#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct Settings {
    user_home: PathBuf,
    scripts_dir: PathBuf,
    user: String,
    #[builder(default)]
    linter: Option<String>,
    #[builder(default)]
    clipboard: bool,
    #[builder(default = "PREVIEW_LINES")]
    preview_lines: usize,
    #[builder(default)]
    assume_yes: bool,
}

impl Settings {
    /// Create a new [`Settings`] builder
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::create_empty()
    }

    /// Build the settings for this invocation from the environment and the
    /// flags that toggle external collaborators.
    ///
    /// Looks for the scripts directory, in order:
    /// - `$SHGEN_SCRIPTS_DIR`
    /// - `~/scripts`
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the user's home directory can not be found
    pub fn from_env(args: &Args) -> anyhow::Result<Self> {
        let home = Self::get_user_home()?;
        let scripts_dir = std::env::var_os("SHGEN_SCRIPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join("scripts"));

        let linter = (!args.no_lint).then(|| {
            std::env::var("SHGEN_LINTER").unwrap_or_else(|_| DEFAULT_LINTER.to_string())
        });

        Self::builder()
            .user_home(home)
            .scripts_dir(scripts_dir)
            .user(Self::get_user())
            .linter(linter)
            .clipboard(!args.no_clipboard)
            .assume_yes(args.yes)
            .build()
            .context("Failed to assemble settings")
    }

    /// Returns the path for the user home `~/`
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the users home can not
    /// be found
    pub fn get_user_home() -> anyhow::Result<PathBuf> {
        Ok(UserDirs::new()
            .context("Failed to get user's home directory")?
            .home_dir()
            .to_owned())
    }

    /// Returns the login name of the current user, `unknown` when neither
    /// `$USER` nor `$LOGNAME` is set.
    #[must_use]
    pub fn get_user() -> String {
        ["USER", "LOGNAME"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|user| !user.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Where a script called `name` ends up when no `--output` is given.
    #[must_use]
    pub fn default_output(&self, name: &str) -> PathBuf {
        self.scripts_dir.join(format!("{name}.sh"))
    }

    /// Replaces the home directory prefix of `path` with `~` for display.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.user_home) {
            Ok(rest) if !self.user_home.as_os_str().is_empty() => {
                format!("~/{}", rest.display())
            }
            _ => path.display().to_string(),
        }
    }

    #[must_use]
    pub fn user_home(&self) -> &Path {
        self.user_home.as_path()
    }

    #[must_use]
    pub fn scripts_dir(&self) -> &Path {
        self.scripts_dir.as_path()
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn linter(&self) -> Option<&str> {
        self.linter.as_deref()
    }

    #[must_use]
    pub fn clipboard(&self) -> bool {
        self.clipboard
    }

    #[must_use]
    pub fn preview_lines(&self) -> usize {
        self.preview_lines
    }

    #[must_use]
    pub fn assume_yes(&self) -> bool {
        self.assume_yes
    }
}
