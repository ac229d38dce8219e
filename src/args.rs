use std::{ffi::OsString, path::PathBuf};

pub use clap::Parser;

/// Generate a boilerplate shell script with logging, traps and argument checks
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Name of the script. Characters outside [A-Za-z0-9_-] are removed
    #[clap(long, short, required = true)]
    pub name: String,

    /// One line description placed in the script header
    #[clap(long, short)]
    pub description: Option<String>,

    /// Author placed in the script header [default: current user]
    #[clap(long, short)]
    pub author: Option<String>,

    /// Preview the script instead of writing it
    #[clap(long)]
    pub dry_run: bool,

    /// Where to write the script [default: ~/scripts/NAME.sh]
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Do not run the linter on the generated script
    #[clap(long)]
    pub no_lint: bool,

    /// Do not copy the generated script to the clipboard
    #[clap(long)]
    pub no_clipboard: bool,

    /// Continue without asking when the linter reports problems
    #[clap(long, short)]
    pub yes: bool,
}

/// Exit status for a clap error: 0 for help and version, 1 for anything
/// else.
#[must_use]
pub fn exit_status(err: &clap::Error) -> u8 {
    u8::from(err.exit_code() != 0)
}

/// Parses `argv`, printing clap's message and returning the exit status when
/// nothing should be generated.
pub fn parse_args<I, T>(argv: I) -> Result<Args, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).map_err(|err| {
        let _ = err.print();
        exit_status(&err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "shgen",
            "-n",
            "backup_tool",
            "--description",
            "System backup utility",
            "-a",
            "alice",
            "--dry-run",
            "-o",
            "/tmp/out.sh",
            "--no-lint",
            "--no-clipboard",
            "-y",
        ])
        .unwrap();

        assert_eq!(args.name, "backup_tool");
        assert_eq!(args.description.as_deref(), Some("System backup utility"));
        assert_eq!(args.author.as_deref(), Some("alice"));
        assert!(args.dry_run);
        assert_eq!(args.output, Some(PathBuf::from("/tmp/out.sh")));
        assert!(args.no_lint);
        assert!(args.no_clipboard);
        assert!(args.yes);
    }

    #[test]
    fn optional_flags_default_off() {
        let args = Args::try_parse_from(["shgen", "--name", "x"]).unwrap();

        assert_eq!(args.description, None);
        assert_eq!(args.author, None);
        assert_eq!(args.output, None);
        assert!(!args.dry_run);
        assert!(!args.yes);
    }

    #[test]
    fn missing_name_is_an_error() {
        let err = Args::try_parse_from(["shgen", "--dry-run"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("--name"));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = Args::try_parse_from(["shgen", "-n", "x", "--frobnicate"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Args::try_parse_from(["shgen", "--help"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn help_and_version_exit_zero() {
        assert_eq!(parse_args(["shgen", "--help"]).unwrap_err(), 0);
        assert_eq!(parse_args(["shgen", "-h"]).unwrap_err(), 0);
        assert_eq!(parse_args(["shgen", "--version"]).unwrap_err(), 0);
    }

    #[test]
    fn usage_errors_exit_one() {
        assert_eq!(parse_args(["shgen"]).unwrap_err(), 1);
        assert_eq!(parse_args(["shgen", "--dry-run"]).unwrap_err(), 1);
        assert_eq!(parse_args(["shgen", "-n", "x", "--frobnicate"]).unwrap_err(), 1);
        assert_eq!(parse_args(["shgen", "-n"]).unwrap_err(), 1);
    }

    #[test]
    fn valid_arguments_parse() {
        let args = parse_args(["shgen", "-n", "backup_tool"]).unwrap();

        assert_eq!(args.name, "backup_tool");
    }
}
