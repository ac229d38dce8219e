use anyhow::Result;
use shgen::{
    args::{self, Args},
    config::Settings,
    error, output, template, trace, GenerationRequest,
};
use std::process::ExitCode;

fn app(args: &Args) -> Result<()> {
    let settings = Settings::from_env(args)?;

    trace!("Scripts dir: {}", settings.scripts_dir().display());
    trace!("Linter: {}", settings.linter().unwrap_or("disabled"));

    let request = GenerationRequest::new(args, &settings)?;

    output::cleanup_on_signal()?;
    shgen::generate(&request, &settings, &template::now())?;

    Ok(())
}

fn main() -> ExitCode {
    let args = match args::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(status) => return ExitCode::from(status),
    };

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
