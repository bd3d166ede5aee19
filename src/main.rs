use clap::Parser;
use extidy::cli::{Session, TerminalPrompt, program_dir, run_menu};
use extidy::file_organizer::Organizer;
use extidy::filters::ExclusionFilter;
use extidy::logging::{DEFAULT_LOG_DIR, RunLogger};
use extidy::output::OutputFormatter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Interactively sort files into extension folders such as Images/JPG.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory where the per-run log file is written
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let logger = match RunLogger::create(&args.log_dir) {
        Ok(logger) => logger,
        Err(e) => {
            OutputFormatter::error(&format!(
                "Could not create log file in {}: {}",
                args.log_dir.display(),
                e
            ));
            return ExitCode::FAILURE;
        }
    };

    let session = Session {
        organizer: Organizer::new(ExclusionFilter::for_current_exe()),
        logger,
        program_dir: program_dir(),
    };

    if let Err(e) = run_menu(&mut TerminalPrompt::new(), &session) {
        OutputFormatter::error(&e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
