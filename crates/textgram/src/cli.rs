//! Command-line checker for compiled grammar files.
//!
//! Reads a JSON rule set, validates it, and reports the first problem found.
//! Set `RUST_LOG=debug` to see progress from the validator.

use facet::Facet;
use std::process::ExitCode;
use textgram::{entry_points, load_rules, GrammarError, RuleSet};

/// Command-line arguments.
#[derive(Debug, Facet)]
struct Args {
    /// Path to the JSON rule set to check.
    #[facet(positional)]
    path: String,

    /// Do not print a summary on success.
    #[facet(named)]
    quiet: bool,
}

fn run(args: &Args) -> Result<RuleSet, GrammarError> {
    let json =
        std::fs::read_to_string(&args.path).map_err(|e| GrammarError::from_io(&args.path, e))?;
    log::debug!("read {} bytes from {}", json.len(), args.path);
    Ok(load_rules(&json)?)
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args: Args = match facet_args::from_std_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(rules) => {
            if !args.quiet {
                println!(
                    "ok: {} rules, entry points: {}",
                    rules.len(),
                    entry_points(&rules).join(", ")
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
