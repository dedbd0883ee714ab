mod cli;

use std::fmt::Display;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use firstfollow::parser::LoadErrors;
use firstfollow::writer::WriteError;
use firstfollow::{analysis, parser, writer};

#[derive(Debug)]
enum RunError {
    Load(LoadErrors),
    Write(WriteError),
}

impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Load(errors) => {
                for error in errors {
                    writeln!(f, "{}", error)?;
                }
                Ok(())
            }
            RunError::Write(error) => writeln!(f, "{}", error),
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None);

    let level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Warn),
        2 => Some(LevelFilter::Info),
        3 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }

    builder.init();
}

fn run(cli: &cli::Cli) -> Result<(), RunError> {
    let grammar = parser::parse_file(&cli.grammar, cli.start).map_err(RunError::Load)?;
    let analysis = analysis::analyze(&grammar);
    writer::write_report(&cli.output, &grammar, &analysis).map_err(RunError::Write)
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Analysis of {} failed", cli.grammar.display());
            eprint!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("firstfollow-main-{}-{}", std::process::id(), name))
    }

    fn cli(grammar: &str, output: &PathBuf) -> cli::Cli {
        cli::Cli {
            grammar: PathBuf::from(grammar),
            output: output.clone(),
            start: 'S',
            verbose: 0
        }
    }

    #[test]
    fn run_expression_grammar() {
        let output = temp_path("expression.txt");
        run(&cli("example_data/expression.cfg", &output)).unwrap();

        let report = std::fs::read_to_string(&output).unwrap();
        std::fs::remove_file(&output).unwrap();

        assert_eq!(report, [
            "S'", "(, i, $$", "",
            "E", "(, i", "), $$",
            "F", "(, i", "), *, +, $$",
            "S", "(, i", "$$",
            "T", "(, i", "), +, $$",
            "X", "+", "), $$",
            "Y", "*", "), +, $$",
        ].map(|line| format!("{}\n", line)).concat());
    }

    #[test]
    fn run_left_recursive_grammar() {
        let output = temp_path("left_recursive.txt");
        run(&cli("example_data/left_recursive.cfg", &output)).unwrap();

        let report = std::fs::read_to_string(&output).unwrap();
        std::fs::remove_file(&output).unwrap();

        assert_eq!(report, "S'\nb, $$\n\nS\nb\na, $$\n");
    }

    #[test]
    fn run_malformed_grammar_writes_nothing() {
        let output = temp_path("malformed.txt");
        let error = run(&cli("example_data/malformed.cfg", &output)).unwrap_err();

        assert!(matches!(error, RunError::Load(ref errors) if errors.len() == 3));
        assert!(!output.exists());
    }

    #[test]
    fn run_missing_grammar() {
        let output = temp_path("missing.txt");
        let error = run(&cli("example_data/does_not_exist.cfg", &output)).unwrap_err();

        assert!(error.to_string().contains("Grammar file not found"));
    }
}
