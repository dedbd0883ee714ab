/*
    This module writes FIRST and FOLLOW sets out in the report format
*/

use std::fmt::Display;
use std::path::Path;

use itertools::Itertools;
use log::info;

use crate::analysis::{Analysis, SymbolSet};
use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug)]
pub enum WriteErrorType {
    // The output file could not be created or written
    OutputWriteFailure(std::io::Error),
}

impl ErrorType for WriteErrorType {}

impl PartialEq for WriteErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (WriteErrorType::OutputWriteFailure(a), WriteErrorType::OutputWriteFailure(b)) => a.kind() == b.kind(),
        }
    }
}

impl Display for WriteErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteErrorType::OutputWriteFailure(e) => write!(f, "Could not write output: {}", e),
        }
    }
}

pub type WriteError = Error<WriteErrorType>;

// Terminals in ascending order, `$$` last, `Epsilon` left out
fn render_set(set: Option<&SymbolSet>) -> String {
    set.into_iter()
        .flatten()
        .filter(|symbol| **symbol != Symbol::Epsilon)
        .join(", ")
}

// The whole report: per nonterminal its name, FIRST set and FOLLOW set on
// three lines, `S'` first and the rest in ascending order
pub struct Report<'a> {
    pub grammar: &'a Grammar,
    pub analysis: &'a Analysis,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for nonterminal in self.grammar.nonterminals() {
            writeln!(f, "{}", nonterminal)?;
            writeln!(f, "{}", render_set(self.analysis.first.get(nonterminal)))?;
            writeln!(f, "{}", render_set(self.analysis.follow.get(nonterminal)))?;
        }
        Ok(())
    }
}

pub fn render(grammar: &Grammar, analysis: &Analysis) -> String {
    Report { grammar, analysis }.to_string()
}

// The report is rendered completely before the file is touched
pub fn write_report(path: &Path, grammar: &Grammar, analysis: &Analysis) -> Result<(), WriteError> {
    let report = render(grammar, analysis);

    std::fs::write(path, report).map_err(|e| WriteError {
        location: Location::file(path.to_path_buf()),
        error: WriteErrorType::OutputWriteFailure(e)
    })?;

    info!("Wrote FIRST and FOLLOW sets to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::analysis::analyze;

    fn t(c: char) -> Symbol {
        Symbol::Terminal(c)
    }

    fn n(c: char) -> Symbol {
        Symbol::Nonterminal(Nonterminal::Named(c))
    }

    fn nullable_grammar() -> Grammar {
        Grammar::new('S', vec![
            ('S', vec![n('A'), n('B')]),
            ('A', vec![t('a')]),
            ('A', vec![]),
            ('B', vec![t('b')]),
        ])
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("firstfollow-{}-{}", std::process::id(), name))
    }

    #[test]
    fn render_nullable_grammar() {
        let grammar = nullable_grammar();
        let report = render(&grammar, &analyze(&grammar));

        assert_eq!(report, "S'\na, b, $$\n\nA\na\nb\nB\nb\n$$\nS\na, b\n$$\n");
    }

    #[test]
    fn render_orders_terminals() {
        let grammar = Grammar::new('S', vec![
            ('S', vec![n('A'), t('z')]),
            ('S', vec![t('c')]),
            ('S', vec![t('+')]),
            ('A', vec![]),
        ]);
        let report = render(&grammar, &analyze(&grammar));

        assert_eq!(report, "S'\n+, c, z, $$\n\nA\n\nz\nS\n+, c, z\n$$\n");
    }

    #[test]
    fn render_undefined_nonterminal_as_blank() {
        let grammar = Grammar::new('S', vec![('S', vec![t('a'), n('U')])]);
        let report = render(&grammar, &analyze(&grammar));

        assert_eq!(report, "S'\na, $$\n\nS\na\n$$\nU\n\n$$\n");
    }

    #[test]
    fn write_and_read_back() {
        let grammar = nullable_grammar();
        let analysis = analyze(&grammar);
        let path = temp_path("write_and_read_back.txt");

        write_report(&path, &grammar, &analysis).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), render(&grammar, &analysis));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn write_to_missing_directory() {
        let grammar = nullable_grammar();
        let path = temp_path("missing-dir").join("report.txt");

        let error = write_report(&path, &grammar, &analyze(&grammar)).unwrap_err();

        assert_eq!(error, WriteError {
            location: Location::file(path),
            error: WriteErrorType::OutputWriteFailure(std::io::ErrorKind::NotFound.into())
        });
    }
}
