/*
    This module parses grammar files
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};

use crate::error_handling::*;
use crate::grammar::*;
use lexer::*;
use verifier::verify_rules;

// Editors may save files with a leading byte order mark
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug)]
pub enum LoadErrorType {
    // The grammar file does not exist
    FileNotFound,
    // A line which should contain a production has no `->`
    MissingArrow,
    // A production has more than one `->`
    UnexpectedArrow,
    // The line starts with something other than a nonterminal
    MissingNonterminal,
    // More than one symbol in front of the `->`
    LongLeftHandSide,
    // A character that cannot be a grammar symbol
    UnexpectedCharacter(char),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadErrorType::FileError(a), LoadErrorType::FileError(b)) => a.kind() == b.kind(),
            (LoadErrorType::UnexpectedCharacter(a), LoadErrorType::UnexpectedCharacter(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::FileNotFound => write!(f, "Grammar file not found"),
            LoadErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            LoadErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            LoadErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            LoadErrorType::LongLeftHandSide => write!(f, "Left hand side must be a single nonterminal"),
            LoadErrorType::UnexpectedCharacter(c) => write!(f, "Unexpected character {:?}", c),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

fn io_error(error: std::io::Error, location: Location) -> LoadError {
    let error = match error.kind() {
        std::io::ErrorKind::NotFound => LoadErrorType::FileNotFound,
        _ => LoadErrorType::FileError(error),
    };
    LoadError { location, error }
}

pub type Result<T> = std::result::Result<T, LoadErrorType>;
pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

#[derive(PartialEq, Debug)]
pub struct Rule {
    lhs: char,
    rhs: Production,
    location: Location
}

fn parse_rhs(tokens: &[Token]) -> Result<Production> {
    tokens.iter().map(|t| match t {
        Token::Arrow => Err(LoadErrorType::UnexpectedArrow),
        Token::Nonterminal(c) => Ok(Symbol::Nonterminal(Nonterminal::Named(*c))),
        Token::Terminal(c) => Ok(Symbol::Terminal(*c)),
        Token::Epsilon => Ok(Symbol::Epsilon)
    }).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let lhs = match tokens.first() {
        Some(Token::Nonterminal(c)) => Ok(*c),
        _ => Err(LoadErrorType::MissingNonterminal)
    }?;

    match tokens.get(1) {
        Some(Token::Arrow) => (),
        Some(_) if tokens.contains(&Token::Arrow) => return Err(LoadErrorType::LongLeftHandSide),
        _ => return Err(LoadErrorType::MissingArrow)
    }

    let rhs = parse_rhs(&tokens[2..])?;

    Ok(Rule {
        lhs,
        rhs,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| LoadError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start_matches(BYTE_ORDER_MARK).trim();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a file, enumerated from 1 and with
// the io errors wrapped in LoadError at their line
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .enumerate()
        .map(move |(num, line)| {
            let location = Location { file: path.to_path_buf(), line: num + 1 };
            (num + 1, line.map_err(|e| io_error(e, location)))
        })
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
}

pub fn parse_file(path: &Path, start: char) -> FileResult<Grammar> {
    info!("Loading grammar from {}", path.display());

    let file = File::open(path).map_err(|e| vec![io_error(e, Location::file(path.to_path_buf()))])?;
    let lines = file_line_nums(file, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    verify_rules(&rules, start, &Location::file(path.to_path_buf()));

    let grammar = Grammar::new(start, rules.into_iter().map(|rule| (rule.lhs, rule.rhs)));
    debug!("Loaded productions:\n{}", grammar);

    Ok(grammar)
}
