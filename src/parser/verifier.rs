use std::collections::HashSet;

use itertools::Itertools;
use log::warn;

use super::{Location, Rule};
use crate::grammar::{Nonterminal, Symbol};

// A nonterminal used on the right-hand side of a rule but never defined
#[derive(Debug, PartialEq)]
pub struct Undefined {
    pub nonterminal: char,
    pub location: Location
}

pub fn get_undefined_symbols(rules: &[Rule]) -> Vec<Undefined> {
    let defined: HashSet<char> = rules.iter().map(|rule| rule.lhs).collect();

    // Filter out everything but nonterminals, then keep the first use of each
    // undefined one
    rules.iter()
        .flat_map(|rule| rule.rhs.iter().map(move |symbol| (symbol, &rule.location)))
        .filter_map(|(symbol, location)| match symbol {
            Symbol::Nonterminal(Nonterminal::Named(c)) if !defined.contains(c) => Some(Undefined {
                nonterminal: *c,
                location: location.clone()
            }),
            _ => None
        })
        .unique_by(|undefined| undefined.nonterminal)
        .collect()
}

// Undefined nonterminals are legal, they just never derive anything. Report
// them without failing the load.
pub fn verify_rules(rules: &[Rule], start: char, file: &Location) {
    for undefined in get_undefined_symbols(rules) {
        warn!("[{}] No productions for nonterminal `{}`", undefined.location, undefined.nonterminal);
    }

    if !rules.iter().any(|rule| rule.lhs == start) {
        warn!("[{}] No productions for start symbol `{}`", file, start);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn rule(lhs: char, rhs: Vec<Symbol>, line: usize) -> Rule {
        Rule {
            lhs,
            rhs,
            location: Location { file: PathBuf::from("test.cfg"), line }
        }
    }

    fn n(c: char) -> Symbol {
        Symbol::Nonterminal(Nonterminal::Named(c))
    }

    #[test]
    fn undefined_symbols_found() {
        let rules = vec![
            rule('S', vec![n('A'), n('U'), Symbol::Terminal('u'), n('U')], 1),
            rule('A', vec![n('S'), n('U')], 2),
            rule('A', vec![n('V')], 3)
        ];

        assert_eq!(get_undefined_symbols(&rules), vec![
            Undefined {
                nonterminal: 'U',
                location: Location { file: PathBuf::from("test.cfg"), line: 1 }
            },
            Undefined {
                nonterminal: 'V',
                location: Location { file: PathBuf::from("test.cfg"), line: 3 }
            }
        ]);
    }

    #[test]
    fn defined_symbols_pass() {
        let rules = vec![rule('S', vec![n('S'), Symbol::Terminal('a')], 1), rule('S', vec![], 2)];

        assert!(get_undefined_symbols(&rules).is_empty());
    }
}
