use log::{debug, trace};

use super::{FirstSets, SymbolSet};
use crate::grammar::*;

pub fn solve(grammar: &Grammar) -> FirstSets {
    solve_from(grammar, FirstSets::new())
}

// Compute FIRST starting from an existing mapping. Sets in `first` only
// ever grow, so passing a finished mapping back in returns it unchanged.
pub fn solve_from(grammar: &Grammar, mut first: FirstSets) -> FirstSets {
    for nonterminal in grammar.nonterminals() {
        first.entry(*nonterminal).or_default();
    }

    // Keep sweeping until a whole pass adds nothing.
    for pass in 1.. {
        trace!("FIRST set pass {}", pass);
        let mut changed = false;

        for (lhs, production) in grammar.iter_productions() {
            let contribution = first_of_sequence(production, &first);
            let entry = first.entry(*lhs).or_default();
            let before = entry.len();
            entry.extend(contribution);
            changed |= entry.len() > before;
        }

        if !changed {
            debug!("FIRST sets converged after {} passes", pass);
            break;
        }
    }

    // A non-nullable start symbol stops the scan before the end marker
    first.entry(Nonterminal::Augmented).or_default().insert(Symbol::EndMarker);

    first
}

// FIRST of a single symbol. A terminal or the end marker is its own FIRST
// set, a nonterminal looks up its (possibly partial) entry.
pub fn first_of_symbol(symbol: &Symbol, first: &FirstSets) -> SymbolSet {
    match symbol {
        Symbol::Nonterminal(nt) => first.get(nt).cloned().unwrap_or_default(),
        _ => SymbolSet::from([*symbol]),
    }
}

// FIRST of a sequence of symbols, including `Epsilon` when every symbol in
// it can vanish.
pub fn first_of_sequence(symbols: &[Symbol], first: &FirstSets) -> SymbolSet {
    let mut result = SymbolSet::new();

    for symbol in symbols {
        match symbol {
            Symbol::Terminal(_) | Symbol::EndMarker => {
                result.insert(*symbol);
                return result;
            }
            Symbol::Nonterminal(nt) => {
                let Some(symbol_first) = first.get(nt) else {
                    // Nothing known yet, so the chain is blocked
                    return result;
                };
                result.extend(symbol_first.iter().filter(|s| **s != Symbol::Epsilon));
                if !symbol_first.contains(&Symbol::Epsilon) {
                    return result;
                }
            }
            Symbol::Epsilon => continue,
        }
    }

    result.insert(Symbol::Epsilon);
    result
}
