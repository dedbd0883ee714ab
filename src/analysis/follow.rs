use log::{debug, trace};

use super::first::first_of_symbol;
use super::{FirstSets, FollowSets, SymbolSet};
use crate::grammar::*;

// Compute FOLLOW for every nonterminal of the grammar from finished FIRST
// sets. The augmented start symbol always ends up with an empty set.
pub fn solve(grammar: &Grammar, first: &FirstSets) -> FollowSets {
    solve_from(grammar, first, FollowSets::new())
}

// Compute FOLLOW starting from an existing mapping. Sets only ever grow, so a
// finished mapping with `S'` seeded back to `{$$}` comes out unchanged.
pub fn solve_from(grammar: &Grammar, first: &FirstSets, mut follow: FollowSets) -> FollowSets {
    for nonterminal in grammar.nonterminals() {
        follow.entry(*nonterminal).or_default();
    }
    follow.entry(Nonterminal::Augmented).or_default().insert(Symbol::EndMarker);

    for pass in 1.. {
        trace!("FOLLOW set pass {}", pass);
        let mut changed = false;

        for (lhs, production) in grammar.iter_productions() {
            let seed = follow.get(lhs).cloned().unwrap_or_default();
            let snapshots = trailing_snapshots(production, &seed, first);

            for (symbol, trailing) in production.iter().zip(snapshots) {
                if let Symbol::Nonterminal(nt) = symbol {
                    let entry = follow.entry(*nt).or_default();
                    let before = entry.len();
                    entry.extend(trailing);
                    changed |= entry.len() > before;
                }
            }
        }

        if !changed {
            debug!("FOLLOW sets converged after {} passes", pass);
            break;
        }
    }

    // The start symbol has no follow context of its own
    follow.entry(Nonterminal::Augmented).or_default().clear();

    follow
}

// The trailing set in effect at each position of `production`, scanning
// right to left from `seed`. Entry `i` is what can follow `production[i]`.
fn trailing_snapshots(production: &[Symbol], seed: &SymbolSet, first: &FirstSets) -> Vec<SymbolSet> {
    let mut snapshots = Vec::with_capacity(production.len());
    let mut trailing = seed.clone();

    for symbol in production.iter().rev() {
        let next = match symbol {
            Symbol::Nonterminal(_) => {
                let symbol_first = first_of_symbol(symbol, first);
                if symbol_first.contains(&Symbol::Epsilon) {
                    trailing
                        .iter()
                        .chain(symbol_first.iter())
                        .filter(|s| **s != Symbol::Epsilon)
                        .copied()
                        .collect()
                } else {
                    symbol_first
                }
            }
            Symbol::Terminal(_) | Symbol::EndMarker => SymbolSet::from([*symbol]),
            Symbol::Epsilon => trailing.clone(),
        };
        snapshots.push(std::mem::replace(&mut trailing, next));
    }

    snapshots.reverse();
    snapshots
}
