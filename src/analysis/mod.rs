/*
    This module computes FIRST and FOLLOW sets
*/

pub mod first;
pub mod follow;

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::grammar::*;

pub type SymbolSet = BTreeSet<Symbol>;

// Nonterminal -> terminals, `EndMarker` and possibly `Epsilon`
pub type FirstSets = BTreeMap<Nonterminal, SymbolSet>;

// Nonterminal -> terminals and `EndMarker`
pub type FollowSets = BTreeMap<Nonterminal, SymbolSet>;

#[derive(Debug, PartialEq)]
pub struct Analysis {
    pub first: FirstSets,
    pub follow: FollowSets,
}

pub fn analyze(grammar: &Grammar) -> Analysis {
    let first = first::solve(grammar);
    let follow = follow::solve(grammar, &first);

    debug!(
        "Solved {} nonterminals ({} FIRST entries, {} FOLLOW entries)",
        first.len(),
        first.values().map(BTreeSet::len).sum::<usize>(),
        follow.values().map(BTreeSet::len).sum::<usize>(),
    );

    Analysis { first, follow }
}
