/*
    This module stores grammars: the symbol universe and the production table
*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;

// A nonterminal name. The derived ordering puts the augmented start symbol
// before every named nonterminal, which is also the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nonterminal {
    Augmented,
    Named(char),
}

// The base unit in a production. Terminals sort before the two markers and
// the end marker sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(Nonterminal),
    Epsilon,
    EndMarker,
}

// The symbols of a single production, empty for an epsilon production
pub type Production = Vec<Symbol>;

impl Display for Nonterminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nonterminal::Augmented => write!(f, "S'"),
            Nonterminal::Named(c) => write!(f, "{}", c),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(nt) => write!(f, "{}", nt),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndMarker => write!(f, "$$"),
        }
    }
}

// The immutable production table of a grammar, together with the universe
// of symbols it mentions.
#[derive(Debug, PartialEq)]
pub struct Grammar {
    start: char,
    rules: BTreeMap<Nonterminal, Vec<Production>>,
    nonterminals: BTreeSet<Nonterminal>,
    terminals: BTreeSet<char>,
}

impl Grammar {
    // Builds the table from `(lhs, rhs)` pairs. The augmented production
    // `S' -> S $$` is registered before any of them.
    pub fn new<I>(start: char, rules: I) -> Self
    where
        I: IntoIterator<Item = (char, Production)>,
    {
        let mut grammar = Grammar {
            start,
            rules: BTreeMap::new(),
            nonterminals: BTreeSet::new(),
            terminals: BTreeSet::new(),
        };

        grammar.add_production(
            Nonterminal::Augmented,
            vec![Symbol::Nonterminal(Nonterminal::Named(start)), Symbol::EndMarker],
        );
        for (lhs, rhs) in rules {
            grammar.add_production(Nonterminal::Named(lhs), rhs);
        }

        grammar
    }

    fn add_production(&mut self, lhs: Nonterminal, rhs: Production) {
        // Explicit epsilons are markers, not symbols of the production
        let rhs = rhs.into_iter().filter(|s| *s != Symbol::Epsilon).collect_vec();

        for symbol in &rhs {
            match symbol {
                Symbol::Terminal(c) => {
                    self.terminals.insert(*c);
                }
                Symbol::Nonterminal(nt) => {
                    self.nonterminals.insert(*nt);
                }
                Symbol::Epsilon | Symbol::EndMarker => (),
            }
        }

        self.nonterminals.insert(lhs);
        self.rules.entry(lhs).or_default().push(rhs);
    }

    pub fn start(&self) -> Nonterminal {
        Nonterminal::Named(self.start)
    }

    // All productions of `nonterminal`, empty if none were registered.
    pub fn productions(&self, nonterminal: &Nonterminal) -> &[Production] {
        self.rules.get(nonterminal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter_productions(&self) -> impl Iterator<Item = (&Nonterminal, &Production)> {
        self.rules
            .iter()
            .flat_map(|(lhs, rhss)| rhss.iter().map(move |rhs| (lhs, rhs)))
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &Nonterminal> {
        self.nonterminals.iter()
    }

    pub fn terminals(&self) -> impl Iterator<Item = char> + '_ {
        self.terminals.iter().copied()
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Terminal(c) => self.terminals.contains(c),
            _ => false,
        }
    }

    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Nonterminal(nt) => self.nonterminals.contains(nt),
            _ => false,
        }
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lhs, rhs) in self.iter_productions() {
            if rhs.is_empty() {
                writeln!(f, "{} -> {}", lhs, Symbol::Epsilon)?;
            } else {
                writeln!(f, "{} -> {}", lhs, rhs.iter().join(""))?;
            }
        }
        Ok(())
    }
}
