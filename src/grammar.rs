//! Grammar table for the LL(1) checker
//!
//! This module loads the line-oriented grammar table format and builds the
//! immutable lookup structures the checker runs against:
//! 1. Terminal / non-terminal classification (a name becomes a non-terminal
//!    the moment a rule defines it, and is removed from the terminal set)
//! 2. Rule bodies, keyed by rule id, with `EPSILON` markers dropped
//! 3. Predict sets: for each non-terminal, which lookahead terminal selects
//!    which rule (at most one rule per lookahead - the LL(1) invariant)
//! 4. The shortcut table: non-terminals with a single obvious expansion,
//!    used by error recovery to synthesize a missing terminal
//!
//! Table format, one rule per line (blank lines are skipped):
//!
//! ```text
//! rule-id | LHS -> RHS tokens | comma-separated lookaheads
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// Reserved right-hand-side marker for the empty production
pub const EPSILON: &str = "EPSILON";
/// End-of-input sentinel, appended to every token stream
pub const END: &str = "$";
/// The grammar's start non-terminal
pub const START: &str = "P";

/// Lazy-compiled regex for the three-field table line
static TABLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<id>[^|]+?)\s*\|\s*(?P<lhs>[^|>]+?)\s*->\s*(?P<rhs>[^|]*?)\s*\|\s*(?P<look>[^|]+?)\s*$").unwrap()
});

/// A grammar symbol, classified once at table construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name,
        }
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The predict entries of one non-terminal, in table declaration order
///
/// Declaration order matters: it is the candidate order for spelling repair
/// and the display order of "Couldn't find expected a/b/..." diagnostics.
#[derive(Debug, Clone, Default)]
pub struct PredictSet {
    entries: Vec<(String, String)>, // (lookahead, rule id)
}

impl PredictSet {
    fn insert(&mut self, lookahead: &str, rule_id: &str) {
        self.entries
            .push((lookahead.to_string(), rule_id.to_string()));
    }

    pub fn contains(&self, lookahead: &str) -> bool {
        self.entries.iter().any(|(look, _)| look == lookahead)
    }

    pub fn rule_for(&self, lookahead: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(look, _)| look == lookahead)
            .map(|(_, id)| id.as_str())
    }

    pub fn lookaheads(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(look, _)| look.as_str())
    }

    /// Lookaheads joined with `/`, as used by recovery diagnostics
    pub fn joined(&self) -> String {
        self.lookaheads().collect::<Vec<_>>().join("/")
    }
}

/// Errors raised while loading a grammar table
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    Io(String),
    MalformedLine { line: usize, text: String },
    DuplicatePredict { non_terminal: String, lookahead: String },
}

impl std::error::Error for TableError {}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(msg) => write!(f, "IO error: {}", msg),
            TableError::MalformedLine { line, text } => {
                write!(f, "Malformed table line {}: {}", line, text)
            }
            TableError::DuplicatePredict {
                non_terminal,
                lookahead,
            } => write!(
                f,
                "Duplicate predict entry for ({}, {})",
                non_terminal, lookahead
            ),
        }
    }
}

/// Immutable LL(1) grammar table
///
/// Built once by [`GrammarTable::parse`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GrammarTable {
    terminals: HashSet<String>,
    non_terminals: HashSet<String>,
    rules: HashMap<String, Vec<Symbol>>,
    predicts: HashMap<String, PredictSet>,
    shortcut: HashMap<String, String>,
}

impl GrammarTable {
    /// Parse a grammar table from its textual definition
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut terminals: HashSet<String> = HashSet::new();
        let mut non_terminals: HashSet<String> = HashSet::new();
        let mut raw_rules: HashMap<String, Vec<String>> = HashMap::new();
        let mut predicts: HashMap<String, PredictSet> = HashMap::new();
        let mut shortcut: HashMap<String, String> = HashMap::new();
        let mut blacklist: HashSet<String> = HashSet::new();

        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let caps = TABLE_LINE
                .captures(line)
                .ok_or_else(|| TableError::MalformedLine {
                    line: number + 1,
                    text: line.to_string(),
                })?;
            let id = caps["id"].to_string();
            let lhs = caps["lhs"].to_string();
            let body: Vec<String> = caps["rhs"].split_whitespace().map(str::to_string).collect();
            let look_field = caps["look"].to_string();

            raw_rules.insert(id.clone(), body.clone());
            non_terminals.insert(lhs.clone());
            terminals.remove(&lhs);
            // Everything on a right-hand side that is not (yet) defined as a
            // non-terminal counts as a terminal; a later defining line
            // reclassifies it.
            for name in &body {
                if !non_terminals.contains(name) {
                    terminals.insert(name.clone());
                }
            }

            let lookaheads: Vec<&str> = look_field.split(',').map(str::trim).collect();
            let set = predicts.entry(lhs.clone()).or_default();
            for lookahead in &lookaheads {
                if set.contains(lookahead) {
                    return Err(TableError::DuplicatePredict {
                        non_terminal: lhs,
                        lookahead: lookahead.to_string(),
                    });
                }
                set.insert(lookahead, &id);
            }

            // A non-terminal whose own name shows up inside its lookahead
            // field is disqualified from the shortcut table for good.
            if look_field.contains(&lhs) {
                blacklist.insert(lhs.clone());
                shortcut.remove(&lhs);
            }
            if lookaheads.len() == 1 && !blacklist.contains(&lhs) {
                shortcut.insert(lhs.clone(), lookaheads[0].to_string());
            }
        }

        // Second pass: classification is complete, resolve rule bodies into
        // typed symbols. EPSILON produces nothing and is dropped here.
        let rules = raw_rules
            .into_iter()
            .map(|(id, body)| {
                let symbols = body
                    .into_iter()
                    .filter(|name| name != EPSILON)
                    .map(|name| {
                        if non_terminals.contains(&name) {
                            Symbol::NonTerminal(name)
                        } else {
                            Symbol::Terminal(name)
                        }
                    })
                    .collect();
                (id, symbols)
            })
            .collect();

        Ok(GrammarTable {
            terminals,
            non_terminals,
            rules,
            predicts,
            shortcut,
        })
    }

    /// Load a grammar table from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|e| TableError::Io(e.to_string()))?;
        Self::parse(&text)
    }

    /// Classify a symbol name the way the parse stack stores it
    pub fn resolve(&self, name: &str) -> Symbol {
        if self.non_terminals.contains(name) {
            Symbol::NonTerminal(name.to_string())
        } else {
            Symbol::Terminal(name.to_string())
        }
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_non_terminal(&self, name: &str) -> bool {
        self.non_terminals.contains(name)
    }

    /// The predict set of a non-terminal; `None` for terminals and
    /// undefined names (their predict set is empty)
    pub fn predict(&self, name: &str) -> Option<&PredictSet> {
        self.predicts.get(name)
    }

    /// The rule body selected by `(non_terminal, lookahead)`, if any
    pub fn rule_for(&self, non_terminal: &str, lookahead: &str) -> Option<&[Symbol]> {
        let id = self.predicts.get(non_terminal)?.rule_for(lookahead)?;
        self.rules.get(id).map(Vec::as_slice)
    }

    /// The single predicted terminal of a shortcut non-terminal, if any
    pub fn shortcut_for(&self, non_terminal: &str) -> Option<&str> {
        self.shortcut.get(non_terminal).map(String::as_str)
    }
}
