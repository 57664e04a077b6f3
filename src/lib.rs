//! # syncheck
//!
//! A table-driven predictive parser that validates a token stream against
//! an LL(1) grammar table and, when the input does not conform, performs
//! best-effort error recovery instead of aborting: it reports what was
//! wrong, patches the token stream or the parse stack, and keeps going
//! until it can emit a final "Accepted" or "Rejected - (N Errors Found)".
//!
//! The crate is organized as:
//! - [`grammar`]: the immutable grammar table and its line-oriented loader
//! - [`lexing`]: whitespace tokenization and the editable token stream
//! - [`checker`]: the predictive step loop over stack and stream
//! - [`recovery`]: the six-strategy recovery cascade
//! - [`matcher`]: approximate matching used for spelling repair
//! - [`report`]: collected output lines and the run summary

pub mod checker;
pub mod grammar;
pub mod lexing;
pub mod matcher;
pub mod recovery;
pub mod report;

pub use checker::{check_source, Checker, Outcome};
pub use grammar::{GrammarTable, PredictSet, Symbol, TableError, END, EPSILON, START};
pub use lexing::{tokenize, TokenStream};
pub use matcher::closest_match;
pub use recovery::RecoveryOptions;
pub use report::{Report, RunSummary, Verdict};
