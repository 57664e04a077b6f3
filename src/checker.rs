//! Predictive parse engine
//!
//! The checker is a stack automaton over two pieces of mutable session
//! state: the parse stack and the token stream. Each step inspects
//! (stack top, current token) and does exactly one of:
//! 1. Terminal match / END step: pop, record the match, consume the token
//! 2. Non-terminal expansion: pop, push the predicted rule body reversed
//! 3. Mismatch: hand control to the recovery cascade (see `recovery`)
//!
//! Errors are counted per *episode*, not per recovery action: an episode
//! opens on the first mismatch no strategy resolves, and closes on the next
//! successful step (or at end of run). Quick one-shot repairs clear the
//! flag themselves, so the counter bumps as soon as recovery returns.

use crate::grammar::{GrammarTable, Symbol, END, START};
use crate::lexing::TokenStream;
use crate::recovery::RecoveryOptions;
use crate::report::{trace_line, verdict_line, Report, RunSummary, Verdict};

/// What a finished run amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub errors: usize,
    /// Loop iterations taken; useful for termination assertions
    pub steps: usize,
    /// How often the recovery cascade was invoked
    pub recoveries: usize,
}

/// One checking session: the grammar table plus all mutable state
///
/// Single-owner, single-threaded; create one per input, run it, discard it.
pub struct Checker<'g> {
    pub(crate) table: &'g GrammarTable,
    pub(crate) stream: TokenStream,
    pub(crate) stack: Vec<Symbol>,
    pub(crate) matched: Vec<String>,
    pub(crate) pending: Option<String>,
    pub(crate) recovering: bool,
    pub(crate) errors: usize,
    pub(crate) options: RecoveryOptions,
    pub(crate) report: Report,
}

impl<'g> Checker<'g> {
    pub fn new(table: &'g GrammarTable, stream: TokenStream) -> Self {
        Self::with_options(table, stream, RecoveryOptions::default())
    }

    pub fn with_options(
        table: &'g GrammarTable,
        stream: TokenStream,
        options: RecoveryOptions,
    ) -> Self {
        Checker {
            table,
            stream,
            stack: vec![table.resolve(END), table.resolve(START)],
            matched: Vec::new(),
            pending: None,
            recovering: false,
            errors: 0,
            options,
            report: Report::default(),
        }
    }

    /// Run the automaton to completion
    pub fn run(&mut self) -> Outcome {
        let mut steps = 0;
        let mut recoveries = 0;
        while !self.stack.is_empty() && self.stream.has_input() {
            steps += 1;
            let top = match self.stack.last() {
                Some(symbol) => symbol.clone(),
                None => break,
            };
            let token = self.stream.current().to_string();

            let expansion = if top.is_non_terminal() {
                self.table
                    .rule_for(top.name(), &token)
                    .map(|body| body.to_vec())
            } else {
                None
            };

            if (self.table.is_terminal(top.name()) && top.name() == token) || top.name() == END {
                // A successful step closes any open recovery episode.
                self.close_episode();
                let removed = match self.stack.pop() {
                    Some(symbol) => symbol,
                    None => break,
                };
                // The final pop of the end sentinel is not traced.
                if !self.stack.is_empty() {
                    self.matched.push(removed.name().to_string());
                }
                self.stream.advance();
                self.emit_trace();
                // Reseed so a second sentence in the same stream can be
                // validated back to back.
                if self.stack.is_empty() && self.stream.has_input() {
                    self.stack = vec![self.table.resolve(END), self.table.resolve(START)];
                }
            } else if let Some(body) = expansion {
                self.close_episode();
                self.stack.pop();
                // Push the body reversed so its leftmost symbol ends on top.
                for symbol in body.iter().rev() {
                    self.stack.push(symbol.clone());
                }
                self.emit_trace();
            } else {
                recoveries += 1;
                self.recover();
                if !self.recovering {
                    self.errors += 1;
                }
            }

            self.flush_pending();
        }

        self.close_episode();
        self.report.push(verdict_line(self.errors));
        Outcome {
            verdict: self.verdict(),
            errors: self.errors,
            steps,
            recoveries,
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.errors > 0 {
            Verdict::Rejected
        } else {
            Verdict::Accepted
        }
    }

    /// Terminals successfully consumed so far, in order
    pub fn matched(&self) -> &[String] {
        &self.matched
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            verdict: self.verdict(),
            errors: self.errors,
            matched: self.matched.clone(),
            lines: self.report.lines().to_vec(),
        }
    }

    /// Name of the stack top; empty for an empty stack
    pub(crate) fn top_name(&self) -> &str {
        self.stack.last().map(Symbol::name).unwrap_or("")
    }

    /// If an episode was open, close it and charge one error
    fn close_episode(&mut self) {
        if self.recovering {
            self.recovering = false;
            self.errors += 1;
        }
    }

    /// Surface the most recent deferred notice once no episode is open
    fn flush_pending(&mut self) {
        if !self.recovering {
            if let Some(message) = self.pending.take() {
                self.report.push(message);
            }
        }
    }

    fn emit_trace(&mut self) {
        let stack: Vec<&str> = self.stack.iter().map(Symbol::name).collect();
        self.report.push(trace_line(&self.matched, &stack));
    }
}

/// Check a source text against a table and return the full summary
pub fn check_source(table: &GrammarTable, source: &str) -> RunSummary {
    let mut checker = Checker::new(table, TokenStream::from_source(source));
    checker.run();
    checker.summary()
}
