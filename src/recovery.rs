//! The error recovery cascade
//!
//! Invoked only on a mismatch, never fatal. Strategies run in fixed order
//! and each short-circuits on success:
//! 1. Spelling repair, then garbage-token deletion (skipped for `$`)
//! 2. Duplicate collapsing (extra input token / extra expected symbol)
//! 3. Stack re-synchronization to a token found deeper in the stack
//! 4. Shortcut substitution of the single obvious terminal
//! 5. Panic mode, only once an episode is already open: skip stack entries
//!    that cannot start with the token, or near completion consume input
//!    until a viable token, then drop or force-match the stack top
//! 6. Otherwise open an episode and wait for the next mismatch
//!
//! The quick fixes (1, 4) clear the recovering flag themselves; the caller
//! charges the error as soon as the flag is clear. Heavier strategies leave
//! an open episode to be closed by the next successful step.

use crate::checker::Checker;
use crate::grammar::END;
use crate::matcher::closest_match;

/// Tunable corners of the cascade
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryOptions {
    /// Whether a panic-mode input resync that found a viable token still
    /// falls through to the drop/force-match step. Historically only the
    /// input-exhausted path fell through; `false` keeps that behavior.
    pub resync_falls_through: bool,
}

impl Checker<'_> {
    /// One recovery attempt; mutates stack and/or stream and returns
    pub(crate) fn recover(&mut self) {
        let table = self.table;
        let token = self.stream.current().to_string();

        if token != END {
            // Spelling repair against the lookaheads valid for the stack
            // top. A terminal top has no lookaheads, so no candidates.
            let repaired = table
                .predict(self.top_name())
                .and_then(|predict| closest_match(&token.to_lowercase(), predict.lookaheads()));
            match repaired {
                Some(fix) if fix != token => {
                    self.report
                        .push(format!("Spelling mistake: {} corrected to {}", token, fix));
                    self.stream.replace_current(fix.to_string());
                    self.recovering = false;
                    return;
                }
                _ => {
                    if !table.is_terminal(&token) {
                        let invalid = self.stream.delete_current();
                        self.report
                            .push(format!("Removed invalid token: {}", invalid));
                        self.recovering = false;
                        return;
                    }
                }
            }
        }

        // Duplicate collapsing; only sensible once something matched and
        // the stack still has real work above the sentinel.
        if !self.matched.is_empty() && self.top_name() != END {
            if self.matched.last().map(String::as_str) == Some(token.as_str()) {
                let extra = self.stream.delete_current();
                self.report.push(format!("Extra {} found. Removed.", extra));
                return;
            }
            if self.matched.last().map(String::as_str) == Some(self.top_name()) {
                if let Some(extra) = self.stack.pop() {
                    self.report
                        .push(format!("Extra {} found. Removed.", extra.name()));
                }
                return;
            }
        }

        // Stack re-synchronization: fast-forward the stack to the token.
        if self.stack.iter().any(|symbol| symbol.name() == token) {
            while self.top_name() != token {
                self.stack.pop();
            }
            self.report.push(format!(
                "Mismatched string, syncronised with expected: {}",
                token
            ));
            return;
        }

        // Shortcut substitution: the top has a single obvious expansion, so
        // synthesize its terminal and note it once the episode settles.
        let top_name = self.top_name().to_string();
        if !table.is_terminal(&top_name) {
            if let Some(short) = table.shortcut_for(&top_name) {
                self.stream.insert_before_cursor(short.to_string());
                self.pending = Some(format!("Grammar expected {}", self.stream.current()));
                self.recovering = false;
                return;
            }
        }

        // Panic mode: everything above failed on the previous step too.
        if self.recovering {
            // Skip over stack entries that cannot start with this token.
            // The bottom sentinel is never considered.
            let mut depth_to_pop = None;
            for depth in 1..self.stack.len() {
                let name = self.stack[self.stack.len() - depth].name();
                if table
                    .predict(name)
                    .map_or(false, |predict| predict.contains(&token))
                {
                    depth_to_pop = Some(depth);
                    break;
                }
            }
            if let Some(depth) = depth_to_pop {
                for _ in 0..depth {
                    self.stack.pop();
                }
                return;
            }

            // Near completion it is the input that is wrong: consume tokens
            // until one could start the stack top, or input runs dry. The
            // trailing sentinel is never consumed.
            let mut resynced = false;
            if self.stack.len() <= 2 {
                let mut garbage: Vec<String> = Vec::new();
                let top = self.top_name().to_string();
                while !self.stream.at_last() {
                    let current = self.stream.current();
                    if table
                        .predict(&top)
                        .map_or(false, |predict| predict.contains(current))
                    {
                        self.report
                            .push(format!("Consumed isolated string: {}", garbage.join(" ")));
                        self.recovering = false;
                        resynced = true;
                        break;
                    }
                    garbage.push(current.to_string());
                    self.stream.advance();
                }
                if resynced && !self.options.resync_falls_through {
                    return;
                }
                if !resynced {
                    self.report
                        .push(format!("Consumed isolated string: {}", garbage.join(" ")));
                    self.recovering = false;
                }
            }

            // Last resort: drop an unsatisfiable non-terminal, or force the
            // expected terminal into the stream.
            let top = self.top_name().to_string();
            if !table.is_terminal(&top) {
                let expected = table
                    .predict(&top)
                    .map(|predict| predict.joined())
                    .unwrap_or_default();
                self.pending = Some(format!("Couldn't find expected {}", expected));
                self.stack.pop();
            } else {
                let current = self.stream.current().to_string();
                self.report
                    .push(format!("Expecting {} instead of {}", top, current));
                self.stream.replace_current(top);
            }
            return;
        }

        // First unresolved failure: open an episode. The heavier strategies
        // only activate if the mismatch recurs.
        self.recovering = true;
    }
}
