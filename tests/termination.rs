//! Termination properties for fuzzed inputs
//!
//! Recovery is greedy and best-effort but must always make forward
//! progress: every run halts, within a step count bounded by the combined
//! stack and stream size, and always ends on a verdict line.

use proptest::prelude::*;
use syncheck::{GrammarTable, Checker, TokenStream, Verdict};

const GRAMMAR: &str = "1|P->a B|a\n2|B->b d|b,z\n3|B->c|c";

/// Tokens the fuzzer draws from: valid terminals, a lookahead-only name, a
/// non-terminal name, an unknown lexeme, and a near-miss spelling.
const ALPHABET: &[&str] = &["a", "b", "c", "d", "z", "B", "#", "bb"];

proptest! {
    #[test]
    fn every_run_halts_on_a_verdict(tokens in prop::collection::vec(
        prop::sample::select(ALPHABET), 0..24
    )) {
        let table = GrammarTable::parse(GRAMMAR).expect("fuzz grammar must load");
        let owned: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        let stream = TokenStream::from_tokens(owned.clone());
        let initial = stream.len() + 2; // tokens plus the seeded stack

        let mut checker = Checker::new(&table, stream);
        let outcome = checker.run();

        // Generous linear budget: each recovery either shrinks the stack,
        // shrinks the stream, or advances the cursor within two steps.
        prop_assert!(
            outcome.steps <= 24 * initial,
            "run took {} steps for {} starting items ({:?})",
            outcome.steps,
            initial,
            owned
        );
        let last = checker.report().lines().last().cloned().unwrap_or_default();
        match outcome.verdict {
            Verdict::Accepted => prop_assert_eq!(last, "Accepted".to_string()),
            Verdict::Rejected => prop_assert_eq!(
                last,
                format!("Rejected - ({} Errors Found)", outcome.errors)
            ),
        }
    }

    #[test]
    fn zero_recoveries_means_accepted(tokens in prop::collection::vec(
        prop::sample::select(ALPHABET), 0..24
    )) {
        let table = GrammarTable::parse(GRAMMAR).expect("fuzz grammar must load");
        let owned: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        let mut checker = Checker::new(&table, TokenStream::from_tokens(owned));
        let outcome = checker.run();

        // Errors are only ever charged by the recovery machinery, so a run
        // that never invoked it must come out clean.
        if outcome.recoveries == 0 {
            prop_assert_eq!(outcome.verdict, Verdict::Accepted);
            prop_assert_eq!(outcome.errors, 0);
        }
    }
}
