//! Integration tests for the predictive checker engine

use syncheck::{check_source, GrammarTable, Verdict};

fn table(definition: &str) -> GrammarTable {
    GrammarTable::parse(definition).expect("test grammar must load")
}

#[test]
fn clean_accept() {
    let table = table("1|P->a b|a");
    let summary = check_source(&table, "a b");

    assert_eq!(summary.verdict, Verdict::Accepted);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.matched, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(summary.lines.last().map(String::as_str), Some("Accepted"));
}

#[test]
fn clean_accept_trace_layout() {
    let table = table("1|P->a b|a");
    let summary = check_source(&table, "a b");

    // One line per successful step: expansion, two terminal matches, the
    // sentinel pop (with an emptied stack), then the verdict.
    assert_eq!(
        summary.lines,
        vec![
            format!(" {} $ b a", " ".repeat(40)),
            format!("a {} $ b", " ".repeat(39)),
            format!("a b {} $", " ".repeat(38)),
            format!("a b {} ", " ".repeat(38)),
            "Accepted".to_string(),
        ]
    );
}

#[test]
fn duplicate_token_is_collapsed() {
    let table = table("1|P->a b|a");
    let summary = check_source(&table, "a a b");

    assert_eq!(summary.verdict, Verdict::Rejected);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.matched, vec!["a".to_string(), "b".to_string()]);
    assert!(summary
        .lines
        .iter()
        .any(|line| line == "Extra a found. Removed."));
    assert_eq!(
        summary.lines.last().map(String::as_str),
        Some("Rejected - (1 Errors Found)")
    );
}

#[test]
fn duplicate_expected_symbol_is_popped() {
    // The body expects `a` twice but only one arrives; the already-matched
    // `a` satisfies the repeat, so the stack entry is dropped instead.
    let table = table("1|P->a a|a");
    let summary = check_source(&table, "a");

    assert_eq!(summary.errors, 1);
    assert_eq!(summary.matched, vec!["a".to_string()]);
    assert_eq!(
        summary
            .lines
            .iter()
            .filter(|line| line.as_str() == "Extra a found. Removed.")
            .count(),
        1
    );
}

#[test]
fn unknown_token_is_deleted() {
    let table = table("1|P->a b|a");
    let summary = check_source(&table, "a # b");

    assert_eq!(summary.errors, 1);
    assert_eq!(summary.matched, vec!["a".to_string(), "b".to_string()]);
    assert!(summary
        .lines
        .iter()
        .any(|line| line == "Removed invalid token: #"));
    assert!(!summary.matched.iter().any(|token| token == "#"));
}

#[test]
fn stack_reseeds_for_back_to_back_sentences() {
    // After the first sentence empties the stack, remaining input restarts
    // it at [$, P]. The sentinel pop between sentences swallows one token.
    let table = table("1|P->a|a");
    let summary = check_source(&table, "a a a");

    assert_eq!(summary.verdict, Verdict::Accepted);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.matched, vec!["a".to_string(), "a".to_string()]);
}

#[test]
fn end_on_stack_top_matches_any_token() {
    // With only the sentinel left, a stray token is consumed by the END
    // step and the stack reseeds; the second sentence then fails to start.
    let table = table("1|P->a|a");
    let summary = check_source(&table, "a a");

    assert_eq!(summary.verdict, Verdict::Rejected);
    assert_eq!(summary.errors, 1);
}

#[test]
fn empty_input_syncs_to_the_sentinel() {
    // The stream holds only the sentinel; the start symbol cannot expand
    // on it, so recovery fast-forwards the stack to `$` and one error is
    // charged.
    let table = table("1|P->a|a");
    let summary = check_source(&table, "");

    assert_eq!(summary.verdict, Verdict::Rejected);
    assert_eq!(summary.errors, 1);
    assert!(summary.matched.is_empty());
    assert!(summary
        .lines
        .iter()
        .any(|line| line == "Mismatched string, syncronised with expected: $"));
}

#[test]
fn epsilon_body_expands_to_nothing() {
    let table = table("1|P->a B b|a\n2|B->EPSILON|b");
    let summary = check_source(&table, "a b");

    assert_eq!(summary.verdict, Verdict::Accepted);
    assert_eq!(summary.matched, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn repaired_trace_parses_cleanly() {
    // Idempotence after repair: the matched output of a recovered run is
    // itself a valid sentence.
    let table = table("1|P->a b|a");
    for broken in ["a a b", "a # b", "a yikes b"] {
        let first = check_source(&table, broken);
        assert!(first.errors > 0, "input {:?} should need repair", broken);
        let second = check_source(&table, &first.matched.join(" "));
        assert_eq!(
            second.errors, 0,
            "repaired trace {:?} should be clean",
            first.matched
        );
        assert_eq!(second.matched, first.matched);
    }
}
