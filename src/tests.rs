//! End-to-end scenarios (spec.md §8), driving [search::prove] directly
//! rather than spawning the CLI process.

use crate::parser;
use crate::search::prove;

#[test]
fn top_succeeds_at_dimension_two() {
    let f = parser::parse("T").unwrap();
    let result = prove(f, false, |_, _, _, _| {});
    assert!(result.succeeded);
    assert_eq!(result.dimension, 2);
}

#[test]
fn excluded_middle_succeeds_at_dimension_two() {
    let f = parser::parse("a | ~a").unwrap();
    let result = prove(f, false, |_, _, _, _| {});
    assert!(result.succeeded);
    assert_eq!(result.dimension, 2);
}

#[test]
fn flipped_excluded_middle_succeeds_at_dimension_two() {
    let f = parser::parse("~a | a").unwrap();
    let result = prove(f, false, |_, _, _, _| {});
    assert!(result.succeeded);
    assert_eq!(result.dimension, 2);
}

#[test]
fn contradiction_fails_with_a_negative_dimension() {
    let f = parser::parse("a & ~a").unwrap();
    let result = prove(f, false, |_, _, _, _| {});
    assert!(!result.succeeded);
    assert!(result.dimension < 0);
}

#[test]
fn pairing_across_or_structure_succeeds() {
    let f = parser::parse("a | (b | ~a)").unwrap();
    let result = prove(f, false, |_, _, _, _| {});
    assert!(result.succeeded);
    assert!(result.dimension >= 2);
}

#[test]
fn top_optimise_emits_exactly_two_substitution_lines_and_terminates_earlier() {
    let f = parser::parse("(a | ~a) & (b | ~b)").unwrap();
    let mut lines = Vec::new();
    let result = prove(f, true, |f, id, v, suppress| {
        if !suppress {
            lines.push(format!("{v} := {}", f.subtree_to_string(id, false)));
        }
    });
    assert!(result.succeeded);
    assert_eq!(lines, vec!["A := a \u{2228} \u{ac}a", "B := b \u{2228} \u{ac}b"]);
    assert_eq!(result.dimension, 2);

    // spec.md §8: the -t run "terminates one dimension earlier than without -t".
    let without_top_optimise = prove(parser::parse("(a | ~a) & (b | ~b)").unwrap(), false, |_, _, _, _| {});
    assert!(without_top_optimise.succeeded);
    assert_eq!(without_top_optimise.dimension, 3);
    assert_eq!(result.dimension, without_top_optimise.dimension - 1);
}
