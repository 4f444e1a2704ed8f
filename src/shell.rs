//! Imperative shell for running a single proof from the command line.

use crate::formula::Formula;
use crate::parser;
use crate::search::{self, ProofResult};

/// Runs one proof search over `input` and prints its result to stdout.
///
/// Returns the process exit code per spec.md §6: the successful dimension
/// (a positive integer) or `-1` on any failure (parse error or search
/// exhaustion), left for the caller to truncate to POSIX's 0-255 range.
pub fn main(input: &str, top_optimise: bool, latex: bool) -> i32 {
    let formula = match parser::parse(input) {
        Ok(formula) => formula,
        Err(err) => {
            eprintln!("{err}");
            return -1;
        }
    };

    let print = |f: &Formula, id: crate::formula::NodeId, v: char, suppress: bool| {
        if !suppress {
            let rendered = f.subtree_to_string(id, latex);
            println!("{v} := {rendered}");
        }
    };

    let ProofResult {
        dimension,
        succeeded,
        ..
    } = search::prove(formula, top_optimise, print);

    log::info!("result: dimension {dimension}, succeeded {succeeded}");

    if succeeded {
        dimension as i32
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proves_excluded_middle() {
        assert_eq!(main("a | ~a", false, false), 2);
    }

    #[test]
    fn rejects_contradiction() {
        assert_eq!(main("a & ~a", false, false), -1);
    }

    #[test]
    fn reports_parse_errors_as_failure() {
        assert_eq!(main("a &&", false, false), -1);
    }
}
