//! Self-reference expansion.
//!
//! Before a top-level program is scanned, every `i` is rewritten into a
//! nested copy of the whole program: `S`, the original text, and enough `BB`
//! pairs to close the new `S` plus every `S` inside the copy. The copy
//! carries its own `i`s, so rewriting repeats until the text is long enough.

use log::debug;

use crate::token::{OPEN, RAISE, RECURSE, ROW_BREAK};

/// Length every expansion grows towards, divided among the `p`s.
pub const EXPANSION_BUDGET: usize = 200;

/// Result of expanding a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The rewritten program, ready for the scanner.
    pub program: String,
    /// Number of rewrite rounds performed.
    pub rounds: usize,
    /// Minimum length the rewritten program had to reach.
    pub budget: usize,
}

/// Minimum expanded length for `input`: the budget split across its `p`s.
pub fn budget_for(input: &str) -> usize {
    let raises = input.chars().filter(|&ch| ch == RAISE).count().max(1);
    EXPANSION_BUDGET.div_ceil(raises)
}

/// Rewrite every `i` in `input` until the budget is met.
///
/// Programs without an `i` come back unchanged, with zero rounds.
pub fn expand(input: &str) -> Expansion {
    let budget = budget_for(input);
    if !input.contains(RECURSE) {
        return Expansion {
            program: input.to_string(),
            rounds: 0,
            budget,
        };
    }

    let opens = input.chars().filter(|&ch| ch == OPEN).count();
    let close = format!("{ROW_BREAK}{ROW_BREAK}").repeat(1 + opens);
    let replacement = format!("{OPEN}{input}{close}");

    let mut program = input.to_string();
    let mut rounds = 0;
    // Every round replaces at least one `i` with a longer string.
    while program.len() < budget {
        program = program.replace(RECURSE, &replacement);
        rounds += 1;
    }
    debug!(
        "expanded {} chars into {} over {} round(s), budget {}",
        input.len(),
        program.len(),
        rounds,
        budget
    );
    Expansion {
        program,
        rounds,
        budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget() {
        assert_eq!(budget_for(""), 200);
        assert_eq!(budget_for("bib"), 200);
        assert_eq!(budget_for("pbi"), 200);
        assert_eq!(budget_for("ppbi"), 100);
        assert_eq!(budget_for("pppbi"), 67);
    }

    #[test]
    fn test_no_recursion_is_passthrough() {
        let exp = expand("bBpbS bBB");
        assert_eq!(exp.program, "bBpbS bBB");
        assert_eq!(exp.rounds, 0);
    }

    #[test]
    fn test_single_round_shape() {
        // "bi" has no S, so each copy is closed by one BB.
        let replacement = "SbiBB";
        let mut expected = "bi".replace('i', replacement);
        let mut rounds = 1;
        while expected.len() < 200 {
            expected = expected.replace('i', replacement);
            rounds += 1;
        }
        let exp = expand("bi");
        assert_eq!(exp.program, expected);
        assert_eq!(exp.rounds, rounds);
        assert!(exp.program.starts_with("bSbSb"));
    }

    #[test]
    fn test_closing_pairs_cover_existing_opens() {
        let exp = expand("Sbi");
        assert!(exp.program.starts_with("SbSSbSSb"));
        // Each copy brings two S (its own and the wrapper) and two BB pairs,
        // so only the original unclosed S is left open.
        let opens = exp.program.matches('S').count();
        let pairs = exp.program.matches('B').count() / 2;
        assert_eq!(opens - 1, pairs);
    }

    #[test]
    fn test_reaches_budget() {
        for input in ["i", "bi", "pbib", "ppppppi", "SiBBi", "ri hb"] {
            let exp = expand(input);
            assert!(exp.program.len() >= exp.budget, "input {:?}", input);
            assert!(exp.rounds >= 1);
            assert!(exp.rounds <= exp.budget, "input {:?}", input);
        }
    }

    #[test]
    fn test_growth_stops_once_budget_met() {
        let input = "bbbbbbbbbbi";
        let replacement = format!("S{input}BB");
        let exp = expand(input);
        // Only the last round may overshoot the budget.
        let mut before_last = input.to_string();
        for _ in 1..exp.rounds {
            before_last = before_last.replace('i', &replacement);
        }
        assert!(before_last.len() < exp.budget);
        assert!(exp.program.len() >= exp.budget);
        assert_eq!(before_last.replace('i', &replacement), exp.program);
    }
}
