//! Property-based tests for the Slab compiler.
//!
//! These check the guarantees the compiler makes for every input:
//! - compilation is total and never yields empty rows or zero weights
//! - matched `S`/`BB` pairs nest exactly as deep as they are written
//! - row heights follow the longest run of `p`s and never shrink
//! - color commands alone never create structure
//! - `i` expansion always reaches its budget in a bounded number of rounds

use proptest::prelude::*;
use slab_compiler::{
    ColorState, CompileOptions, Grid, Hue, compile, compile_with, expand, tokenize,
};

/// Arbitrary programs over the alphabet plus a little noise.
fn program_strategy() -> impl Strategy<Value = String> {
    "[BbipSrgtyfhmn x]{0,40}"
}

/// Programs made only of color and no-op commands.
fn color_program_strategy() -> impl Strategy<Value = String> {
    "[rgtyfhmn]{0,30}"
}

/// A tree of nested programs, paired with the depth it should compile to.
fn nested_program_strategy() -> impl Strategy<Value = (String, usize)> {
    let leaf = Just(("b".to_string(), 1usize));
    leaf.prop_recursive(5, 32, 3, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(|children| {
            let depth = 1 + children.iter().map(|(_, d)| *d).max().unwrap_or(0);
            let body: String = children
                .iter()
                .map(|(program, _)| format!("S{}BB", program))
                .collect();
            (format!("b{}", body), depth)
        })
    })
}

fn color_state_strategy() -> impl Strategy<Value = ColorState> {
    let hue = prop_oneof![
        Just(None),
        Just(Hue::Red.base()),
        Just(Hue::Green.base()),
        Just(Hue::Teal.base()),
        Just(Hue::Yellow.base()),
    ];
    (hue, 1.0f64..3.0).prop_map(|(base, lightness)| ColorState::new(base, lightness))
}

fn assert_well_formed(grid: &Grid) -> Result<(), TestCaseError> {
    for row in &grid.rows {
        prop_assert!(row.height >= 1);
        prop_assert!(!row.cells.is_empty(), "empty row in {:?}", grid);
        for cell in &row.cells {
            prop_assert!(cell.width >= 1);
            if let Some(nested) = &cell.nested {
                assert_well_formed(nested)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_compile_is_total(
            program in program_strategy(),
            allow_expansion in any::<bool>(),
            inherited in color_state_strategy(),
        ) {
            let grid = compile_with(&program, CompileOptions { allow_expansion, inherited });
            assert_well_formed(&grid)?;
        }

        #[test]
        fn test_nested_depth_matches_brackets((program, depth) in nested_program_strategy()) {
            let grid = compile(&program);
            prop_assert_eq!(grid.depth(), depth, "program {}", program);
            prop_assert_eq!(grid.rows.len(), 1);
        }

        #[test]
        fn test_row_height_follows_raise_run(widen in 1usize..6, raises in 0usize..8) {
            let program = format!("{}{}b", "b".repeat(widen), "p".repeat(raises));
            let grid = compile(&program);
            let row = &grid.rows[0];
            prop_assert_eq!(row.height as usize, raises + 1);
            if raises == 0 {
                prop_assert_eq!(row.cells.len(), 1);
                prop_assert_eq!(row.cells[0].width as usize, widen + 1);
            } else {
                prop_assert_eq!(row.cells.len(), 2);
                prop_assert_eq!(row.cells[0].width as usize, widen);
            }
        }

        #[test]
        fn test_row_height_never_shrinks(runs in prop::collection::vec(1usize..6, 1..5)) {
            let program: String = runs.iter().map(|&k| format!("b{}", "p".repeat(k))).collect();
            let grid = compile(&format!("{}b", program));
            let longest = runs.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(grid.rows.len(), 1);
            prop_assert_eq!(grid.rows[0].height as usize, longest + 1);
        }

        #[test]
        fn test_color_commands_create_nothing(
            program in color_program_strategy(),
            inherited in color_state_strategy(),
        ) {
            let grid = compile_with(&program, CompileOptions { allow_expansion: true, inherited });
            prop_assert!(grid.is_empty(), "{:?} built {:?}", program, grid);
            prop_assert_eq!(tokenize(&program).filter(|t| !t.is_color()).count(),
                program.chars().filter(|&c| c == 'm' || c == 'n').count());
        }

        #[test]
        fn test_expansion_reaches_budget(program in program_strategy()) {
            let exp = expand(&program);
            if program.contains('i') {
                prop_assert!(exp.program.len() >= exp.budget);
                prop_assert!(exp.rounds >= 1 || program.len() >= exp.budget);
                prop_assert!(exp.rounds <= exp.budget / (program.len() + 2) + 1);
            } else {
                prop_assert_eq!(exp.rounds, 0);
                prop_assert_eq!(&exp.program, &program);
            }
        }

        #[test]
        fn test_top_level_compiles_the_expansion(program in program_strategy()) {
            let expanded = expand(&program).program;
            prop_assert_eq!(
                compile(&program),
                compile_with(&expanded, CompileOptions::nested(ColorState::default()))
            );
        }
    }
}
