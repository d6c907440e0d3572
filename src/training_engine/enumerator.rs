//! Legal-move enumeration on top of the rule tables.
//!
//! Rule expansion, the carry anti-repetition filter and the running-value
//! bounds all live here so that batch and streaming generation share them.

use std::collections::BTreeSet;

use crate::training_engine::{
    models::{pow10, AllowedOperation, FormulaCategory, GeneratorConfig, RunningState},
    rules::{crosses_ten, digit_rule},
};

/// Digit of `value` at place-value `column` (0 = ones). Negative values use
/// Euclidean division so the result is always 0–9.
pub fn column_digit(value: i64, column: u32) -> u8 {
    // rem_euclid(10) is always in 0..10
    value.div_euclid(pow10(column)).rem_euclid(10) as u8
}

/// Operations legal on the ones digit of `current_value`.
///
/// If `last_formula_category` is a carry category, moves from that same
/// category are excluded. No range filtering is applied.
pub fn available_operations(
    current_value: i64,
    allowed_formulas: &BTreeSet<FormulaCategory>,
    last_formula_category: Option<FormulaCategory>,
) -> Vec<AllowedOperation> {
    column_operations(current_value, 0, allowed_formulas, last_formula_category)
}

/// Same as [`available_operations`] for an arbitrary column.
pub fn column_operations(
    current_value: i64,
    column: u32,
    allowed_formulas: &BTreeSet<FormulaCategory>,
    last_formula_category: Option<FormulaCategory>,
) -> Vec<AllowedOperation> {
    let digit = column_digit(current_value, column);
    let mut ops = Vec::new();

    for &category in allowed_formulas {
        if category.is_carry_category() && last_formula_category == Some(category) {
            continue;
        }
        let rule = digit_rule(digit, category);
        for (values, is_addition) in [(rule.addable, true), (rule.subtractable, false)] {
            ops.extend(values.iter().map(|&magnitude| AllowedOperation {
                magnitude,
                is_addition,
                is_carry: crosses_ten(digit, magnitude, is_addition),
                formula_category: category,
                column,
            }));
        }
    }
    ops
}

/// Every legal next move for `state` under `config`: all columns of a
/// `digit_count`-digit drill, with out-of-range results removed when
/// `ensure_positive_result` is set. An empty vector means no legal move.
///
/// Columns contribute unequal numbers of moves, so callers that want a
/// uniform place value should pick the column before the move.
pub fn enumerate_operations(state: &RunningState, config: &GeneratorConfig) -> Vec<AllowedOperation> {
    (0..u32::from(config.digit_count))
        .flat_map(|column| {
            column_operations(
                state.current_value,
                column,
                &config.allowed_formulas,
                state.last_formula_category,
            )
        })
        .filter(|op| config.in_bounds(state.current_value + op.signed_delta()))
        .collect()
}
