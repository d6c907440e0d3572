//! Static friend-number tables, one pair of add/subtract tables per category.
//!
//! Every table is indexed by the digit (0–9) of the column being operated on
//! and holds single-digit values only, so lookups are total and O(1).

use crate::training_engine::models::{DigitRule, FormulaCategory};

type Table = [&'static [u8]; 10];

const NONE: Table = [&[]; 10];
const EVERY_DIGIT: Table = [&[1, 2, 3, 4, 5, 6, 7, 8, 9]; 10];

// d + k <= 9
const BASIC_ADD: Table = [
    &[1, 2, 3, 4, 5, 6, 7, 8, 9],
    &[1, 2, 3, 4, 5, 6, 7, 8],
    &[1, 2, 3, 4, 5, 6, 7],
    &[1, 2, 3, 4, 5, 6],
    &[1, 2, 3, 4, 5],
    &[1, 2, 3, 4],
    &[1, 2, 3],
    &[1, 2],
    &[1],
    &[],
];

// d - k >= 0
const BASIC_SUB: Table = [
    &[],
    &[1],
    &[1, 2],
    &[1, 2, 3],
    &[1, 2, 3, 4],
    &[1, 2, 3, 4, 5],
    &[1, 2, 3, 4, 5, 6],
    &[1, 2, 3, 4, 5, 6, 7],
    &[1, 2, 3, 4, 5, 6, 7, 8],
    &[1, 2, 3, 4, 5, 6, 7, 8, 9],
];

// 5-complement: lower beads exhausted, bring the upper bead down (3, 4)
// or push it back up (5, 6).
const SMALL_ADD: Table = [
    &[],
    &[],
    &[],
    &[2, 3, 4],
    &[1, 2, 3, 4],
    &[],
    &[],
    &[],
    &[],
    &[],
];

const SMALL_SUB: Table = [
    &[],
    &[],
    &[],
    &[],
    &[],
    &[1, 2, 3, 4],
    &[2, 3, 4],
    &[],
    &[],
    &[],
];

// d + k >= 10
const BIG_ADD: Table = [
    &[],
    &[9],
    &[8, 9],
    &[7, 8, 9],
    &[6, 7, 8, 9],
    &[5, 6, 7, 8, 9],
    &[4, 5, 6, 7, 8, 9],
    &[3, 4, 5, 6, 7, 8, 9],
    &[2, 3, 4, 5, 6, 7, 8, 9],
    &[1, 2, 3, 4, 5, 6, 7, 8, 9],
];

// d - k < 0
const BIG_SUB: Table = [
    &[1, 2, 3, 4, 5, 6, 7, 8, 9],
    &[2, 3, 4, 5, 6, 7, 8, 9],
    &[3, 4, 5, 6, 7, 8, 9],
    &[4, 5, 6, 7, 8, 9],
    &[5, 6, 7, 8, 9],
    &[6, 7, 8, 9],
    &[7, 8, 9],
    &[8, 9],
    &[9],
    &[],
];

fn tables(category: FormulaCategory) -> (&'static Table, &'static Table) {
    match category {
        FormulaCategory::Basic             => (&BASIC_ADD, &BASIC_SUB),
        FormulaCategory::SmallFriend       => (&SMALL_ADD, &SMALL_SUB),
        FormulaCategory::BigFriendAdd      => (&BIG_ADD, &NONE),
        FormulaCategory::BigFriendSubtract => (&NONE, &BIG_SUB),
        FormulaCategory::Mixed             => (&EVERY_DIGIT, &EVERY_DIGIT),
    }
}

/// Legal friend numbers for `digit` under `category`.
///
/// `digit` is taken modulo 10, so every input yields a (possibly empty) rule.
pub fn digit_rule(digit: u8, category: FormulaCategory) -> DigitRule {
    let (add, sub) = tables(category);
    let idx = usize::from(digit % 10);
    DigitRule { addable: add[idx], subtractable: sub[idx] }
}

/// True if moving `digit` by `magnitude` leaves the 0–9 range of its column.
pub fn crosses_ten(digit: u8, magnitude: u8, is_addition: bool) -> bool {
    if is_addition {
        digit + magnitude >= 10
    } else {
        magnitude > digit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_total_and_single_digit() {
        for category in FormulaCategory::ALL {
            for digit in 0u8..=9 {
                let rule = digit_rule(digit, category);
                for &k in rule.addable.iter().chain(rule.subtractable) {
                    assert!(
                        (1..=9).contains(&k),
                        "{category:?} digit {digit} holds out-of-range value {k}"
                    );
                }
            }
        }
    }

    #[test]
    fn basic_never_crosses_ten() {
        for digit in 0u8..=9 {
            let rule = digit_rule(digit, FormulaCategory::Basic);
            assert!(rule.addable.iter().all(|&k| digit + k <= 9));
            assert!(rule.subtractable.iter().all(|&k| k <= digit));
            assert_eq!(rule.addable.len(), usize::from(9 - digit));
            assert_eq!(rule.subtractable.len(), usize::from(digit));
        }
    }

    #[test]
    fn big_friend_add_always_carries() {
        for digit in 0u8..=9 {
            let rule = digit_rule(digit, FormulaCategory::BigFriendAdd);
            assert!(rule.subtractable.is_empty());
            assert!(rule.addable.iter().all(|&k| digit + k >= 10));
            assert_eq!(rule.addable.len(), usize::from(digit));
        }
        assert_eq!(digit_rule(7, FormulaCategory::BigFriendAdd).addable, &[3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn big_friend_subtract_always_borrows() {
        for digit in 0u8..=9 {
            let rule = digit_rule(digit, FormulaCategory::BigFriendSubtract);
            assert!(rule.addable.is_empty());
            assert!(rule.subtractable.iter().all(|&k| crosses_ten(digit, k, false)));
            assert_eq!(rule.subtractable.len(), usize::from(9 - digit));
        }
    }

    #[test]
    fn small_friend_only_on_digits_three_to_six() {
        for digit in 0u8..=9 {
            let rule = digit_rule(digit, FormulaCategory::SmallFriend);
            assert_eq!(
                !rule.is_empty(),
                (3..=6).contains(&digit),
                "small friend participation wrong for digit {digit}"
            );
            assert!(rule.addable.iter().all(|&k| !crosses_ten(digit, k, true)));
            assert!(rule.subtractable.iter().all(|&k| !crosses_ten(digit, k, false)));
        }
    }

    #[test]
    fn mixed_covers_full_span() {
        for digit in 0u8..=9 {
            let rule = digit_rule(digit, FormulaCategory::Mixed);
            assert_eq!(rule.addable.len(), 9);
            assert_eq!(rule.subtractable.len(), 9);
        }
    }

    #[test]
    fn digit_is_reduced_modulo_ten() {
        assert_eq!(
            digit_rule(17, FormulaCategory::Basic),
            digit_rule(7, FormulaCategory::Basic)
        );
    }
}
