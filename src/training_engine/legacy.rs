//! Compatibility table for the old lesson formula names.
//!
//! Older clients store a single lesson name per drill. Each name maps to a
//! fixed set of categories; anything not in the table is rejected.

use std::collections::BTreeSet;

use crate::training_engine::{
    error::{ConfigResult, ConfigurationError},
    models::FormulaCategory,
};

use FormulaCategory::*;

const LEGACY_FORMULAS: [(&str, &[FormulaCategory]); 5] = [
    ("oddiy",          &[Basic]),
    ("formula5",       &[Basic, SmallFriend]),
    ("formula10plus",  &[Basic, BigFriendAdd]),
    ("formula10minus", &[Basic, BigFriendSubtract]),
    ("hammasi",        &[Mixed]),
];

/// Legacy names in table order.
pub fn legacy_names() -> impl Iterator<Item = &'static str> {
    LEGACY_FORMULAS.iter().map(|(name, _)| *name)
}

/// Categories for one legacy name. Case and surrounding whitespace are ignored.
pub fn legacy_formula_set(name: &str) -> ConfigResult<BTreeSet<FormulaCategory>> {
    let key = name.trim().to_ascii_lowercase();
    LEGACY_FORMULAS
        .iter()
        .find(|(legacy, _)| *legacy == key)
        .map(|(_, categories)| categories.iter().copied().collect())
        .ok_or_else(|| ConfigurationError::UnknownLegacyFormula(name.to_string()))
}

/// Union of the categories for several legacy names. Fails on the first
/// unknown name.
pub fn parse_legacy_formulas<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> ConfigResult<BTreeSet<FormulaCategory>> {
    let mut formulas = BTreeSet::new();
    for name in names {
        formulas.extend(legacy_formula_set(name)?);
    }
    Ok(formulas)
}
