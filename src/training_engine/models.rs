use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::training_engine::error::{ConfigResult, ConfigurationError};
use crate::training_engine::legacy;

/// Smallest supported digit count.
pub const MIN_DIGIT_COUNT: u8 = 1;
/// Largest supported digit count.
pub const MAX_DIGIT_COUNT: u8 = 4;
/// Share of selections that go to carry operations when both kinds are legal.
pub const DEFAULT_CARRY_PROBABILITY: f64 = 0.25;

/// `10^exp` as a signed running-value quantity.
pub fn pow10(exp: u32) -> i64 {
    10i64.pow(exp)
}

// ---------------------------------------------------------------------------
// Formula categories
// ---------------------------------------------------------------------------

/// Pedagogy rule class used as a lookup key into the rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaCategory {
    /// No formula: the ones column never crosses 0 or 9.
    Basic,
    /// 5-complement ("small friend") moves.
    SmallFriend,
    /// 10-complement addition; every move carries.
    BigFriendAdd,
    /// 10-complement subtraction; every move borrows.
    BigFriendSubtract,
    /// Free-form: any single digit either way.
    #[serde(alias = "all")]
    Mixed,
}

impl FormulaCategory {
    pub const ALL: [FormulaCategory; 5] = [
        FormulaCategory::Basic,
        FormulaCategory::SmallFriend,
        FormulaCategory::BigFriendAdd,
        FormulaCategory::BigFriendSubtract,
        FormulaCategory::Mixed,
    ];

    /// Categories whose moves always cross a ten-boundary. Two moves of the
    /// same carry category are never emitted back to back.
    pub fn is_carry_category(self) -> bool {
        matches!(self, FormulaCategory::BigFriendAdd | FormulaCategory::BigFriendSubtract)
    }

    /// Canonical config name.
    pub fn as_str(self) -> &'static str {
        match self {
            FormulaCategory::Basic             => "basic",
            FormulaCategory::SmallFriend       => "small_friend",
            FormulaCategory::BigFriendAdd      => "big_friend_add",
            FormulaCategory::BigFriendSubtract => "big_friend_subtract",
            FormulaCategory::Mixed             => "mixed",
        }
    }
}

impl fmt::Display for FormulaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormulaCategory::Basic             => "Basic",
            FormulaCategory::SmallFriend       => "Small Friend (5)",
            FormulaCategory::BigFriendAdd      => "Big Friend +10",
            FormulaCategory::BigFriendSubtract => "Big Friend -10",
            FormulaCategory::Mixed             => "Mixed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FormulaCategory {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "basic"               => Ok(FormulaCategory::Basic),
            "small_friend"        => Ok(FormulaCategory::SmallFriend),
            "big_friend_add"      => Ok(FormulaCategory::BigFriendAdd),
            "big_friend_subtract" => Ok(FormulaCategory::BigFriendSubtract),
            "mixed" | "all"       => Ok(FormulaCategory::Mixed),
            other => Err(ConfigurationError::UnknownFormula(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule-table entries and candidate moves
// ---------------------------------------------------------------------------

/// Legal single-digit friend numbers for one digit under one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigitRule {
    pub addable: &'static [u8],
    pub subtractable: &'static [u8],
}

impl DigitRule {
    pub fn is_empty(&self) -> bool {
        self.addable.is_empty() && self.subtractable.is_empty()
    }
}

/// A candidate move for the next step of a drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedOperation {
    /// Single-digit friend number, 1..=9.
    pub magnitude: u8,
    pub is_addition: bool,
    /// True when the move crosses a ten-boundary in its column.
    pub is_carry: bool,
    pub formula_category: FormulaCategory,
    /// Place-value exponent the magnitude is applied at (0 = ones).
    pub column: u32,
}

impl AllowedOperation {
    /// `±magnitude × 10^column`.
    pub fn signed_delta(&self) -> i64 {
        let scaled = i64::from(self.magnitude) * pow10(self.column);
        if self.is_addition { scaled } else { -scaled }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Caller-supplied, immutable per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Digits in the starting value, 1..=4.
    pub digit_count: u8,
    pub allowed_formulas: BTreeSet<FormulaCategory>,
    /// Requested number of operations in batch mode. Ignored when streaming.
    pub operation_count: usize,
    /// Keep every running value within `0..10^(digit_count + 1)`.
    #[serde(default = "default_ensure_positive")]
    pub ensure_positive_result: bool,
    /// Probability of drawing from the carry pool when both pools are legal.
    #[serde(default = "default_carry_probability")]
    pub carry_probability: f64,
}

fn default_ensure_positive() -> bool {
    true
}

fn default_carry_probability() -> f64 {
    DEFAULT_CARRY_PROBABILITY
}

impl GeneratorConfig {
    /// Config with defaults for the optional knobs (positive results, 0.25
    /// carry share). Not validated until generation or `validate()`.
    pub fn new(
        digit_count: u8,
        allowed_formulas: impl IntoIterator<Item = FormulaCategory>,
        operation_count: usize,
    ) -> Self {
        Self {
            digit_count,
            allowed_formulas: allowed_formulas.into_iter().collect(),
            operation_count,
            ensure_positive_result: true,
            carry_probability: DEFAULT_CARRY_PROBABILITY,
        }
    }

    /// Build from an old-style formula name such as `"formula10plus"`.
    pub fn from_legacy(digit_count: u8, legacy_name: &str, operation_count: usize) -> ConfigResult<Self> {
        let formulas = legacy::legacy_formula_set(legacy_name)?;
        let config = Self::new(digit_count, formulas, operation_count);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_ensure_positive_result(mut self, ensure: bool) -> Self {
        self.ensure_positive_result = ensure;
        self
    }

    pub fn with_carry_probability(mut self, probability: f64) -> Self {
        self.carry_probability = probability;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_DIGIT_COUNT..=MAX_DIGIT_COUNT).contains(&self.digit_count) {
            return Err(ConfigurationError::DigitCountOutOfRange(self.digit_count));
        }
        if self.allowed_formulas.is_empty() {
            return Err(ConfigurationError::EmptyFormulaSet);
        }
        if !(0.0..=1.0).contains(&self.carry_probability) {
            return Err(ConfigurationError::CarryProbabilityOutOfRange(self.carry_probability));
        }
        Ok(())
    }

    /// Smallest `digit_count`-digit number (1 for single digits).
    pub fn min_start_value(&self) -> i64 {
        pow10(u32::from(self.digit_count) - 1)
    }

    /// Largest `digit_count`-digit number.
    pub fn max_start_value(&self) -> i64 {
        pow10(u32::from(self.digit_count)) - 1
    }

    /// Inclusive ceiling for running values when `ensure_positive_result` is set.
    pub fn upper_bound(&self) -> i64 {
        pow10(u32::from(self.digit_count) + 1) - 1
    }

    /// Whether `value` is an acceptable running value under this config.
    pub fn in_bounds(&self, value: i64) -> bool {
        !self.ensure_positive_result || (0..=self.upper_bound()).contains(&value)
    }

    /// The most advanced category in the set (used for ID prefixes).
    pub fn primary_category(&self) -> Option<FormulaCategory> {
        self.allowed_formulas.iter().next_back().copied()
    }
}

// ---------------------------------------------------------------------------
// Running state and results
// ---------------------------------------------------------------------------

/// Mutable per-drill state. `Default` is the zero/untouched state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningState {
    pub current_value: i64,
    pub last_formula_category: Option<FormulaCategory>,
}

impl RunningState {
    pub fn starting_at(value: i64) -> Self {
        Self { current_value: value, last_formula_category: None }
    }

    /// Apply `op` and return the signed delta that was added.
    pub fn apply(&mut self, op: &AllowedOperation) -> i64 {
        let delta = op.signed_delta();
        self.current_value += delta;
        self.last_formula_category = Some(op.formula_category);
        delta
    }
}

/// A complete batch-mode drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedProblem {
    pub start_value: i64,
    /// Signed deltas in display order.
    pub sequence: Vec<i64>,
    pub final_answer: i64,
}

impl GeneratedProblem {
    /// Running value after each delta.
    pub fn running_totals(&self) -> Vec<i64> {
        self.sequence
            .iter()
            .scan(self.start_value, |total, delta| {
                *total += delta;
                Some(*total)
            })
            .collect()
    }

    pub fn is_correct(&self, answer: i64) -> bool {
        answer == self.final_answer
    }
}

/// Request for one or more problems sharing a config and an RNG stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillRequest {
    pub config: GeneratorConfig,
    #[serde(default = "default_problem_count")]
    pub problem_count: usize,
    /// Same seed and config produce the same sheet; `None` uses entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_problem_count() -> usize {
    1
}

impl DrillRequest {
    /// One problem, entropy-seeded.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config, problem_count: 1, rng_seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_problem_count(mut self, count: usize) -> Self {
        self.problem_count = count;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSheet {
    /// `<prefix><digits>-<8 hex>`, e.g. `FP2-1A2B3C4D`.
    pub sheet_id: String,
    pub config: GeneratorConfig,
    pub problems: Vec<GeneratedProblem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_value_range_matches_digit_count() {
        let one = GeneratorConfig::new(1, [FormulaCategory::Basic], 3);
        assert_eq!((one.min_start_value(), one.max_start_value()), (1, 9));
        assert_eq!(one.upper_bound(), 99);

        let four = GeneratorConfig::new(4, [FormulaCategory::Basic], 3);
        assert_eq!((four.min_start_value(), four.max_start_value()), (1000, 9999));
        assert_eq!(four.upper_bound(), 99_999);
    }

    #[test]
    fn validate_rejects_bad_digit_counts() {
        for digits in [0u8, 5, 9] {
            let config = GeneratorConfig::new(digits, [FormulaCategory::Basic], 3);
            assert!(
                matches!(config.validate(), Err(ConfigurationError::DigitCountOutOfRange(d)) if d == digits),
                "digit count {digits} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_empty_formula_set() {
        let config = GeneratorConfig::new(2, Vec::<FormulaCategory>::new(), 3);
        assert!(matches!(config.validate(), Err(ConfigurationError::EmptyFormulaSet)));
    }

    #[test]
    fn validate_rejects_bad_carry_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            let config = GeneratorConfig::new(2, [FormulaCategory::Mixed], 3).with_carry_probability(p);
            assert!(matches!(
                config.validate(),
                Err(ConfigurationError::CarryProbabilityOutOfRange(_))
            ));
        }
    }

    #[test]
    fn from_json_applies_defaults() {
        let config = GeneratorConfig::from_json(
            r#"{ "digit_count": 2, "allowed_formulas": ["basic", "all"], "operation_count": 4 }"#,
        )
        .expect("valid config");
        assert!(config.ensure_positive_result);
        assert_eq!(config.carry_probability, DEFAULT_CARRY_PROBABILITY);
        assert!(config.allowed_formulas.contains(&FormulaCategory::Mixed));
        assert_eq!(config.primary_category(), Some(FormulaCategory::Mixed));
    }

    #[test]
    fn from_json_reports_parse_and_validation_errors() {
        assert!(matches!(
            GeneratorConfig::from_json("{ not json"),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json(
                r#"{ "digit_count": 7, "allowed_formulas": ["basic"], "operation_count": 4 }"#
            ),
            Err(ConfigurationError::DigitCountOutOfRange(7))
        ));
    }

    #[test]
    fn formula_names_round_trip_through_from_str() {
        for category in FormulaCategory::ALL {
            assert_eq!(category.as_str().parse::<FormulaCategory>().ok(), Some(category));
        }
        assert!(matches!(
            "big_friend".parse::<FormulaCategory>(),
            Err(ConfigurationError::UnknownFormula(_))
        ));
    }

    #[test]
    fn signed_delta_scales_by_column() {
        let op = AllowedOperation {
            magnitude: 7,
            is_addition: false,
            is_carry: true,
            formula_category: FormulaCategory::BigFriendSubtract,
            column: 2,
        };
        assert_eq!(op.signed_delta(), -700);

        let mut state = RunningState::starting_at(1234);
        assert_eq!(state.apply(&op), -700);
        assert_eq!(state.current_value, 534);
        assert_eq!(state.last_formula_category, Some(FormulaCategory::BigFriendSubtract));
    }

    #[test]
    fn running_totals_follow_sequence() {
        let problem = GeneratedProblem { start_value: 5, sequence: vec![3, -6, 10], final_answer: 12 };
        assert_eq!(problem.running_totals(), vec![8, 2, 12]);
        assert!(problem.is_correct(12));
        assert!(!problem.is_correct(11));
    }
}
