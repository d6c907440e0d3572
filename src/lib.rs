//! # soroban_drill_gen
//!
//! A fully offline, deterministic mental-arithmetic drill generator built on
//! abacus (soroban) pedagogy.
//!
//! Each drill is a starting number followed by signed deltas. Every delta is a
//! single-digit "friend number" move, legal under the formula categories the
//! lesson allows: basic moves, 5-complement (small friend) moves, and
//! 10-complement (big friend) carries and borrows.
//!
//! ## How it works
//!
//! 1. Build a [`GeneratorConfig`] with a digit count (1–4), the allowed
//!    [`FormulaCategory`] set, and an operation count.
//! 2. Call [`generate_problem`] with any `rand::Rng` for a whole problem, or
//!    drive a [`FlashTrainer`] one number at a time for the flashing-number
//!    trainer.
//! 3. For every step the engine looks up the friend-number tables for the
//!    current digit, drops moves that would repeat the previous carry category
//!    or leave the allowed range, and picks one with a 75/25 bias towards
//!    non-carry moves.
//!
//! ## Key features
//!
//! - **Deterministic**: pass a seeded RNG (or `rng_seed: Some(u64)` on a
//!   [`DrillRequest`]) to replay the exact same drill, e.g. for weekly
//!   competitions where everyone solves the same sheet.
//! - **Bounded**: with `ensure_positive_result` every running value stays in
//!   `0..10^(digit_count + 1)`.
//! - **Legacy names**: `"oddiy"`, `"formula5"`, `"formula10plus"`,
//!   `"formula10minus"` and `"hammasi"` map to category sets through
//!   [`legacy_formula_set`].
//!
//! ## Quick start
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use soroban_drill_gen::{
//!     generate_drill, generate_problem, DrillRequest, FlashTrainer, FormulaCategory,
//!     GeneratorConfig,
//! };
//!
//! let config = GeneratorConfig::new(2, [FormulaCategory::Basic, FormulaCategory::BigFriendAdd], 5);
//!
//! // One problem from a caller-supplied RNG:
//! let mut rng = StdRng::seed_from_u64(42);
//! let problem = generate_problem(&config, &mut rng).unwrap();
//! assert_eq!(problem.final_answer, problem.start_value + problem.sequence.iter().sum::<i64>());
//!
//! // A reproducible sheet of ten problems:
//! let sheet = generate_drill(DrillRequest::new(config.clone()).with_seed(7).with_problem_count(10)).unwrap();
//! assert_eq!(sheet.problems.len(), 10);
//!
//! // Flashing numbers, one per tick:
//! let mut trainer = FlashTrainer::with_seed(config, 7).unwrap();
//! let first = trainer.start();
//! let shown: Vec<i64> = trainer.by_ref().take(8).collect();
//! println!("{first} {shown:?} = {}", trainer.current_value());
//! ```

pub mod flash_adapter;
pub mod training_engine;

// Convenience re-exports so callers can use `soroban_drill_gen::generate_problem`
// directly without reaching into `training_engine::`.
pub use flash_adapter::{format_delta, to_flash_payload};
pub use training_engine::{
    available_operations, digit_rule, enumerate_operations, generate_drill,
    generate_next_number, generate_problem, legacy_formula_set, parse_legacy_formulas,
    AllowedOperation, ConfigResult, ConfigurationError, DigitRule, DrillRequest, DrillSheet,
    FlashTrainer, FormulaCategory, GeneratedProblem, GeneratorConfig, RunningState,
};
