//! Core drill engine — rule tables, move enumeration, and the two generation
//! strategies built on them.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: formula categories, config, running state, results |
//! | `error`      | `ConfigurationError` and the `ConfigResult` alias |
//! | `rules`      | Static friend-number tables per digit and category |
//! | `enumerator` | Legal next moves: rule expansion, carry filter, bounds |
//! | `generator`  | Batch mode `generate_problem()` and seeded `generate_drill()` |
//! | `stream`     | Streaming mode `FlashTrainer` for the flashing-number trainer |
//! | `legacy`     | Old lesson names (`"oddiy"`, `"formula5"`, ...) to category sets |

pub mod enumerator;
pub mod error;
pub mod generator;
pub mod legacy;
pub mod models;
pub mod rules;
pub mod stream;

// Re-export the public API surface so callers can use
// `training_engine::generate_problem` without reaching into sub-modules.
pub use enumerator::{available_operations, enumerate_operations};
pub use error::{ConfigResult, ConfigurationError};
pub use generator::{generate_drill, generate_next_number, generate_problem};
pub use legacy::{legacy_formula_set, parse_legacy_formulas};
pub use models::{
    AllowedOperation, DigitRule, DrillRequest, DrillSheet, FormulaCategory, GeneratedProblem,
    GeneratorConfig, RunningState,
};
pub use rules::digit_rule;
pub use stream::FlashTrainer;
