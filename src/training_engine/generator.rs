use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use tracing::{debug, trace};

use crate::training_engine::{
    enumerator::enumerate_operations,
    error::ConfigResult,
    models::{
        AllowedOperation, DrillRequest, DrillSheet, FormulaCategory, GeneratedProblem,
        GeneratorConfig, RunningState,
    },
};

/// Sheet ID from the config's most advanced category, digit count and RNG.
fn make_sheet_id(config: &GeneratorConfig, rng: &mut impl RngCore) -> String {
    let prefix = match config.primary_category() {
        Some(FormulaCategory::Basic)             => "OD",
        Some(FormulaCategory::SmallFriend)       => "F5",
        Some(FormulaCategory::BigFriendAdd)      => "FP",
        Some(FormulaCategory::BigFriendSubtract) => "FM",
        Some(FormulaCategory::Mixed) | None      => "MX",
    };
    format!("{}{}-{:08X}", prefix, config.digit_count, rng.next_u32())
}

/// Uniform start value with exactly `digit_count` digits. `config` must be valid.
pub(crate) fn draw_start_value<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> i64 {
    rng.gen_range(config.min_start_value()..=config.max_start_value())
}

/// Weighted pick: the carry pool wins with `carry_probability` when both
/// pools are non-empty, otherwise whichever pool has moves. Uniform within
/// the chosen pool. `None` if there are no candidates.
pub fn select_operation<R: Rng>(
    candidates: &[AllowedOperation],
    carry_probability: f64,
    rng: &mut R,
) -> Option<AllowedOperation> {
    let (carry, plain): (Vec<AllowedOperation>, Vec<AllowedOperation>) =
        candidates.iter().partition(|op| op.is_carry);

    let pool = match (plain.is_empty(), carry.is_empty()) {
        (true, true)   => return None,
        (false, true)  => &plain,
        (true, false)  => &carry,
        (false, false) => if rng.gen_bool(carry_probability) { &carry } else { &plain },
    };
    pool.choose(rng).copied()
}

/// Uniform pick among the columns that still have a legal move, so the
/// place value of the next delta does not depend on how many moves each
/// column offers.
fn pick_column<R: Rng>(candidates: &[AllowedOperation], rng: &mut R) -> Option<u32> {
    let mut columns: Vec<u32> = candidates.iter().map(|op| op.column).collect();
    columns.dedup();
    columns.choose(rng).copied()
}

/// One step against `state` for an already validated config.
pub(crate) fn next_delta<R: Rng>(
    state: &mut RunningState,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Option<i64> {
    let candidates = enumerate_operations(state, config);
    let column = pick_column(&candidates, rng)?;
    let in_column: Vec<AllowedOperation> =
        candidates.into_iter().filter(|op| op.column == column).collect();
    let op = select_operation(&in_column, config.carry_probability, rng)?;
    let delta = state.apply(&op);
    trace!(
        delta,
        value = state.current_value,
        category = op.formula_category.as_str(),
        carry = op.is_carry,
        "emitted operation"
    );
    Some(delta)
}

/// One incremental step against caller-held state.
///
/// Returns the signed delta that was applied, or `Ok(None)` when no legal
/// move exists (the caller should stop the stream). A bad config is an
/// error, never `None`.
pub fn generate_next_number<R: Rng>(
    state: &mut RunningState,
    config: &GeneratorConfig,
    rng: &mut R,
) -> ConfigResult<Option<i64>> {
    config.validate()?;
    Ok(next_delta(state, config, rng))
}

/// Generate one complete problem.
///
/// The sequence is shorter than `operation_count` when the running value
/// reaches a state with no legal move; that is a normal outcome.
pub fn generate_problem<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> ConfigResult<GeneratedProblem> {
    config.validate()?;

    let start_value = draw_start_value(config, rng);
    let mut state = RunningState::starting_at(start_value);
    let mut sequence = Vec::with_capacity(config.operation_count);

    while sequence.len() < config.operation_count {
        match next_delta(&mut state, config, rng) {
            Some(delta) => sequence.push(delta),
            None => {
                debug!(
                    start_value,
                    value = state.current_value,
                    produced = sequence.len(),
                    requested = config.operation_count,
                    "no legal move left, truncating problem"
                );
                break;
            }
        }
    }

    Ok(GeneratedProblem { start_value, sequence, final_answer: state.current_value })
}

/// Generate a sheet of problems from one RNG stream.
///
/// With `rng_seed: Some(_)` the whole sheet, ID included, is reproducible.
pub fn generate_drill(request: DrillRequest) -> ConfigResult<DrillSheet> {
    request.config.validate()?;

    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let sheet_id = make_sheet_id(&request.config, &mut rng);
    let problems = (0..request.problem_count)
        .map(|_| generate_problem(&request.config, &mut rng))
        .collect::<ConfigResult<Vec<_>>>()?;

    debug!(%sheet_id, problems = problems.len(), seeded = request.rng_seed.is_some(), "drill sheet generated");

    Ok(DrillSheet { sheet_id, config: request.config, problems })
}
