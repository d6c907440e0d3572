use serde_json::{json, Value};

use crate::training_engine::models::{GeneratedProblem, GeneratorConfig};

/// Display form of a delta: `"+3"`, `"-12"`.
pub fn format_delta(delta: i64) -> String {
    if delta >= 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

/// One entry per flashed number, start value first.
fn steps(problem: &GeneratedProblem) -> Value {
    let first = json!({
        "index": 0,
        "display": problem.start_value.to_string(),
        "value": problem.start_value,
        "running_total": problem.start_value,
    });
    let rest = problem
        .sequence
        .iter()
        .zip(problem.running_totals())
        .enumerate()
        .map(|(i, (&delta, total))| {
            json!({
                "index": i + 1,
                "display": format_delta(delta),
                "value": delta,
                "running_total": total,
            })
        });
    Value::Array(std::iter::once(first).chain(rest).collect())
}

/// Map a problem to the payload the flash-card client renders.
///
/// `numbers` is the display list (start value, then signed deltas);
/// `steps` carries running totals for the review screen.
pub fn to_flash_payload(problem: &GeneratedProblem, config: &GeneratorConfig) -> Value {
    let numbers: Vec<String> = std::iter::once(problem.start_value.to_string())
        .chain(problem.sequence.iter().map(|&d| format_delta(d)))
        .collect();
    let formulas: Vec<&str> = config.allowed_formulas.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "FlashDrill",
        "digit_count": config.digit_count,
        "formulas": formulas,
        "requested_operations": config.operation_count,
        "truncated": problem.sequence.len() < config.operation_count,
        "numbers": numbers,
        "steps": steps(problem),
        "answer": problem.final_answer,
    })
}
