//! End-to-end demo of the drill generator.
//!
//! Run with: `cargo run --example flash_demo`
//! Set `RUST_LOG=soroban_drill_gen=trace` to see every emitted operation.
//!
//! 1. **Lesson sheets** — one seeded sheet per legacy lesson name, so the
//!    output is reproducible.
//! 2. **Flashing numbers** — a `FlashTrainer` driven tick by tick, the way
//!    the visual trainer shows one number at a time.
//! 3. **Hints** — the legal next moves for a given running value.

use std::collections::BTreeSet;

use soroban_drill_gen::{
    available_operations, format_delta, generate_drill, training_engine::legacy::legacy_names,
    DrillRequest, FlashTrainer, FormulaCategory, GeneratedProblem, GeneratorConfig,
};
use tracing_subscriber::EnvFilter;

fn print_problem(index: usize, problem: &GeneratedProblem) {
    let numbers: Vec<String> = problem.sequence.iter().map(|&d| format_delta(d)).collect();
    println!("  {:>2}. {} {}  = {}", index + 1, problem.start_value, numbers.join(" "), problem.final_answer);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── Lesson sheets ────────────────────────────────────────────────────────
    println!();
    println!("══ One sheet per lesson (2 digits, 5 operations, seed 2024) ══");
    for name in legacy_names() {
        let config = match GeneratorConfig::from_legacy(2, name, 5) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("skipping {name}: {err}");
                continue;
            }
        };
        let request = DrillRequest::new(config).with_seed(2024).with_problem_count(3);
        match generate_drill(request) {
            Ok(sheet) => {
                println!();
                println!("  [{name}]  Sheet: {}", sheet.sheet_id);
                for (i, problem) in sheet.problems.iter().enumerate() {
                    print_problem(i, problem);
                }
            }
            Err(err) => eprintln!("  [{name}] failed: {err}"),
        }
    }

    // ── Flashing numbers ─────────────────────────────────────────────────────
    println!();
    println!("══ Flashing numbers: basic + big friend, 1 digit, 10 ticks ══");
    let config = GeneratorConfig::new(1, [FormulaCategory::Basic, FormulaCategory::BigFriendAdd], 0);
    let mut trainer = match FlashTrainer::with_seed(config, 7) {
        Ok(trainer) => trainer,
        Err(err) => {
            eprintln!("invalid trainer config: {err}");
            return;
        }
    };
    print!("  {}", trainer.start());
    for _ in 0..10 {
        match trainer.generate_next() {
            Some(delta) => print!(" {}", format_delta(delta)),
            None => {
                print!("  (no legal move)");
                break;
            }
        }
    }
    println!("  = {}", trainer.current_value());

    // ── Hints ────────────────────────────────────────────────────────────────
    println!();
    println!("══ Legal moves on 7 (all categories) ══");
    let allowed: BTreeSet<_> = FormulaCategory::ALL.into_iter().filter(|c| *c != FormulaCategory::Mixed).collect();
    for op in available_operations(7, &allowed, None) {
        let sign = if op.is_addition { '+' } else { '-' };
        let carry = if op.is_carry { " carry" } else { "" };
        println!("  {sign}{}  {}{carry}", op.magnitude, op.formula_category);
    }
}
