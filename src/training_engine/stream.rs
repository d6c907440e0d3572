//! Streaming ("flashing number") generation.
//!
//! [`FlashTrainer`] owns its config, RNG and [`RunningState`] across ticks and
//! emits one signed delta per call. It has no notion of sequence length; the
//! caller stops when it has shown enough numbers or when a step returns `None`.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::training_engine::{
    error::ConfigResult,
    generator::{draw_start_value, next_delta},
    models::{GeneratorConfig, RunningState},
};

#[derive(Debug, Clone)]
pub struct FlashTrainer<R: Rng = StdRng> {
    config: GeneratorConfig,
    state: RunningState,
    rng: R,
    emitted: usize,
}

impl FlashTrainer<StdRng> {
    /// Entropy-seeded trainer.
    pub fn new(config: GeneratorConfig) -> ConfigResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible trainer; identical seeds replay identical streams.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> ConfigResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FlashTrainer<R> {
    /// Trainer driven by a caller-supplied random source. State starts at zero.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config, state: RunningState::default(), rng, emitted: 0 })
    }

    /// Draw a fresh `digit_count`-digit start value, seed the state with it
    /// and return it as the first number to display.
    pub fn start(&mut self) -> i64 {
        let value = draw_start_value(&self.config, &mut self.rng);
        self.set_running_value(value);
        value
    }

    /// Next signed delta, or `None` when no legal move exists.
    pub fn generate_next(&mut self) -> Option<i64> {
        let delta = next_delta(&mut self.state, &self.config, &mut self.rng)?;
        self.emitted += 1;
        Some(delta)
    }

    /// Seed the running value for a new round. Clears the carry history.
    pub fn set_running_value(&mut self, value: i64) {
        self.state = RunningState::starting_at(value);
        self.emitted = 0;
    }

    /// Back to the zero/untouched state.
    pub fn reset(&mut self) {
        debug!(value = self.state.current_value, emitted = self.emitted, "flash trainer reset");
        self.state = RunningState::default();
        self.emitted = 0;
    }

    /// Running value and carry history as of the last emitted delta.
    pub fn state(&self) -> &RunningState {
        &self.state
    }

    /// The value a student should have in mind right now.
    pub fn current_value(&self) -> i64 {
        self.state.current_value
    }

    /// Deltas emitted since the last `start`, `set_running_value` or `reset`.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// The validated config this trainer was built with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// Yields deltas until the first step with no legal move.
impl<R: Rng> Iterator for FlashTrainer<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.generate_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::models::FormulaCategory;

    #[test]
    fn invalid_config_is_rejected() {
        let config = GeneratorConfig::new(5, [FormulaCategory::Basic], 0);
        assert!(FlashTrainer::with_seed(config, 1).is_err());
    }

    #[test]
    fn new_trainer_starts_untouched() {
        let trainer = FlashTrainer::with_seed(GeneratorConfig::new(2, [FormulaCategory::Basic], 0), 1)
            .expect("valid config");
        assert_eq!(*trainer.state(), RunningState::default());
        assert_eq!(trainer.emitted(), 0);
    }

    #[test]
    fn start_seeds_a_digit_count_value() {
        let mut trainer = FlashTrainer::with_seed(GeneratorConfig::new(3, [FormulaCategory::Mixed], 0), 2)
            .expect("valid config");
        let first = trainer.start();
        assert!((100..=999).contains(&first));
        assert_eq!(trainer.current_value(), first);
        assert_eq!(trainer.state().last_formula_category, None);
    }

    #[test]
    fn deltas_accumulate_into_current_value() {
        let mut trainer = FlashTrainer::with_seed(GeneratorConfig::new(2, [FormulaCategory::Mixed], 0), 3)
            .expect("valid config");
        let mut expected = trainer.start();
        for _ in 0..30 {
            let delta = trainer.generate_next().expect("mixed always has a legal move");
            expected += delta;
            assert_eq!(trainer.current_value(), expected);
        }
        assert_eq!(trainer.emitted(), 30);
    }

    #[test]
    fn set_running_value_and_reset() {
        let mut trainer = FlashTrainer::with_seed(GeneratorConfig::new(1, [FormulaCategory::Basic], 0), 4)
            .expect("valid config");
        trainer.set_running_value(9);
        let delta = trainer.generate_next().expect("9 can always subtract");
        assert!(delta < 0);

        trainer.reset();
        assert_eq!(*trainer.state(), RunningState::default());
        assert_eq!(trainer.emitted(), 0);
        let delta = trainer.generate_next().expect("0 can always add");
        assert!(delta > 0);
    }

    #[test]
    fn exhausted_stream_returns_none() {
        let config = GeneratorConfig::new(1, [FormulaCategory::SmallFriend], 0);
        let mut trainer = FlashTrainer::with_seed(config, 5).expect("valid config");
        trainer.set_running_value(8);
        assert_eq!(trainer.generate_next(), None);
        assert_eq!(trainer.current_value(), 8);
        assert_eq!(trainer.emitted(), 0);
    }

    #[test]
    fn iterator_is_bounded_by_caller() {
        let trainer = FlashTrainer::with_seed(GeneratorConfig::new(2, [FormulaCategory::Mixed], 0), 6)
            .expect("valid config");
        assert_eq!(trainer.take(12).count(), 12);
    }
}
