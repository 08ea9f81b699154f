//! Planner configuration parameters.

use serde::{Deserialize, Serialize};

/// Planner configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// With the default the bonus is exactly `sqrt(2 ln N / n)`.
    pub exploration_constant: f64,

    /// Random seed for the planner's own choices.
    /// Same seed and iteration cap produce identical searches.
    pub seed: u64,

    /// Stop after this many iterations even if time remains (0 = unlimited).
    pub max_iterations: u32,

    /// Emit per-child diagnostic records when the search finishes.
    pub verbose: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            seed: 42,
            max_iterations: 0,
            verbose: false,
        }
    }
}

impl PlannerConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with an iteration cap.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_iterations, 0);
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PlannerConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_max_iterations(500)
            .with_verbose(true);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_iterations, 500);
        assert!(config.verbose);
    }

    #[test]
    fn test_serialization() {
        let config = PlannerConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.seed, deserialized.seed);
    }
}
