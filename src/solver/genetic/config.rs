//! Genetic assignment configuration.

use crate::error::{AssignError, Result};

/// Configuration for the genetic assignment solver.
///
/// # Defaults
///
/// ```
/// use u_assign::solver::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::solver::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_population_size(60)
///     .with_tournament_size(4)
///     .with_mutation_rate(0.3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// Number of candidate pairings per generation.
    pub population_size: usize,

    /// Maximum number of generations.
    pub max_generations: usize,

    /// Candidates drawn per tournament; the best becomes a parent.
    pub tournament_size: usize,

    /// Fraction of the population copied unchanged (0.0–1.0).
    ///
    /// At least one elite is always kept, so the best fitness never worsens.
    pub elite_ratio: f64,

    /// Probability of order crossover for each offspring (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of a swap mutation for each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Generations without improvement before stopping. 0 disables it.
    pub stagnation_limit: usize,

    /// Whether to evaluate offspring in parallel (needs the `parallel` feature).
    pub parallel: bool,

    /// Random seed. `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            tournament_size: 3,
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            stagnation_limit: 50,
            parallel: true,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elites kept each generation.
    pub(crate) fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elite_ratio) as usize).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(AssignError::InvalidConfig(msg.into()));
        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.elite_count() >= self.population_size {
            return invalid("elite_ratio too high: elites fill entire population");
        }
        for (name, rate) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AssignError::InvalidConfig(format!(
                    "{name} must be within 0.0..=1.0"
                )));
            }
        }
        Ok(())
    }
}
