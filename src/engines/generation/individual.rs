use rand::Rng;

/// One candidate solution: a vector of selection thresholds, one per score
/// dimension, each clamped to [0, 1], plus a cached fitness value.
///
/// The cache is `None` whenever the thresholds changed since the last
/// evaluation; the evolutionary loop re-evaluates every invalid individual
/// before any ranking, so a valid cache is an invariant at selection time.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    thresholds: Vec<f64>,
    fitness: Option<f64>,
}

impl Individual {
    /// Wrap a threshold vector, clamping every coordinate into [0, 1].
    pub fn new(thresholds: Vec<f64>) -> Self {
        Self {
            thresholds: thresholds.into_iter().map(|t| t.clamp(0.0, 1.0)).collect(),
            fitness: None,
        }
    }

    pub fn random<R: Rng>(dimensions: usize, rng: &mut R) -> Self {
        Self {
            thresholds: (0..dimensions).map(|_| rng.gen::<f64>()).collect(),
            fitness: None,
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn dimensions(&self) -> usize {
        self.thresholds.len()
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Cached fitness for ranking; invalid individuals rank below everything.
    pub fn fitness_or_min(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn has_valid_fitness(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Overwrite one coordinate, clamping and invalidating the cache.
    pub fn set_threshold(&mut self, dim: usize, value: f64) {
        self.thresholds[dim] = value.clamp(0.0, 1.0);
        self.fitness = None;
    }

    /// Euclidean distance in threshold space.
    pub fn distance(&self, other: &Individual) -> f64 {
        self.thresholds
            .iter()
            .zip(&other.thresholds)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}
