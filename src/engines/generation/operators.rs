use super::individual::Individual;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Tournament selection: best of K random candidates by cached fitness.
pub fn tournament_selection<R: Rng>(
    population: &[Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Individual {
    let mut best_idx = rng.gen_range(0..population.len());

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].fitness_or_min() > population[best_idx].fitness_or_min() {
            best_idx = idx;
        }
    }

    population[best_idx].clone()
}

/// Clones of the top `count` individuals, best first.
pub fn select_best(population: &[Individual], count: usize) -> Vec<Individual> {
    let mut sorted = population.to_vec();
    sorted.sort_by(|a, b| {
        b.fitness_or_min()
            .partial_cmp(&a.fitness_or_min())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(count);
    sorted
}

/// Blend crossover (BLX-alpha): each child coordinate is drawn on the segment
/// spanned by the parents, extended by `alpha` on both sides, then clamped.
/// Both individuals come out with invalid fitness.
pub fn blend_crossover<R: Rng>(a: &mut Individual, b: &mut Individual, alpha: f64, rng: &mut R) {
    for dim in 0..a.dimensions() {
        let x = a.thresholds()[dim];
        let y = b.thresholds()[dim];
        let gamma = (1.0 + 2.0 * alpha) * rng.gen::<f64>() - alpha;
        a.set_threshold(dim, (1.0 - gamma) * x + gamma * y);
        b.set_threshold(dim, gamma * x + (1.0 - gamma) * y);
    }
    a.invalidate_fitness();
    b.invalidate_fitness();
}

/// Mutation parameters after annealing for the current generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationParams {
    pub sigma: f64,
    pub indpb: f64,
}

impl MutationParams {
    /// Scale the base parameters by search progress and recent improvement:
    /// a fast-improving search narrows quickly, a stalled one keeps exploring
    /// longer. Both parameters floor at 0.05.
    pub fn adaptive(
        base_sigma: f64,
        base_indpb: f64,
        gen: usize,
        max_gen: usize,
        fitness_improvement: f64,
    ) -> Self {
        let progress = gen as f64 / max_gen as f64;
        let scale = if fitness_improvement > 0.05 {
            0.5 - 0.3 * progress
        } else {
            1.0 - 0.5 * progress
        };

        Self {
            sigma: (base_sigma * scale).max(0.05),
            indpb: (base_indpb * scale).max(0.05),
        }
    }
}

/// Gaussian mutation: each coordinate is perturbed with probability `indpb`
/// and clamped back into [0, 1]. Fitness is invalidated unconditionally.
pub fn gaussian_mutation<R: Rng>(ind: &mut Individual, params: MutationParams, rng: &mut R) {
    let noise = Normal::new(0.0, params.sigma).expect("sigma is positive and finite");

    for dim in 0..ind.dimensions() {
        if rng.gen::<f64>() < params.indpb {
            let value = ind.thresholds()[dim] + noise.sample(rng);
            ind.set_threshold(dim, value);
        }
    }
    ind.invalidate_fitness();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population_with_fitness(fitnesses: &[f64]) -> Vec<Individual> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut ind = Individual::new(vec![i as f64 / 10.0]);
                ind.set_fitness(f);
                ind
            })
            .collect()
    }

    #[test]
    fn tournament_covering_whole_population_picks_best() {
        let population = population_with_fitness(&[1.0, 5.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(11);
        // With a tournament much larger than the population, the best
        // individual is sampled with overwhelming probability.
        let winner = tournament_selection(&population, 64, &mut rng);
        assert_eq!(winner.fitness(), Some(5.0));
    }

    #[test]
    fn select_best_ranks_descending() {
        let population = population_with_fitness(&[1.0, 5.0, 3.0]);
        let top = select_best(&population, 2);
        assert_eq!(top[0].fitness(), Some(5.0));
        assert_eq!(top[1].fitness(), Some(3.0));
    }

    #[test]
    fn crossover_invalidates_and_clamps() {
        let mut a = Individual::new(vec![0.1, 0.9]);
        let mut b = Individual::new(vec![0.9, 0.1]);
        a.set_fitness(1.0);
        b.set_fitness(2.0);

        let mut rng = StdRng::seed_from_u64(3);
        blend_crossover(&mut a, &mut b, 0.5, &mut rng);

        assert!(!a.has_valid_fitness());
        assert!(!b.has_valid_fitness());
        for ind in [&a, &b] {
            assert!(ind.thresholds().iter().all(|t| (0.0..=1.0).contains(t)));
        }
    }

    #[test]
    fn adaptive_params_shrink_with_progress() {
        let early = MutationParams::adaptive(0.4, 0.4, 1, 40, 0.0);
        let late = MutationParams::adaptive(0.4, 0.4, 39, 40, 0.0);
        assert!(late.sigma < early.sigma);
        assert!(late.indpb < early.indpb);
    }

    #[test]
    fn adaptive_params_shrink_faster_when_improving() {
        let improving = MutationParams::adaptive(0.4, 0.4, 10, 40, 0.1);
        let stalled = MutationParams::adaptive(0.4, 0.4, 10, 40, 0.0);
        assert!(improving.sigma < stalled.sigma);
    }

    #[test]
    fn adaptive_params_floor_at_min() {
        let params = MutationParams::adaptive(0.4, 0.4, 40, 40, 0.9);
        assert!((params.sigma - 0.05).abs() < 1e-12);
        assert!((params.indpb - 0.05).abs() < 1e-12);
    }

    #[test]
    fn mutation_keeps_thresholds_in_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        let params = MutationParams { sigma: 0.4, indpb: 1.0 };
        for _ in 0..50 {
            let mut ind = Individual::random(3, &mut rng);
            gaussian_mutation(&mut ind, params, &mut rng);
            assert!(!ind.has_valid_fitness());
            assert!(ind.thresholds().iter().all(|t| (0.0..=1.0).contains(t)));
        }
    }
}
