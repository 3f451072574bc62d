use super::individual::Individual;

/// Niche fitness sharing: individuals crowded within `sigma_share` of each
/// other get their cached fitness divided by (1 + sharing factor), lowering
/// selection pressure on near-duplicates without discarding them.
///
/// The shared value overwrites the fitness cache; callers treat it as
/// selection bookkeeping for the current generation only, never as the
/// evaluator's canonical output.
pub fn apply_fitness_sharing(population: &mut [Individual], sigma_share: f64) {
    let shared: Vec<f64> = population
        .iter()
        .enumerate()
        .map(|(i, ind_i)| {
            let mut sharing_factor = 0.0;
            for (j, ind_j) in population.iter().enumerate() {
                if i == j {
                    continue;
                }
                let distance = ind_i.distance(ind_j);
                if distance < sigma_share {
                    sharing_factor += 1.0 - (distance / sigma_share).powi(2);
                }
            }
            ind_i.fitness_or_min() / (1.0 + sharing_factor)
        })
        .collect();

    for (ind, fitness) in population.iter_mut().zip(shared) {
        ind.set_fitness(fitness);
    }
}
