use super::island::Island;
use super::operators::select_best;
use crate::config::IslandModelConfig;

/// Mean pairwise Euclidean distance in threshold space. 0.0 for populations
/// with fewer than two members.
pub fn population_diversity(island: &Island) -> f64 {
    let population = island.population();
    let mut total = 0.0;
    let mut count = 0usize;
    for i in 0..population.len() {
        for j in (i + 1)..population.len() {
            total += population[i].distance(&population[j]);
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Migration rate for one island: the base rate scaled up as diversity drops,
/// clamped to the configured bounds. Homogeneous islands export more.
pub fn migration_rate(diversity: f64, config: &IslandModelConfig) -> f64 {
    let rate = config.base_migration_rate * (1.0 + (1.0 - diversity));
    rate.clamp(config.min_migration_rate, config.max_migration_rate)
}

/// Ring migration: each island sends clones of its best individuals to its
/// successor, replacing the successor's worst. Transfers run in ring order,
/// so an island forwards migrants it received this round. Sizes are
/// preserved and at least one migrant always moves per edge.
pub fn migrate_ring(islands: &mut [Island], config: &IslandModelConfig) {
    let n = islands.len();
    if n < 2 {
        return;
    }

    let rates: Vec<f64> = islands
        .iter()
        .map(|island| migration_rate(population_diversity(island), config))
        .collect();

    for source in 0..n {
        let dest = (source + 1) % n;
        let island_size = islands[source].population().len();
        let n_migrants = ((island_size as f64 * rates[source]) as usize).max(1);

        let migrants = select_best(islands[source].population(), n_migrants);
        log::info!(
            "migration: island {} -> island {}: {} migrants (rate {:.2})",
            islands[source].id(),
            islands[dest].id(),
            migrants.len(),
            rates[source]
        );
        islands[dest].replace_worst(migrants);
    }
}
