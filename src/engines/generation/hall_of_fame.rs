use super::individual::Individual;

/// Bounded archive of the best individuals ever offered, best first.
///
/// Size 1 per island and size 1 for the global archive in this analysis,
/// but the bound is kept general. A full archive only changes on strict
/// improvement over its worst member, so the recorded best fitness is
/// non-decreasing over the life of the archive.
#[derive(Debug, Clone)]
pub struct HallOfFame {
    members: Vec<Individual>,
    max_size: usize,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            members: Vec::new(),
            max_size,
        }
    }

    /// Offer every member of a population.
    pub fn update(&mut self, population: &[Individual]) {
        for ind in population {
            self.try_add(ind);
        }
    }

    /// Insert if the archive has room or the candidate strictly beats the
    /// current worst member. Returns true when the archive changed.
    pub fn try_add(&mut self, candidate: &Individual) -> bool {
        if !candidate.has_valid_fitness() {
            return false;
        }

        if self.members.len() < self.max_size {
            self.members.push(candidate.clone());
        } else {
            let worst = self
                .members
                .last()
                .map(|m| m.fitness_or_min())
                .unwrap_or(f64::NEG_INFINITY);
            if candidate.fitness_or_min() <= worst {
                return false;
            }
            self.members.pop();
            self.members.push(candidate.clone());
        }

        self.members.sort_by(|a, b| {
            b.fitness_or_min()
                .partial_cmp(&a.fitness_or_min())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        true
    }

    pub fn best(&self) -> Option<&Individual> {
        self.members.first()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.members.first().and_then(|m| m.fitness())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
