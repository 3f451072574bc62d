use super::individual::Individual;
use crate::engines::evaluation::EvaluationContext;

/// Heuristic threshold guesses derived from the score distributions, ranked
/// by significance, best first. One island is seeded with the top guesses to
/// give the search a head start over purely random initialization.
///
/// Candidates per dimension: signal percentile cuts at 50/60/70/80/90%,
/// signal mean minus 0.5 and 1.0 standard deviations, and the midpoint
/// between the signal mean and the average background mean.
pub fn educated_guesses(ctx: &EvaluationContext, max_guesses: usize) -> Vec<Individual> {
    let dims = ctx.dimensions();
    let signal = ctx.signal();
    let mut guesses: Vec<Vec<f64>> = Vec::new();

    for percentile in [50.0, 60.0, 70.0, 80.0, 90.0] {
        guesses.push(
            (0..dims)
                .map(|dim| signal.column_percentile(dim, percentile))
                .collect(),
        );
    }

    for k in [0.5, 1.0] {
        guesses.push(
            (0..dims)
                .map(|dim| signal.column_mean(dim) - k * signal.column_std(dim))
                .collect(),
        );
    }

    guesses.push(
        (0..dims)
            .map(|dim| {
                let mut bg_mean_sum = 0.0;
                let mut bg_count = 0usize;
                for (table, _) in ctx.backgrounds() {
                    bg_mean_sum += table.column_mean(dim);
                    bg_count += 1;
                }
                let avg_bg_mean = bg_mean_sum / bg_count as f64;
                (signal.column_mean(dim) + avg_bg_mean) / 2.0
            })
            .collect(),
    );

    let mut individuals: Vec<Individual> = guesses
        .into_iter()
        .map(|thresholds| {
            let mut ind = Individual::new(thresholds);
            ind.set_fitness(ctx.significance(ind.thresholds()));
            ind
        })
        .collect();

    individuals.sort_by(|a, b| {
        b.fitness_or_min()
            .partial_cmp(&a.fitness_or_min())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    individuals.truncate(max_guesses);
    individuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScoreTable;

    fn context() -> EvaluationContext {
        // signal concentrated high, background concentrated low
        let signal_rows: Vec<Vec<f64>> = (0..50).map(|i| vec![0.6 + 0.008 * i as f64]).collect();
        let bg_rows: Vec<Vec<f64>> = (0..50).map(|i| vec![0.0 + 0.008 * i as f64]).collect();
        let signal = ScoreTable::new("signal", vec!["bdt".into()], signal_rows).unwrap();
        let bg = ScoreTable::new("Bqq", vec!["bdt".into()], bg_rows).unwrap();
        EvaluationContext::new(signal, 1.0, vec![(bg, 1.0)]).unwrap()
    }

    #[test]
    fn produces_at_most_max_guesses_ranked_by_fitness() {
        let ctx = context();
        let guesses = educated_guesses(&ctx, 5);
        assert_eq!(guesses.len(), 5);
        for pair in guesses.windows(2) {
            assert!(pair[0].fitness_or_min() >= pair[1].fitness_or_min());
        }
    }

    #[test]
    fn guesses_are_valid_individuals() {
        let ctx = context();
        for guess in educated_guesses(&ctx, 8) {
            assert_eq!(guess.dimensions(), 1);
            assert!(guess.has_valid_fitness());
            assert!(guess.thresholds().iter().all(|t| (0.0..=1.0).contains(t)));
        }
    }
}
