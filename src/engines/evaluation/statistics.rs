use super::significance::EvaluationContext;

/// Event survival for one category after cut application: raw and weighted,
/// before and after. These totals are what the downstream cross-section fit
/// consumes.
#[derive(Debug, Clone)]
pub struct CategorySurvival {
    pub category: String,
    pub initial_events: usize,
    pub surviving_events: usize,
    pub initial_weighted: f64,
    pub surviving_weighted: f64,
}

impl CategorySurvival {
    pub fn survival_fraction(&self) -> f64 {
        if self.initial_events > 0 {
            self.surviving_events as f64 / self.initial_events as f64
        } else {
            0.0
        }
    }

    pub fn weighted_survival_fraction(&self) -> f64 {
        if self.initial_weighted > 0.0 {
            self.surviving_weighted / self.initial_weighted
        } else {
            0.0
        }
    }
}

impl EvaluationContext {
    /// Per-category survival statistics for a threshold vector. The signal
    /// entry comes first, followed by the backgrounds in input order.
    pub fn survival_statistics(&self, thresholds: &[f64]) -> Vec<CategorySurvival> {
        let signal = self.signal();
        let signal_weight = self.signal_weight();
        let surviving = signal.surviving(thresholds);

        let mut stats = vec![CategorySurvival {
            category: signal.name().to_string(),
            initial_events: signal.len(),
            surviving_events: surviving,
            initial_weighted: signal.len() as f64 * signal_weight,
            surviving_weighted: surviving as f64 * signal_weight,
        }];

        for (table, weight) in self.backgrounds() {
            let surviving = table.surviving(thresholds);
            stats.push(CategorySurvival {
                category: table.name().to_string(),
                initial_events: table.len(),
                surviving_events: surviving,
                initial_weighted: table.len() as f64 * weight,
                surviving_weighted: surviving as f64 * weight,
            });
        }

        stats
    }
}

/// Weighted (initial, surviving) totals over all background categories.
pub fn total_background(stats: &[CategorySurvival], signal_name: &str) -> (f64, f64) {
    stats
        .iter()
        .filter(|s| s.category != signal_name)
        .fold((0.0, 0.0), |(initial, surviving), s| {
            (initial + s.initial_weighted, surviving + s.surviving_weighted)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScoreTable;

    #[test]
    fn statistics_cover_all_categories() {
        let signal =
            ScoreTable::new("signal", vec!["bdt".into()], vec![vec![0.9], vec![0.2]]).unwrap();
        let bqq = ScoreTable::new("Bqq", vec!["bdt".into()], vec![vec![0.9]]).unwrap();
        let btt = ScoreTable::new("Btt", vec!["bdt".into()], vec![vec![0.1]]).unwrap();
        let ctx =
            EvaluationContext::new(signal, 2.0, vec![(bqq, 0.5), (btt, 4.0)]).unwrap();

        let stats = ctx.survival_statistics(&[0.5]);
        assert_eq!(stats.len(), 3);

        assert_eq!(stats[0].category, "signal");
        assert_eq!(stats[0].initial_events, 2);
        assert_eq!(stats[0].surviving_events, 1);
        assert!((stats[0].surviving_weighted - 2.0).abs() < 1e-12);
        assert!((stats[0].survival_fraction() - 0.5).abs() < 1e-12);

        assert_eq!(stats[1].category, "Bqq");
        assert_eq!(stats[1].surviving_events, 1);
        assert_eq!(stats[2].category, "Btt");
        assert_eq!(stats[2].surviving_events, 0);

        let (initial_bg, surviving_bg) = total_background(&stats, "signal");
        assert!((initial_bg - 4.5).abs() < 1e-12);
        assert!((surviving_bg - 0.5).abs() < 1e-12);
    }
}
