use cutopt::data::{ScoreTable, ScoreTableLoader};
use cutopt::engines::evaluation::EvaluationContext;

fn uniform_table(name: &str, rows: usize) -> ScoreTable {
    // deterministic spread over (0, 1) in three score dimensions
    let columns = vec!["bdt_a".into(), "bdt_b".into(), "bdt_c".into()];
    let rows: Vec<Vec<f64>> = (0..rows)
        .map(|i| {
            let u = (i as f64 + 0.5) / rows as f64;
            vec![u, (u + 0.37) % 1.0, (u + 0.71) % 1.0]
        })
        .collect();
    ScoreTable::new(name, columns, rows).unwrap()
}

#[test]
fn open_cuts_match_hand_computed_significance() {
    // 1000 signal and 5000 background events all pass: 1000 / sqrt(6000)
    let signal = uniform_table("signal", 1000);
    let bg = uniform_table("Bqq", 5000);
    let ctx = EvaluationContext::new(signal, 1.0, vec![(bg, 1.0)]).unwrap();

    let expected = 1000.0 / 6000.0f64.sqrt();
    assert!((ctx.significance(&[0.0, 0.0, 0.0]) - expected).abs() < 1e-9);
}

#[test]
fn maximal_thresholds_cut_everything() {
    let signal = uniform_table("signal", 1000);
    let bg = uniform_table("Bqq", 5000);
    let ctx = EvaluationContext::new(signal, 1.0, vec![(bg, 1.0)]).unwrap();

    // comparison is strict, so thresholds of 1.0 reject every event
    assert_eq!(ctx.significance(&[1.0, 1.0, 1.0]), 0.0);
}

#[test]
fn raising_a_threshold_never_increases_survivors() {
    let rows: Vec<Vec<f64>> = (0..100).map(|i| vec![i as f64 / 100.0]).collect();
    let table = ScoreTable::new("signal", vec!["bdt".into()], rows).unwrap();

    let mut previous = usize::MAX;
    for step in 0..=10 {
        let surviving = table.surviving(&[step as f64 / 10.0]);
        assert!(surviving <= previous);
        previous = surviving;
    }
}

#[test]
fn csv_roundtrip_preserves_significance() {
    let dir = std::env::temp_dir().join("cutopt_significance_csv");
    std::fs::create_dir_all(&dir).unwrap();

    let signal_path = dir.join("signal.csv");
    let bg_path = dir.join("bqq.csv");
    std::fs::write(&signal_path, "bdt_a,bdt_b\n0.9,0.8\n0.7,0.9\n0.2,0.3\n").unwrap();
    std::fs::write(&bg_path, "bdt_a,bdt_b\n0.6,0.7\n0.1,0.2\n").unwrap();

    let signal = ScoreTableLoader::load("signal", &signal_path).unwrap();
    let bg = ScoreTableLoader::load("Bqq", &bg_path).unwrap();
    assert_eq!(signal.len(), 3);
    assert_eq!(bg.len(), 2);

    let ctx = EvaluationContext::new(signal, 2.0, vec![(bg, 3.0)]).unwrap();
    // thresholds 0.5/0.5: 2 weighted signal events x2, 1 background x3
    let expected = 4.0 / (4.0 + 3.0f64).sqrt();
    assert!((ctx.significance(&[0.5, 0.5]) - expected).abs() < 1e-12);
}
