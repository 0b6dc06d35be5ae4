use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tricky_core::bank::QuestionBank;
use tricky_core::model::Question;
use tricky_core::statistics::{summarize_scores, Tally};

fn make_bank(n: usize) -> QuestionBank {
    QuestionBank::from_questions(
        "bench",
        "Bench",
        (0..n).map(|i| {
            Question::new(
                format!("q{i}"),
                format!("Question {i}"),
                vec!["A".into(), "B".into(), "C".into()],
                "B",
            )
            .unwrap()
        }),
    )
    .unwrap()
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for size in [10usize, 1_000, 100_000] {
        let bank = make_bank(size);
        let mut rng = StdRng::seed_from_u64(1);
        group.bench_function(format!("bank={size},k=5"), |b| {
            b.iter(|| bank.sample(&mut rng, black_box(5)).count())
        });
    }

    group.finish();
}

fn bench_grading(c: &mut Criterion) {
    let bank = make_bank(100);
    let picks = ["A", "B", "C"];

    c.bench_function("grade_100_answers", |b| {
        b.iter(|| {
            let mut tally = Tally::default();
            for (i, q) in bank.questions().iter().enumerate() {
                tally.record(q.is_correct(black_box(picks[i % picks.len()])));
            }
            tally.percentage()
        })
    });
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_scores");

    for n in [3usize, 1_000] {
        let scores: Vec<f64> = (0..n).map(|i| (i % 101) as f64).collect();
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| summarize_scores(black_box(&scores)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sampling, bench_grading, bench_summary);
criterion_main!(benches);
