use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizscore_core::catalog::Trait;
use quizscore_core::model::{Answer, AnswerOption, Question};
use quizscore_core::scoring::ScoringEngine;

fn make_questions(per_trait: usize) -> Vec<Question> {
    let mut questions = Vec::new();
    for i in 0..per_trait {
        for t in Trait::ALL {
            questions.push(Question {
                id: Some(format!("{t}-{i}")),
                text: String::new(),
                measures: t,
                options: (0..5)
                    .map(|v| AnswerOption {
                        label: v.to_string(),
                        value: f64::from(v),
                    })
                    .collect(),
            });
        }
    }
    questions
}

fn make_answers(questions: &[Question]) -> Vec<Answer> {
    questions
        .iter()
        .enumerate()
        .map(|(i, _)| if i % 7 == 0 { None } else { Some((i % 5) as f64) })
        .collect()
}

fn bench_calculate_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_results");
    let engine = ScoringEngine::default();

    for per_trait in [1usize, 5, 20] {
        let questions = make_questions(per_trait);
        let answers = make_answers(&questions);
        group.bench_function(format!("{} questions", questions.len()), |b| {
            b.iter(|| engine.calculate_results(black_box(&answers), black_box(&questions)))
        });
    }

    group.finish();
}

fn bench_score_trait(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let questions = make_questions(10);
    let answers = make_answers(&questions);

    c.bench_function("score_trait/problemSolving", |b| {
        b.iter(|| {
            engine.score_trait(
                black_box(&answers),
                black_box(&questions),
                Trait::ProblemSolving,
            )
        })
    });
}

criterion_group!(benches, bench_calculate_results, bench_score_trait);
criterion_main!(benches);
