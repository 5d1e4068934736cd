use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dazzler::config::{PlayConfig, ScoreConfig};
use dazzler::model::{Chart, Key, Note};
use dazzler::play::{Autoplay, JudgmentEngine, ScoreEngine, Session};

fn dense_chart(note_count: usize) -> Chart {
    let notes = (0..note_count)
        .map(|i| {
            let key = Key::all()[i % Key::all().len()];
            let beat = i as f64 * 0.25;
            if i % 8 == 7 {
                Note::hold(key, beat, 0.5)
            } else {
                Note::tap(key, beat)
            }
        })
        .collect();
    Chart::from_unsorted(notes).unwrap()
}

fn session_benchmark(c: &mut Criterion) {
    let chart = dense_chart(2000);
    let mut group = c.benchmark_group("session");

    group.bench_function("autoplay_full_chart", |b| {
        b.iter(|| {
            let mut session = Session::new(chart.clone(), PlayConfig::default()).unwrap();
            let mut autoplay = Autoplay::new(&chart, 0.0);
            session.start(180.0, 0.0).unwrap();
            let step = 1.0 / 240.0;
            while !session.is_finished() {
                let next = session.current_beat() + step / session.clock().crotchet();
                let edges = autoplay.poll(next);
                black_box(session.frame(step, &edges));
            }
            black_box(session.snapshot())
        });
    });

    group.bench_function("idle_frames", |b| {
        let mut session = Session::new(chart.clone(), PlayConfig::default()).unwrap();
        session.start(180.0, 0.0).unwrap();
        b.iter(|| {
            black_box(session.frame(black_box(0.0), &[]));
        });
    });

    group.finish();
}

fn judgment_benchmark(c: &mut Criterion) {
    let chart = dense_chart(2000);

    c.bench_function("judgment_sweep", |b| {
        b.iter(|| {
            let mut engine = JudgmentEngine::new(&chart, 0.5);
            let mut beat = 0.0;
            while beat < 510.0 {
                black_box(engine.update(&chart, beat));
                beat += 0.125;
            }
        });
    });
}

fn score_benchmark(c: &mut Criterion) {
    c.bench_function("score_record_hit", |b| {
        let diffs = [0.0, -0.2, 0.4, 0.05, -0.6];
        let mut score = ScoreEngine::new(ScoreConfig::default());
        let mut i = 0;
        b.iter(|| {
            let tier = score.record_hit(black_box(diffs[i % diffs.len()]));
            black_box(tier);
            i += 1;
        });
    });
}

criterion_group!(
    benches,
    session_benchmark,
    judgment_benchmark,
    score_benchmark
);
criterion_main!(benches);
