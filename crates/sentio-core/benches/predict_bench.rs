use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sentio_core::{Featurizer, FeaturizerConfig, TrainedModel};

fn bench_predict(c: &mut Criterion) {
    let corpus = vec![
        "Wow... Loved this place.",
        "Crust is not good.",
        "Not tasty and the texture was just nasty.",
        "The selection on the menu was great and so were the prices.",
        "Now I am getting angry and I want my damn pho.",
    ];

    let featurizer = Featurizer::fit(FeaturizerConfig::default(), corpus.iter().copied()).unwrap();
    let weights = vec![0.1; featurizer.dimension()];
    let model = TrainedModel::new(featurizer, weights, 0.0).unwrap();

    c.bench_function("featurize_single", |b| {
        b.iter(|| model.featurizer().transform(black_box(corpus[3])));
    });

    c.bench_function("predict_single", |b| {
        b.iter(|| model.predict(black_box("This place is very good")).unwrap());
    });

    c.bench_function("predict_batch_5", |b| {
        b.iter(|| model.predict_batch(black_box(&corpus)).unwrap());
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
