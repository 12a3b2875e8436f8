//! Inference benchmark: feature vector → scaler → logistic classifier.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fraud_guard::features::FeatureVector;
use fraud_guard::model::{ClassifierAdapter, LogisticModel, StandardScaler};
use std::sync::Arc;

fn adapter(dim: usize) -> ClassifierAdapter {
    let scaler = StandardScaler::new(vec![0.0; dim], vec![1.0; dim]).unwrap();
    let model = LogisticModel {
        coefficients: vec![0.05; dim],
        intercept: -3.0,
    };
    ClassifierAdapter::new(Some(Arc::new(scaler)), Some(Arc::new(model)), dim).unwrap()
}

fn bench_inference_30d(c: &mut Criterion) {
    let adapter = adapter(30);
    let fv = FeatureVector::from(vec![0.1; 30]);

    c.bench_function("inference_logistic_30d", |b| {
        b.iter(|| adapter.score(black_box(&fv)))
    });
}

fn bench_inference_feature_dim(c: &mut Criterion) {
    let mut g = c.benchmark_group("inference_by_dim");
    for d in [16, 30, 64, 128] {
        let adapter = adapter(d);
        let fv = FeatureVector::from(vec![0.1; d]);
        g.bench_function(format!("dim_{}", d).as_str(), |b| {
            b.iter(|| adapter.score(black_box(&fv)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_inference_30d, bench_inference_feature_dim);
criterion_main!(benches);
