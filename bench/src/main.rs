use criterion::{criterion_group, criterion_main, Criterion};
use p4st_driver::Engine;

const SUM_AND_DOUBLE: &str = include_str!("../../app/tests/fixtures/sum_and_double.json");

fn load() -> Engine {
    Engine::load_spec_json(SUM_AND_DOUBLE).expect("fixture spec should load")
}

fn benchmark_run_relation(c: &mut Criterion) {
    let engine = load();
    c.bench_function("run Sum", |b| {
        b.iter(|| {
            let inputs = [serde_json::json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10])];
            engine.run_relation("Sum", &inputs).unwrap()
        })
    });
}

fn benchmark_call_function(c: &mut Criterion) {
    let engine = load();
    c.bench_function("call Double", |b| {
        b.iter(|| {
            let args = [serde_json::json!(21)];
            engine.call_function("Double", &args).unwrap()
        })
    });
}

fn benchmark_spec_load(c: &mut Criterion) {
    c.bench_function("load_spec_json", |b| b.iter(|| Engine::load_spec_json(SUM_AND_DOUBLE).unwrap()));
}

criterion_group!(benches, benchmark_run_relation, benchmark_call_function, benchmark_spec_load);
criterion_main!(benches);
