use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skilldb_core::{CacheRecord, Candidate, Database, SearchCache};

struct NullCache;

impl SearchCache for NullCache {
    fn get(&self, _skills: &[String]) -> Option<&CacheRecord> {
        None
    }
    fn put(&mut self, _skills: &[String], _record: CacheRecord) {}
    fn on_insert(&mut self, _candidate: &Candidate) {}
}

fn synth_candidates(n: usize) -> Vec<Candidate> {
    let pool = [
        "golang", "rust", "k8s", "nestjs", "ruby", "kotlin", "java", "python", "terraform", "sql",
        "react", "graphql", "kafka", "redis", "postgres", "aws",
    ];
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let k = rng.random_range(1..=5);
            let skills: Vec<&str> = (0..k).map(|_| pool[rng.random_range(0..pool.len())]).collect();
            Candidate::new(format!("cand-{i:05}"), skills)
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let query = ["golang", "k8s", "rust"];

    let mut merged = Database::with_cache(NullCache);
    merged.add(synth_candidates(10_000));
    c.bench_function("search_merge_10k", |b| b.iter(|| merged.search(&query).is_some()));

    let mut cached = Database::new();
    cached.add(synth_candidates(10_000));
    cached.search(&query);
    c.bench_function("search_cached_10k", |b| b.iter(|| cached.search(&query).is_some()));
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
