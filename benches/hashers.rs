use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unhash::hasher::HasherType;
use unhash::keyspace::{Alphabet, Keyspace, DEFAULT_ALPHABET};

fn candidate_batch() -> Vec<String> {
    let keyspace = Keyspace::new(Alphabet::new(DEFAULT_ALPHABET).unwrap(), 1, 8).unwrap();
    let step = keyspace.total() / 1000;
    (0..1000).map(|i| keyspace.string_at(i * step)).collect()
}

fn bench_scratch(c: &mut Criterion) {
    let mut hasher = HasherType::Scratch.create();
    let inputs = candidate_batch();

    c.bench_function("scratch_hasher", |b| {
        b.iter(|| {
            for input in black_box(&inputs) {
                hasher.hash(input.as_bytes());
            }
        })
    });
}

fn bench_oneshot(c: &mut Criterion) {
    let mut hasher = HasherType::Oneshot.create();
    let inputs = candidate_batch();

    c.bench_function("oneshot_hasher", |b| {
        b.iter(|| {
            for input in black_box(&inputs) {
                hasher.hash(input.as_bytes());
            }
        })
    });
}

fn bench_library(c: &mut Criterion) {
    let mut hasher = HasherType::Library.create();
    let inputs = candidate_batch();

    c.bench_function("sha2_hasher", |b| {
        b.iter(|| {
            for input in black_box(&inputs) {
                hasher.hash(input.as_bytes());
            }
        })
    });
}

fn bench_keyspace_enumeration(c: &mut Criterion) {
    let keyspace = Keyspace::new(Alphabet::new(DEFAULT_ALPHABET).unwrap(), 1, 8).unwrap();

    c.bench_function("keyspace_string_at", |b| {
        let mut ordinal = 0u64;
        b.iter(|| {
            ordinal = (ordinal + 7919) % keyspace.total();
            keyspace.string_at(black_box(ordinal))
        })
    });
}

criterion_group!(
    benches,
    bench_scratch,
    bench_oneshot,
    bench_library,
    bench_keyspace_enumeration
);
criterion_main!(benches);
