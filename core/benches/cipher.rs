use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cube_cipher_core::cfb::{CipherVariant, CubeCipher, EngineConfig};
use cube_cipher_core::crypto::KeySchedule;
use cube_cipher_core::cube::{CubeState, Move};

fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");
    for len in [64usize, 1024, 16 * 1024] {
        let text: String = "the quick brown fox jumps over the lazy dog ".chars().cycle().take(len).collect();
        group.throughput(Throughput::Elements(len as u64));
        for variant in [CipherVariant::Classic, CipherVariant::RoundConstants] {
            let config = EngineConfig::default().with_variant(variant);
            group.bench_with_input(BenchmarkId::new(format!("{:?}", variant), len), &text, |b, text| {
                b.iter(|| {
                    let mut cipher = CubeCipher::with_config("bench", config.clone()).unwrap();
                    black_box(cipher.encrypt_sequence(text, 'B').unwrap())
                })
            });
        }
    }
    group.finish();
}

fn bench_cube(c: &mut Criterion) {
    let schedule = KeySchedule::derive("bench");
    c.bench_function("key_schedule", |b| b.iter(|| KeySchedule::derive(black_box("bench"))));
    c.bench_function("apply_and_read", |b| {
        let mut cube = CubeState::initialize(schedule.labels());
        b.iter(|| {
            cube.apply(Move::R);
            black_box(cube.sensor().unwrap())
        })
    });
}

criterion_group!(benches, bench_encrypt, bench_cube);
criterion_main!(benches);
