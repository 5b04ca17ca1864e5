//! Benchmarks for AES-GCM key wrapping
//!
//! Run with: cargo bench --bench key_wrap_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tap_jwe::{AesGcmKeyWrapper, JweHeaders};

/// Benchmark wrapping a 32-byte CEK for each key size
fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_gcm_kw_wrap");

    for (alg, key_len) in [("A128GCMKW", 16), ("A192GCMKW", 24), ("A256GCMKW", 32)] {
        let wrapper = AesGcmKeyWrapper::new(&vec![0x42u8; key_len], alg).unwrap();
        let headers = JweHeaders::with_algorithm(alg);
        let cek = [0xABu8; 32];

        group.bench_with_input(BenchmarkId::from_parameter(alg), &cek, |b, cek| {
            b.iter(|| wrapper.wrap(black_box(&headers), black_box(cek)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark unwrapping a 32-byte CEK for each key size
fn bench_unwrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_gcm_kw_unwrap");

    for (alg, key_len) in [("A128GCMKW", 16), ("A192GCMKW", 24), ("A256GCMKW", 32)] {
        let wrapper = AesGcmKeyWrapper::new(&vec![0x42u8; key_len], alg).unwrap();
        let mut headers = JweHeaders::with_algorithm(alg);
        let encrypted_key = wrapper.wrap_into(&mut headers, &[0xABu8; 32]).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(alg),
            &encrypted_key,
            |b, encrypted_key| {
                b.iter(|| {
                    wrapper
                        .unwrap_key(black_box(&headers), black_box(encrypted_key))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_wrap, bench_unwrap);
criterion_main!(benches);
