//! Criterion benchmarks for Shroud crypto: key derivation, ECDH, addressing.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use shroud_core::constants::{DEFAULT_SALT, DOMAIN_SPENDING};
use shroud_core::ChainPrefix;
use shroud_crypto::{
    decompress, derive_stealth_keys, eth_address, hkdf_scalar, scalar_from_secret,
    shared_secret_hash,
};

const SIGNATURE: &str = "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f4041";

fn bench_hkdf(c: &mut Criterion) {
    let ikm = [0x42u8; 65];
    let mut g = c.benchmark_group("hkdf");
    g.throughput(Throughput::Elements(1));
    g.bench_function("hkdf_scalar", |b| {
        b.iter(|| black_box(hkdf_scalar(&ikm, DOMAIN_SPENDING, &DEFAULT_SALT)));
    });
    g.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut g = c.benchmark_group("derive");
    g.throughput(Throughput::Elements(1));
    g.bench_function("derive_stealth_keys", |b| {
        b.iter(|| black_box(derive_stealth_keys(SIGNATURE, ChainPrefix::Mnt)).unwrap());
    });
    g.finish();
}

fn bench_ecdh(c: &mut Criterion) {
    let keys = derive_stealth_keys(SIGNATURE, ChainPrefix::Mnt).unwrap();
    let viewing_point = decompress(&keys.viewing.public).unwrap();
    let scalar = scalar_from_secret(&keys.spending.secret);

    let mut g = c.benchmark_group("ecdh");
    g.throughput(Throughput::Elements(1));
    g.bench_function("shared_point", |b| {
        b.iter(|| black_box(viewing_point * scalar));
    });
    g.bench_function("shared_secret_hash", |b| {
        let shared = viewing_point * scalar;
        b.iter(|| black_box(shared_secret_hash(&shared)).unwrap());
    });
    g.bench_function("eth_address", |b| {
        let shared = viewing_point * scalar;
        b.iter(|| black_box(eth_address(&shared)).unwrap());
    });
    g.finish();
}

criterion_group!(benches, bench_hkdf, bench_derive, bench_ecdh);
criterion_main!(benches);
