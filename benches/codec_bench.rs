use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen::prelude::*;

fn signer_fixture() -> Signer {
    Signer::new(
        SignerKey::from_ed25519([0x6au8; 32]),
        UInt32::from(1u32),
    )
}

fn bench_signer_encode(c: &mut Criterion) {
    let signer = signer_fixture();
    c.bench_function("signer_encode", |b| {
        b.iter(|| black_box(&signer).to_bytes())
    });
}

fn bench_signer_decode(c: &mut Criterion) {
    let wire = signer_fixture().to_bytes();
    c.bench_function("signer_decode", |b| {
        b.iter(|| Signer::decode(black_box(wire.clone())))
    });
}

fn bench_int64_round_trip(c: &mut Criterion) {
    c.bench_function("int64_round_trip", |b| {
        b.iter(|| {
            let v = Int64::of(black_box(-256));
            Int64::decode(v.to_bytes())
        })
    });
}

criterion_group!(
    benches,
    bench_signer_encode,
    bench_signer_decode,
    bench_int64_round_trip
);
criterion_main!(benches);
