use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen::strkey;

const KEY: [u8; 32] = [0x6au8; 32];

fn bench_encode_account_id(c: &mut Criterion) {
    c.bench_function("strkey_encode_account_id", |b| {
        b.iter(|| strkey::encode_account_id(black_box(&KEY)))
    });
}

fn bench_decode_account_id(c: &mut Criterion) {
    let address = strkey::encode_account_id(&KEY);
    c.bench_function("strkey_decode_account_id", |b| {
        b.iter(|| strkey::decode_account_id(black_box(&address)))
    });
}

criterion_group!(benches, bench_encode_account_id, bench_decode_account_id);
criterion_main!(benches);
