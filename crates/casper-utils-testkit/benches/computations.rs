use criterion::{black_box, criterion_group, criterion_main, Criterion};

use casper_utils_core::{encode, Computation};
use casper_utils_crypto::{InvoiceHash, PublicLink, PublicLinkConfig};
use casper_utils_testkit::fixtures::{fixed_clock, link_secrets, TestKey, TestKeys};

fn bench_codec(c: &mut Criterion) {
    let data = vec![0xa5u8; 256];
    c.bench_function("encode 256 bytes", |b| b.iter(|| encode(black_box(&data))));
}

fn bench_invoice_hash(c: &mut Criterion) {
    let keys = TestKeys::new().unwrap();
    let key_ref = keys.key_ref(TestKey::Rsa1024);
    c.bench_function("invoice hash rsa-1024", |b| {
        b.iter(|| {
            let mut hash = InvoiceHash::new(key_ref.clone(), "2024-01-15;2024-01-15T10:30:00;FT 1/1;10.00;");
            hash.execute().unwrap();
            black_box(hash.produce_rows())
        })
    });
}

fn bench_public_link(c: &mut Criterion) {
    let config = PublicLinkConfig {
        clock: fixed_clock(),
    };
    c.bench_function("public link", |b| {
        b.iter(|| {
            let mut link = PublicLink::new(
                config.clone(),
                link_secrets(),
                "https://links.example",
                1,
                "invoice",
                42,
            );
            link.execute().unwrap();
            black_box(link.produce_rows())
        })
    });
}

criterion_group!(benches, bench_codec, bench_invoice_hash, bench_public_link);
criterion_main!(benches);
