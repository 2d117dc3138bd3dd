use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ed25519_dalek as ed25519;

use signed_mime::*;

fn sizes() -> Vec<usize> {
    vec![100, 1000, 10000, 100000]
}

fn text_of_size(size: usize) -> String {
    let line = "The quick brown fox jumps over the lazy dog.  \t\n";
    line.repeat(size / line.len() + 1)[..size].to_string()
}

fn signed_message(key: &ed25519::Keypair, text: &str) -> Vec<u8> {
    let content_part = format!("Content-Type: text/plain; charset=utf-8\r\n\r\n{text}");
    let signature = key.sign_armored(content_part.as_bytes(), SignatureClass::Text);
    format!(
        "Content-Type: multipart/signed; micalg=pgp-sha512; \
         protocol=\"application/pgp-signature\"; boundary=\"b1\"\r\n\
         \r\n\
         --b1\r\n\
         {content_part}\r\n\
         --b1\r\n\
         Content-Type: application/pgp-signature\r\n\
         \r\n\
         {signature}\r\n\
         --b1--\r\n"
    )
    .into_bytes()
}

pub fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    for size in sizes() {
        let text = text_of_size(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(text.as_bytes()).canonicalize())
        });
    }
    group.finish();
}

pub fn bench_verify_message(c: &mut Criterion) {
    let rng = &mut rand::thread_rng();
    let key = ed25519::Keypair::generate(rng);
    let keyring = Keyring::from_keys([key.public]);

    let mut group = c.benchmark_group("verify-message");
    for size in sizes() {
        let message = signed_message(&key, &text_of_size(size));
        group.throughput(Throughput::Bytes(message.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, message| {
            b.iter(|| verify_message(black_box(message.as_slice()), Some(&keyring)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_verify_message);
criterion_main!(benches);
