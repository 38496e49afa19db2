//! Benchmarks for token generation and classification hot paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use latchkey_auth_core::{generate_remember_token, generate_session_token};
use latchkey_types::{SessionToken, TokenKind};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_generate");

    group.bench_function("session", |b| b.iter(generate_session_token));
    group.bench_function("remember", |b| b.iter(generate_remember_token));

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let session = generate_session_token().into_inner();
    let remember = generate_remember_token().into_inner();
    let garbage = "@app-definitely-not-a-token".to_string();

    let mut group = c.benchmark_group("token_classify");

    group.bench_function("session", |b| {
        b.iter(|| TokenKind::classify(black_box(&session)))
    });
    group.bench_function("remember", |b| {
        b.iter(|| TokenKind::classify(black_box(&remember)))
    });
    group.bench_function("malformed", |b| {
        b.iter(|| TokenKind::classify(black_box(&garbage)))
    });
    group.bench_function("parse_session", |b| {
        b.iter(|| SessionToken::parse(black_box(&session)))
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_classify);
criterion_main!(benches);
