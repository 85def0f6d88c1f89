use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gong::{Parser, Scanner};

const PROGRAM: &str = r#"
    (define fib
      (lambda (n)
        (if (< n 2)
            n
            (+ (fib (- n 1)) (fib (- n 2))))))
    (define masks '(0xFF 0b1010 3.14 "mask \"list\""))
    (print (fib 20) masks true false)
"#;

fn scanner_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize small program", |b| {
        b.iter(|| Scanner::new(black_box(PROGRAM)).scan_tokens())
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let tokens = Scanner::new(PROGRAM).scan_tokens();

    c.bench_function("parse small program", |b| {
        b.iter(|| Parser::new(black_box(tokens.clone())).parse().unwrap())
    });

    let nested = format!("{}x{}", "(".repeat(200), ")".repeat(200));
    c.bench_function("scan and parse deep nesting", |b| {
        b.iter(|| gong::read(black_box(&nested)).unwrap())
    });
}

criterion_group!(benches, scanner_benchmark, parser_benchmark);
criterion_main!(benches);
