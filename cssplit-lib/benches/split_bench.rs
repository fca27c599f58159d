extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use cssplit_lib::parser::{comments, extract};
use cssplit_lib::style::partition::partition;
use cssplit_lib::SELECTOR_LIMIT;

fn large_stylesheet(rules: usize) -> String {
    let mut css = String::with_capacity(rules * 48);
    for i in 0..rules {
        if i % 50 == 0 {
            css.push_str(&format!("/* block {} */\n", i / 50));
        }
        css.push_str(&format!(".item-{}, .alt-{} {{ width: {}px; }}\n", i, i, i));
        if i % 500 == 0 {
            css.push_str(&format!("@media print {{ .print-{} {{ display: none; }} }}\n", i));
        }
    }
    css
}

fn bench_strip_and_extract(c: &mut Criterion) {
    let css = large_stylesheet(5_000);

    c.bench_function("strip_and_extract", |b| {
        b.iter(|| extract::extract(&comments::strip_comments(&css)).unwrap())
    });
}

fn bench_partition(c: &mut Criterion) {
    let css = comments::strip_comments(&large_stylesheet(5_000));
    let sheet = extract::extract(&css).unwrap();

    c.bench_function("partition", |b| b.iter(|| partition(&sheet, SELECTOR_LIMIT)));
}

criterion_group!(benches, bench_strip_and_extract, bench_partition);
criterion_main!(benches);
