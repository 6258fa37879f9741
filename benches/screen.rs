//! Screen benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use demo_screen::{AnsiMode, Screen};

fn new_screen() -> Screen {
    match Screen::new(40, 120, AnsiMode::Preserve) {
        Ok(screen) => screen,
        Err(e) => panic!("failed to create screen: {}", e),
    }
}

fn bench_feed_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Plain ASCII text
    let plain_text = "Hello, World! ".repeat(1000);
    group.throughput(Throughput::Bytes(plain_text.len() as u64));

    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut screen = new_screen();
            screen.feed(black_box(&plain_text));
            black_box(screen)
        })
    });

    group.finish();
}

fn bench_feed_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Fill screen and scroll
    let log: String = (0..1000)
        .map(|i| format!("Line {}: Some text content here\n", i))
        .collect();
    group.throughput(Throughput::Bytes(log.len() as u64));

    group.bench_function("scroll", |b| {
        b.iter(|| {
            let mut screen = new_screen();
            screen.feed(black_box(&log));
            black_box(screen)
        })
    });

    group.finish();
}

fn bench_feed_progress_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Carriage return redraws with color
    let frames: String = (0..=100)
        .map(|pct| format!("\r\x1b[2K\x1b[32m{:>3}%\x1b[0m [{}]", pct, "#".repeat(pct / 2)))
        .collect();
    group.throughput(Throughput::Bytes(frames.len() as u64));

    group.bench_function("progress_redraw", |b| {
        b.iter(|| {
            let mut screen = new_screen();
            screen.feed(black_box(&frames));
            black_box(screen)
        })
    });

    group.finish();
}

fn bench_feed_byte_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // UTF-8 and escapes split across small chunks
    let input = "\x1b[1;33mwarn\x1b[0m: 世界 ✓\r\n".repeat(200);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("byte_chunks", |b| {
        b.iter(|| {
            let mut screen = new_screen();
            for chunk in input.as_bytes().chunks(7) {
                screen.feed_bytes(black_box(chunk));
            }
            black_box(screen)
        })
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    let mut screen = new_screen();
    screen.feed(&"\x1b[1;31mHello\x1b[0m World ".repeat(400));

    group.bench_function("snapshot", |b| b.iter(|| black_box(screen.snapshot(0.0))));

    group.finish();
}

criterion_group!(
    benches,
    bench_feed_plain_text,
    bench_feed_scroll,
    bench_feed_progress_redraw,
    bench_feed_byte_chunks,
    bench_snapshot
);

criterion_main!(benches);
