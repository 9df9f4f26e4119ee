//! Criterion benchmarks for rust_log_bridge

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_bridge::core::{format_message, parse_line, CallerLocator, FrameFilter, RawCallSite};
use rust_log_bridge::prelude::*;
use rust_log_bridge::source_map::SourceMap;
use rust_log_bridge::{BacktraceCapture, FixedCapture, StackCapture};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const V8_FRAME: &str = "    at login (http://localhost:1420/src/auth.ts:42:7)";
const FIREFOX_FRAME: &str = "login@http://localhost:1420/src/auth.ts:42:7";

fn browser_stack(internal_frames: usize) -> String {
    let mut stack = String::from("Error\n");
    for i in 0..internal_frames {
        stack.push_str(&format!(
            "    at Logger.emit{} (http://localhost:1420/src/log/logger.ts:{}:3)\n",
            i,
            i + 1
        ));
    }
    stack.push_str(V8_FRAME);
    stack
}

#[inline(never)]
fn locate_below(depth: usize, locator: &CallerLocator) -> Option<RawCallSite> {
    if depth == 0 {
        locator.locate()
    } else {
        black_box(locate_below(depth - 1, locator))
    }
}

// ============================================================================
// Caller Location Benchmarks
// ============================================================================

fn bench_parse_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_line");
    group.throughput(Throughput::Elements(1));

    group.bench_function("v8", |b| b.iter(|| black_box(parse_line(black_box(V8_FRAME)))));
    group.bench_function("firefox", |b| {
        b.iter(|| black_box(parse_line(black_box(FIREFOX_FRAME))))
    });
    group.bench_function("header", |b| b.iter(|| black_box(parse_line(black_box("Error")))));

    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for depth in [2, 10, 40] {
        let stack = browser_stack(depth);
        let locator = CallerLocator::new(Arc::new(FixedCapture::new("")), FrameFilter::new());
        group.bench_function(format!("browser_stack_{}", depth), |b| {
            b.iter(|| black_box(locator.locate_in(black_box(&stack))))
        });
    }

    group.bench_function("native_backtrace", |b| {
        let capture = BacktraceCapture::new();
        b.iter(|| black_box(capture.capture()))
    });

    // cost must not grow with frames below the caller
    let locator = CallerLocator::new(Arc::new(BacktraceCapture::new()), FrameFilter::new());
    for depth in [0, 30, 120] {
        group.bench_function(format!("native_backtrace_depth_{}", depth), |b| {
            b.iter(|| black_box(locate_below(depth, &locator)))
        });
    }

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_format_message(c: &mut Criterion) {
    #[derive(Debug, Serialize)]
    struct User {
        id: u32,
        name: String,
        roles: Vec<&'static str>,
    }

    let mut group = c.benchmark_group("format_message");
    group.throughput(Throughput::Elements(1));

    let user = User {
        id: 42,
        name: "alice".to_string(),
        roles: vec!["admin", "dev"],
    };

    group.bench_function("no_args", |b| {
        b.iter(|| black_box(format_message(black_box("User logged in"), &[])))
    });
    group.bench_function("scalar_args", |b| {
        b.iter(|| black_box(format_message("retry", &[&3, &"times", &true])))
    });
    group.bench_function("struct_arg", |b| {
        b.iter(|| black_box(format_message("user", &[&user])))
    });

    group.finish();
}

// ============================================================================
// Source Map Benchmarks
// ============================================================================

fn bench_source_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_map");

    let mappings: Vec<&str> = std::iter::repeat("AAAA,IAAI,IAAI,IAAI").take(500).collect();
    let map = format!(
        r#"{{"version":3,"sources":["src/app.ts"],"names":[],"mappings":"{}"}}"#,
        mappings.join(";")
    );
    let generated = format!(
        "bundle();\n//# sourceMappingURL=data:application/json;base64,{}\n",
        STANDARD.encode(&map)
    );

    group.bench_function("parse_inline_500_lines", |b| {
        b.iter(|| black_box(SourceMap::from_generated(black_box(&generated))))
    });

    let parsed = SourceMap::from_generated(&generated)
        .expect("valid map")
        .expect("inline map present");
    group.bench_function("lookup", |b| {
        b.iter(|| black_box(parsed.lookup(black_box(250), black_box(6))))
    });

    group.finish();
}

// ============================================================================
// End-to-End Emit Benchmarks
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(100));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("runtime");

    let (sink, receiver) = ChannelSink::new();
    let bridge = LogBridge::builder()
        .runtime(runtime.handle().clone())
        .capture(FixedCapture::new(browser_stack(3)))
        .config(BridgeConfig {
            resolve_source_maps: false,
            ..BridgeConfig::default()
        })
        .forward_to(sink)
        .build()
        .expect("bridge");
    let logger = bridge.create_logger("Bench").expect("logger");

    group.bench_function("100_messages", |b| {
        b.iter(|| {
            for i in 0..100 {
                logger.info("Message", &[&i]);
            }
            runtime.block_on(bridge.flush(Duration::from_secs(10)));
            receiver.try_iter().count()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_line,
    bench_locate,
    bench_format_message,
    bench_source_map,
    bench_emit
);
criterion_main!(benches);
