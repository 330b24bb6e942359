//! Performance benchmarks for SSE decoding and event mapping
//!
//! Tests decode throughput for different chunk sizes and stream lengths.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use orbital::sse::{parse_agent_event, FrameDecoder};
use orbital::stream::{EventMapper, MessageList};

/// Generate an SSE body of `deltas` text deltas closed by a done event
fn generate_stream(deltas: usize) -> Vec<u8> {
    let mut body = String::from(": connected\n\n");
    body.push_str("event: thinking_delta\ndata: {\"content\": \"Checking the sales table \\u2014 \"}\n\n");
    for i in 0..deltas {
        body.push_str(&format!(
            "event: text_delta\ndata: {{\"content\": \"token {} \"}}\n\n",
            i
        ));
    }
    body.push_str("event: done\ndata: {\"session_id\": \"s-1\", \"message_count\": 2}\n\n");
    body.into_bytes()
}

/// Benchmark decoding with varying network chunk sizes
fn bench_decode_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_chunk_sizes");
    let body = generate_stream(500);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [16, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new();
                    let mut count = 0;
                    for chunk in body.chunks(chunk_size) {
                        count += decoder.feed(black_box(chunk)).len();
                    }
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full decode, parse and map pipeline
fn bench_decode_and_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_and_map");

    for deltas in [10, 100, 1000].iter() {
        let body = generate_stream(*deltas);
        group.throughput(Throughput::Elements(*deltas as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_deltas", deltas)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new();
                    let mut mapper = EventMapper::new();
                    let mut messages = MessageList::new();
                    for frame in decoder.feed(black_box(body)) {
                        if let Ok(event) = parse_agent_event(frame) {
                            if let Some(mutation) = mapper.handle(event) {
                                messages.apply(mutation);
                            }
                        }
                    }
                    black_box(messages.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode_chunk_sizes, bench_decode_and_map);
criterion_main!(benches);
