//! Benchmarks for chunkio.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bytes::Bytes;
use chunkio::{ByteReader, IterSource, OpenOptions, TextReader};

/// Deterministic line-oriented payload split into `chunk_size` pieces.
fn payload(size: usize, chunk_size: usize) -> Vec<Bytes> {
    let data: Vec<u8> = (0..size)
        .map(|i| if i % 61 == 60 { b'\n' } else { b'a' + (i % 26) as u8 })
        .collect();
    data.chunks(chunk_size).map(Bytes::copy_from_slice).collect()
}

fn bench_bounded_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_up_to");
    let size = 1024 * 1024; // 1 MB

    for chunk_size in [64, 4 * 1024, 64 * 1024] {
        let chunks = payload(size, chunk_size);
        group.throughput(Throughput::Bytes(size as u64));

        for read_size in [100, 8 * 1024] {
            group.bench_with_input(
                format!("chunk_{chunk_size}_read_{read_size}"),
                &chunks,
                |b, chunks| {
                    b.iter(|| {
                        let mut reader = ByteReader::new(IterSource::new(chunks.clone()));
                        let mut total = 0;
                        loop {
                            let piece = reader.read_up_to(black_box(read_size)).unwrap();
                            if piece.is_empty() {
                                break;
                            }
                            total += piece.len();
                        }
                        black_box(total)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines");
    let size = 1024 * 1024; // 1 MB
    let chunks = payload(size, 4 * 1024);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("binary", |b| {
        b.iter(|| {
            let reader = ByteReader::new(IterSource::new(chunks.clone()));
            black_box(reader.into_iter().count())
        });
    });

    group.bench_function("text_utf8", |b| {
        b.iter(|| {
            let reader = TextReader::new(IterSource::new(chunks.clone()));
            black_box(reader.into_iter().count())
        });
    });

    group.bench_function("text_latin1", |b| {
        let options = OpenOptions::text().with_encoding("latin1");
        b.iter(|| {
            let reader = TextReader::with_options(IterSource::new(chunks.clone()), &options).unwrap();
            black_box(reader.into_iter().count())
        });
    });

    // One decoded chunk serving every line
    let single: Vec<Bytes> = vec![chunks.concat().into()];
    group.bench_function("text_single_chunk", |b| {
        b.iter(|| {
            let reader = TextReader::new(IterSource::new(single.clone()));
            black_box(reader.into_iter().count())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_bounded_reads, bench_lines);
criterion_main!(benches);
