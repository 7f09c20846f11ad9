use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parallel_huffman::decoder::{decode, decode_parallel};
use parallel_huffman::encoder::encode;
use parallel_huffman::{CodeTable, CodecConfig, FrequencyTable, HuffmanCodec, HuffmanTree, WireFormat};

fn generate_text(size: usize) -> Vec<u8> {
    let words: &[&[u8]] = &[
        b"the ", b"quick ", b"brown ", b"fox ", b"jumps ", b"over ", b"lazy ", b"dog. ",
        b"huffman ", b"codes ", b"are ", b"prefix ", b"free\n",
    ];
    let mut data = Vec::with_capacity(size + 16);
    let mut i = 0usize;
    while data.len() < size {
        data.extend_from_slice(words[(i * 7 + i / 3) % words.len()]);
        i += 1;
    }
    data.truncate(size);
    data
}

fn bench_frequency_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_counting");
    let data = generate_text(4 * 1024 * 1024);

    group.bench_function("sequential", |b| {
        b.iter(|| FrequencyTable::count(black_box(&data)))
    });
    for workers in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, &w| {
            b.iter(|| FrequencyTable::count_parallel(black_box(&data), w).unwrap())
        });
    }
    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");
    let data = generate_text(1024 * 1024);
    let tree = HuffmanTree::from_bytes(&data).unwrap();
    let bits = encode(&data, &CodeTable::from_tree(&tree)).unwrap();

    group.bench_function("sequential", |b| b.iter(|| decode(&tree, black_box(&bits)).unwrap()));
    for workers in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, &w| {
            b.iter(|| decode_parallel(&tree, black_box(&bits), w).unwrap())
        });
    }
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");
    let data = generate_text(256 * 1024);

    for format in [WireFormat::Ascii, WireFormat::Packed] {
        let codec = HuffmanCodec::new(
            CodecConfig::with_workers(4)
                .with_wire_format(format)
                .with_baseline(false),
        );
        group.bench_function(format!("{:?}", format), |b| {
            b.iter(|| {
                let compressed = codec.compress(black_box(&data)).unwrap();
                codec.decompress(&compressed.payload).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frequency_counting, bench_decoding, bench_round_trip);
criterion_main!(benches);
