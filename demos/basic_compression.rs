use parallel_huffman::{CodecConfig, HuffmanCodec};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let workers: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(4);

    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.\n"
        .repeat(2000);

    let dir = std::env::temp_dir();
    let sample = dir.join("sample.txt");
    let compressed_path = dir.join("sample.huff");
    let restored_path = dir.join("decompressed.txt");
    std::fs::write(&sample, &sample_text)?;

    println!("Created sample file: {} bytes", sample_text.len());

    let codec = HuffmanCodec::new(CodecConfig::with_workers(workers));

    let compressed = codec.compress_file(&sample, &compressed_path)?;
    println!("\n--- Compression Performance ---");
    report(&compressed.timings);
    println!(
        "Compressed to {} bytes ({:.1}% of original)",
        compressed.payload.len(),
        compressed.compression_ratio().unwrap_or(0.0) * 100.0
    );

    let restored = codec.decompress_file(&compressed_path, &restored_path)?;
    println!("\n--- Decompression Performance ---");
    report(&restored.timings);

    let decompressed_text = std::fs::read_to_string(&restored_path)?;
    if sample_text == decompressed_text {
        println!("Decompression successful, data matches exactly.");
    } else {
        return Err("Decompression verification failed".into());
    }

    cleanup(&[sample.as_path(), compressed_path.as_path(), restored_path.as_path()])?;
    Ok(())
}

fn report(timings: &parallel_huffman::Timings) {
    if let Some(ms) = timings.sequential_ms() {
        println!("Single-threaded time: {:.3} ms", ms);
    }
    println!("Multi-threaded time:  {:.3} ms", timings.parallel_ms());
    if let Some(speedup) = timings.speedup() {
        println!("Speedup factor:       {:.2}x", speedup);
    }
}

fn cleanup(paths: &[&Path]) -> std::io::Result<()> {
    for path in paths {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
