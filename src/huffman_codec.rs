use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::code_table::CodeTable;
use crate::compressed_data::CompressedData;
use crate::config::CodecConfig;
use crate::decoder::{decode, decode_parallel};
use crate::encoder::encode;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::metadata::{CompressOutput, DecompressOutput, Timings};

/// Compressor and decompressor sharing one [`CodecConfig`].
///
/// Decompression must use the same [`WireFormat`](crate::WireFormat) that
/// produced the payload.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        HuffmanCodec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn compress(&self, data: &[u8]) -> Result<CompressOutput> {
        self.config.validate()?;

        if data.is_empty() {
            log::debug!("empty input, nothing to encode");
            return Ok(CompressOutput {
                payload: Vec::new(),
                timings: Timings::default(),
                original_len: 0,
                symbol_count: 0,
            });
        }

        let workers = self.config.effective_workers(data.len());
        if workers < self.config.worker_count {
            log::warn!(
                "input of {} bytes is below the parallel threshold, using 1 worker",
                data.len()
            );
        }

        let started = Instant::now();
        let frequencies = FrequencyTable::count_parallel(data, workers)?;
        let parallel = started.elapsed();

        let sequential = if self.config.measure_baseline {
            let started = Instant::now();
            let baseline = FrequencyTable::count(data);
            let elapsed = started.elapsed();
            debug_assert_eq!(baseline, frequencies);
            Some(elapsed)
        } else {
            None
        };

        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let table = CodeTable::from_tree(&tree);
        log::debug!(
            "code table: {} symbols, {} payload bits expected",
            table.len(),
            table.encoded_bit_len(&frequencies)
        );

        let bits = encode(data, &table)?;
        let payload = CompressedData { tree, bits }.serialize(self.config.wire_format);

        let timings = Timings {
            sequential,
            parallel,
        };
        log::info!(
            "compressed {} bytes to {} bytes ({:?}, {} workers, counting {:.3} ms)",
            data.len(),
            payload.len(),
            self.config.wire_format,
            workers,
            timings.parallel_ms()
        );

        Ok(CompressOutput {
            payload,
            timings,
            original_len: data.len(),
            symbol_count: frequencies.distinct(),
        })
    }

    pub fn decompress(&self, data: &[u8]) -> Result<DecompressOutput> {
        self.config.validate()?;

        if data.is_empty() {
            log::debug!("empty payload, nothing to decode");
            return Ok(DecompressOutput {
                buffer: Vec::new(),
                timings: Timings::default(),
            });
        }

        let CompressedData { tree, bits } =
            CompressedData::deserialize(data, self.config.wire_format)?;
        let workers = self.config.effective_workers(bits.len());

        let sequential = if self.config.measure_baseline {
            let started = Instant::now();
            let baseline = decode(&tree, &bits)?;
            Some((started.elapsed(), baseline))
        } else {
            None
        };

        let started = Instant::now();
        let buffer = decode_parallel(&tree, &bits, workers)?;
        let parallel = started.elapsed();

        if let Some((_, baseline)) = &sequential {
            debug_assert_eq!(baseline, &buffer);
        }

        let timings = Timings {
            sequential: sequential.map(|(elapsed, _)| elapsed),
            parallel,
        };
        log::info!(
            "decompressed {} bytes to {} bytes ({} workers, decoding {:.3} ms)",
            data.len(),
            buffer.len(),
            workers,
            timings.parallel_ms()
        );

        Ok(DecompressOutput { buffer, timings })
    }

    /// Compress the file at `src` into `dst`.
    pub fn compress_file(&self, src: &Path, dst: &Path) -> Result<CompressOutput> {
        let data = read_input(src)?;
        let output = self.compress(&data)?;
        fs::write(dst, &output.payload)?;
        Ok(output)
    }

    /// Decompress the file at `src` into `dst`.
    pub fn decompress_file(&self, src: &Path, dst: &Path) -> Result<DecompressOutput> {
        let data = read_input(src)?;
        let output = self.decompress(&data)?;
        fs::write(dst, &output.buffer)?;
        Ok(output)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| HuffmanError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })
}
