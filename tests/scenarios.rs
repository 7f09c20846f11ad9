use parallel_huffman::{
    compress, decompress, CodeTable, CodecConfig, FrequencyTable, HuffmanCodec, HuffmanError,
    HuffmanTree, WireFormat,
};

#[test]
fn aaab_end_to_end() {
    let freqs = FrequencyTable::count(b"aaab");
    assert_eq!(freqs.get(b'a'), 3);
    assert_eq!(freqs.get(b'b'), 1);

    let compressed = compress(b"aaab", 3).unwrap();
    assert_eq!(compressed.payload, b"01b1a\n1110");

    let restored = decompress(&compressed.payload, 3).unwrap();
    assert_eq!(restored.buffer, b"aaab");
}

#[test]
fn single_symbol_repeated() {
    let input = vec![b'Q'; 1000];
    let compressed = compress(&input, 4).unwrap();

    let mut expected = b"1Q\n".to_vec();
    expected.extend(std::iter::repeat(b'0').take(1000));
    assert_eq!(compressed.payload, expected);
    assert_eq!(compressed.symbol_count, 1);

    let restored = decompress(&compressed.payload, 4).unwrap();
    assert_eq!(restored.buffer, input);
}

#[test]
fn single_byte_input() {
    let compressed = compress(b"x", 2).unwrap();
    assert_eq!(compressed.payload, b"1x\n0");
    assert_eq!(decompress(&compressed.payload, 2).unwrap().buffer, b"x");
}

#[test]
fn every_byte_value() {
    let input: Vec<u8> = (0..=255u8).cycle().take(256 * 9 + 17).collect();
    for format in [WireFormat::Ascii, WireFormat::Packed] {
        let codec = HuffmanCodec::new(CodecConfig::with_workers(5).with_wire_format(format));
        let compressed = codec.compress(&input).unwrap();
        assert_eq!(compressed.symbol_count, 256);
        assert_eq!(codec.decompress(&compressed.payload).unwrap().buffer, input);
    }
}

#[test]
fn truncated_tree_is_rejected() {
    for corrupt in [&b"0"[..], b"00", b"01a", b"01a1", b"2"] {
        let err = decompress(corrupt, 2).unwrap_err();
        assert!(
            matches!(err, HuffmanError::MalformedTree { .. }),
            "{:?} gave {:?}",
            corrupt,
            err
        );
    }
}

#[test]
fn truncated_payload_is_rejected() {
    let input = b"abcdefgh".repeat(10);
    let mut payload = compress(&input, 1).unwrap().payload;
    payload.pop();
    for workers in [1, 4] {
        let err = decompress(&payload, workers).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedPayload { .. }));
    }
}

#[test]
fn payload_garbage_is_rejected() {
    let mut payload = compress(b"hello there", 1).unwrap().payload;
    payload.push(b'7');
    let err = decompress(&payload, 2).unwrap_err();
    assert!(matches!(err, HuffmanError::MalformedPayload { byte: b'7', .. }));
}

#[test]
fn format_mismatch_is_detected() {
    let packed = HuffmanCodec::new(CodecConfig::compact())
        .compress(b"format mismatch")
        .unwrap();
    let err = decompress(&packed.payload, 1).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn tree_matches_frequency_table() {
    let text = b"Peter Piper picked a peck of pickled peppers";
    let freqs = FrequencyTable::count_parallel(text, 3).unwrap();
    let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
    let table = CodeTable::from_tree(&tree);

    assert_eq!(tree.leaf_count(), freqs.distinct());
    assert_eq!(table.len(), freqs.distinct());
    assert!(table.is_prefix_free());

    let (restored, consumed) = HuffmanTree::deserialize(&tree.serialize()).unwrap();
    assert_eq!(consumed, tree.serialize().len());
    assert!(restored.is_isomorphic(&tree));
}

#[test]
fn stats_are_reported() {
    let text = b"timing ".repeat(500);
    let compressed = compress(&text, 2).unwrap();
    assert!(compressed.timings.sequential_ms().is_some());
    assert!(compressed.timings.parallel_ms() >= 0.0);

    let restored = decompress(&compressed.payload, 2).unwrap();
    assert!(restored.timings.sequential.is_some());
    assert_eq!(restored.buffer, text);
}
