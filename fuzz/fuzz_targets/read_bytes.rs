#![no_main]

use bytes::Bytes;
use chunkio::{ByteReader, IterSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (data, plan) = input;

    // The first byte picks the chunk size, the rest the read sizes.
    let chunk_size = plan.first().map_or(1, |&b| b as usize + 1);
    let chunks: Vec<Bytes> = data.chunks(chunk_size).map(Bytes::copy_from_slice).collect();

    // Verify: bounded reads reassemble the input
    let mut reader = ByteReader::new(IterSource::new(chunks.clone()));
    let mut out = Vec::with_capacity(data.len());
    for &n in plan.iter().skip(1).cycle().take(data.len() + 1) {
        let piece = reader.read_up_to(n as usize).unwrap();
        if piece.is_empty() && n > 0 {
            break;
        }
        assert!(piece.len() <= n as usize);
        out.extend_from_slice(&piece);
    }
    out.extend_from_slice(&reader.read_all().unwrap());
    assert_eq!(out, data);
    assert_eq!(reader.position().unwrap(), data.len() as u64);

    // Verify: lines reassemble the input, each but the last ends in '\n'
    let lines = ByteReader::new(IterSource::new(chunks)).all_lines().unwrap();
    assert_eq!(lines.concat(), data);
    for line in lines.iter().rev().skip(1) {
        assert_eq!(line.last(), Some(&b'\n'));
    }
});
