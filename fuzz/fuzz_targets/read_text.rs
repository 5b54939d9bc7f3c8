#![no_main]

use bytes::Bytes;
use chunkio::{ErrorPolicy, IterSource, OpenOptions, TextReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (chunk_size, data) = input;
    let chunk_size = chunk_size as usize + 1;
    let chunks: Vec<Bytes> = data.chunks(chunk_size).map(Bytes::copy_from_slice).collect();

    // Verify: strict decoding agrees with std's validation
    let options = OpenOptions::text().with_newline(chunkio::Newline::AsIs);
    let decoded = TextReader::with_options(IterSource::new(chunks.clone()), &options)
        .unwrap()
        .read_all();
    match std::str::from_utf8(&data) {
        Ok(text) => assert_eq!(decoded.unwrap(), text),
        Err(_) => assert!(decoded.is_err()),
    }

    // Verify: replacement decoding never fails and matches the lossy conversion
    let options = OpenOptions::text()
        .with_errors(ErrorPolicy::Replace)
        .with_newline(chunkio::Newline::AsIs);
    let replaced = TextReader::with_options(IterSource::new(chunks.clone()), &options)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(replaced, String::from_utf8_lossy(&data));

    // Verify: universal-newline lines never contain '\r'
    let lines = TextReader::with_options(
        IterSource::new(chunks),
        &OpenOptions::text().with_errors(ErrorPolicy::Ignore),
    )
    .unwrap()
    .all_lines()
    .unwrap();
    for line in &lines {
        assert!(!line.contains('\r'));
    }
});
