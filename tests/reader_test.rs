// Integration tests for the file-like reader API
// Tests cover: mode validation, bounded reads, lines, decoding, close semantics

use std::io::{self, BufRead, Read};

use bytes::Bytes;
use chunkio::{
    BinaryIteration, ByteReader, Chunk, ErrorPolicy, IterError, IterSource, Mode, Newline,
    OpenOptions, StreamAdapter, Terminator, TextReader, TryIterSource, open,
};

type Parts = IterSource<std::vec::IntoIter<&'static [u8]>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn parts(chunks: &[&'static [u8]]) -> Parts {
    IterSource::new(chunks.to_vec())
}

fn open_mode(chunks: &[&'static [u8]], mode: &str) -> StreamAdapter<Parts> {
    open(parts(chunks), OpenOptions::from_mode(mode).unwrap()).unwrap()
}

const BINARY_CHUNKS: &[&[u8]] = &[
    b"\x01\x02\x03\x04\x05",
    b"abcde",
    b"fghij",
    b"klmno",
    b"qrstu",
    b"vwxyz",
    b"\x06\x07\x08\x09\x10",
];

// Nine lines yielded in chunks that ignore line boundaries.
const TEXT_CHUNKS: &[&str] = &[
    "this is a line\n",
    "",
    "",
    "_a",
    "another line\n",
    "another line1\n",
    "another line2\n",
    "another line_",
    "a",
    "aaaaaaa\nbbbbbbbb",
    "_",
    "1",
    "2",
    "3",
    "4",
    "5",
    "_line line line another line actually\n",
    "another line\n",
    "ending line\n",
    "actual ending line no trailing newline",
];

fn text_source() -> Parts {
    IterSource::new(TEXT_CHUNKS.iter().map(|s| s.as_bytes()).collect::<Vec<_>>())
}

// ============================================================================
// Mode Validation Tests
// ============================================================================

#[test]
fn test_invalid_modes() {
    for mode in ["", "abc", "rtb", "rr", "tb", "w", "rw"] {
        let err = OpenOptions::from_mode(mode).unwrap_err();
        assert!(
            matches!(err, IterError::InvalidArgument { .. }),
            "mode {mode:?} should be rejected"
        );
    }
}

#[test]
fn test_valid_modes() {
    assert_eq!(OpenOptions::from_mode("r").unwrap().mode(), Mode::Text);
    assert_eq!(OpenOptions::from_mode("rt").unwrap().mode(), Mode::Text);
    assert_eq!(OpenOptions::from_mode("tr").unwrap().mode(), Mode::Text);
    assert_eq!(OpenOptions::from_mode("rb").unwrap().mode(), Mode::Binary);
    assert_eq!(OpenOptions::from_mode("br").unwrap().mode(), Mode::Binary);
}

#[test]
fn test_binary_mode_rejects_text_settings() {
    let rejected = [
        OpenOptions::binary().with_encoding("utf-8"),
        OpenOptions::binary().with_errors(ErrorPolicy::Ignore),
        OpenOptions::binary().with_newline(Newline::Terminator(Terminator::Lf)),
    ];
    for options in rejected {
        let err = open(parts(&[]), options).unwrap_err();
        assert!(matches!(err, IterError::InvalidArgument { .. }));
    }
}

#[test]
fn test_unknown_encoding_and_newline() {
    let err = open(parts(&[]), OpenOptions::text().with_encoding("no-such-codec")).unwrap_err();
    assert!(err.to_string().contains("no-such-codec"));

    assert!(Newline::parse(Some("\n\n")).is_err());
    assert!("shout".parse::<ErrorPolicy>().is_err());
}

// ============================================================================
// Binary Reading Tests
// ============================================================================

#[test]
fn test_binary_reading_sequence() {
    init_tracing();
    let data: Vec<u8> = BINARY_CHUNKS.concat();
    let mut stream = open_mode(BINARY_CHUNKS, "rb");

    assert!(stream.readable());
    assert!(!stream.seekable());
    assert!(!stream.writable());

    let mut cnt = 0usize;
    for amt in [0i64, 1, 2, 3, 4, 5, 10, 1, 1, 0] {
        let d = stream.read(amt).unwrap();
        let amt = amt as usize;
        assert_eq!(d.len(), amt);
        assert_eq!(d.as_bytes(), &data[cnt..cnt + amt]);
        cnt += amt;
        assert_eq!(stream.position().unwrap(), cnt as u64);
    }

    assert_eq!(stream.read(-1).unwrap().as_bytes(), &data[cnt..]);
    assert!(stream.read(-1).unwrap().is_empty());
    assert_eq!(stream.position().unwrap(), data.len() as u64);
}

#[test]
fn test_empty_chunks_do_not_end_stream() {
    let mut reader = ByteReader::new(parts(&[
        b"1", b"", b"", b"", b"", b"", b"", b"", b"2", b"3", b"", b"", b"", b"", b"", b"", b"4",
    ]));
    let mut out = Vec::new();
    loop {
        let b = reader.read_up_to(1).unwrap();
        if b.is_empty() {
            break;
        }
        out.push(b);
    }

    assert_eq!(out.len(), 4);
    assert_eq!(out.concat(), b"1234");
}

#[test]
fn test_empty_source() {
    let mut stream = open_mode(&[], "rb");
    assert!(stream.read(5).unwrap().is_empty());
    assert!(stream.read_line().unwrap().is_empty());
    assert!(stream.read_lines().unwrap().is_empty());

    let mut stream = open_mode(&[], "r");
    assert_eq!(stream.read(-1).unwrap(), Chunk::from(""));
}

#[test]
fn test_binary_chunk_iteration() {
    let options = OpenOptions::binary().with_binary_iteration(BinaryIteration::Chunks);
    let stream = open(parts(&[b"a\nb", b"", b"c\n"]), options).unwrap();
    let items: Vec<Chunk> = stream.into_iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(items, vec![Chunk::from(&b"a\nb"[..]), Chunk::from(&b"c\n"[..])]);
}

#[test]
fn test_byte_reader_with_std_consumers() {
    let reader = ByteReader::new(parts(&[b"alpha\nbe", b"ta\r\ngam", b"ma"]));
    let lines: Vec<String> = reader.lines().collect::<io::Result<_>>().unwrap();
    assert_eq!(lines, vec!["alpha", "beta", "gamma"]);

    let mut reader = ByteReader::new(parts(BINARY_CHUNKS));
    let mut out = Vec::new();
    io::copy(&mut reader, &mut out).unwrap();
    assert_eq!(out, BINARY_CHUNKS.concat());
}

#[test]
fn test_source_error_as_io_error() {
    let items: Vec<Result<&'static [u8], io::Error>> = vec![
        Ok(&b"abc"[..]),
        Err(io::Error::new(io::ErrorKind::TimedOut, "slow producer")),
    ];
    let mut reader = ByteReader::new(TryIterSource::new(items));
    let mut out = Vec::new();
    let err = reader.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    assert_eq!(err.to_string(), "slow producer");
}

// ============================================================================
// Text Reading Tests
// ============================================================================

#[test]
fn test_read_text_across_chunks_and_lines() {
    init_tracing();
    let real: String = TEXT_CHUNKS.concat();

    let mut stream = open(text_source(), OpenOptions::text().with_encoding("utf-8")).unwrap();
    assert_eq!(stream.read(10).unwrap(), Chunk::from(&real[..10]));
    assert_eq!(stream.read(10).unwrap(), Chunk::from(&real[10..20]));

    let lines: Vec<Chunk> = open(text_source(), OpenOptions::text())
        .unwrap()
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    let read_lines = open(text_source(), OpenOptions::text())
        .unwrap()
        .read_lines()
        .unwrap();
    assert_eq!(lines, read_lines);

    assert_eq!(lines.len(), 9);
    assert_eq!(lines.len(), real.lines().count());
    let joined: String = lines.iter().filter_map(Chunk::as_str).collect();
    assert_eq!(joined, real);
}

#[test]
fn test_readline_with_ascii_encoding() {
    let mut stream = open(
        parts(&[b"He", b"llo\nWo", b"rld\n"]),
        OpenOptions::text().with_encoding("ascii"),
    )
    .unwrap();
    assert_eq!(stream.read_line().unwrap(), Chunk::from("Hello\n"));
    assert_eq!(stream.read_line().unwrap(), Chunk::from("World\n"));
    assert_eq!(stream.read_line().unwrap(), Chunk::from(""));
}

#[test]
fn test_split_euro_sign() {
    let mut stream = open_mode(&[b"\xe2", b"\x82\xac"], "rt");
    assert_eq!(stream.read(-1).unwrap(), Chunk::from("€"));
}

#[test]
fn test_strict_error_reports_offset() {
    let mut reader = TextReader::new(parts(&[b"abc", b"d\xffe"]));
    let err = reader.read_all().unwrap_err();
    match err {
        IterError::Decoding {
            encoding,
            offset,
            truncated,
        } => {
            assert_eq!(encoding, "UTF-8");
            assert_eq!(offset, 4);
            assert!(!truncated);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decoding_error_as_io_error() {
    let err: io::Error = TextReader::new(parts(&[b"\xe2\x82"]))
        .read_all()
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_replace_policy_from_str() {
    let policy: ErrorPolicy = "replace".parse().unwrap();
    let mut stream = open(parts(&[b"ok\xff"]), OpenOptions::text().with_errors(policy)).unwrap();
    assert_eq!(stream.read(-1).unwrap(), Chunk::from("ok\u{FFFD}"));
}

#[test]
fn test_newline_policies() {
    let chunks: &[&'static [u8]] = &[b"a\r", b"\nb\r", b"c\nd"];

    let universal = open(parts(chunks), OpenOptions::text()).unwrap().read_lines().unwrap();
    assert_eq!(
        universal,
        vec![Chunk::from("a\n"), Chunk::from("b\n"), Chunk::from("c\n"), Chunk::from("d")]
    );

    let as_is = open(parts(chunks), OpenOptions::text().with_newline(Newline::parse(Some("")).unwrap()))
        .unwrap()
        .read_lines()
        .unwrap();
    assert_eq!(
        as_is,
        vec![Chunk::from("a\r\n"), Chunk::from("b\r"), Chunk::from("c\n"), Chunk::from("d")]
    );

    let cr_only = open(
        parts(chunks),
        OpenOptions::text().with_newline(Newline::Terminator(Terminator::Cr)),
    )
    .unwrap()
    .read_lines()
    .unwrap();
    assert_eq!(
        cr_only,
        vec![Chunk::from("a\r"), Chunk::from("\nb\r"), Chunk::from("c\nd")]
    );
}

#[test]
fn test_utf16_text() {
    let mut stream = open(
        parts(&[b"h\x00i", b"\x00\n\x00"]),
        OpenOptions::text().with_encoding("utf-16le"),
    )
    .unwrap();
    assert_eq!(stream.read_line().unwrap(), Chunk::from("hi\n"));
    assert!(stream.read_line().unwrap().is_empty());
}

#[test]
fn test_many_lines_from_one_large_chunk() {
    let line = "line of text 00000\n";
    let big = line.repeat(25_000);
    let mut reader = TextReader::new(IterSource::new(vec![big.into_bytes()]));

    let lines = reader.all_lines().unwrap();
    assert_eq!(lines.len(), 25_000);

    let total_len: usize = lines.iter().map(String::len).sum();
    let total_capacity: usize = lines.iter().map(String::capacity).sum();
    assert_eq!(total_len, line.len() * 25_000);
    assert!(
        total_capacity <= total_len * 2,
        "lines hold {total_capacity} bytes for {total_len} bytes of text"
    );
}

#[test]
fn test_small_reads_from_one_large_chunk() {
    let big = "ab€".repeat(50_000);
    let mut stream = open(
        IterSource::new(vec![big.clone().into_bytes()]),
        OpenOptions::text(),
    )
    .unwrap();

    let mut out = String::new();
    loop {
        let piece = stream.read(7).unwrap().into_text().unwrap();
        if piece.is_empty() {
            break;
        }
        assert!(piece.capacity() < 64);
        out.push_str(&piece);
    }
    assert_eq!(out, big);
    assert_eq!(stream.position().unwrap(), 150_000);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_close_semantics() {
    for mode in ["rb", "rt"] {
        let mut stream = open_mode(&[b"12345"], mode);
        assert!(stream.read(0).unwrap().is_empty());
        assert_eq!(stream.read(1).unwrap().as_bytes(), b"1");
        assert!(!stream.is_closed());

        stream.close();
        assert!(stream.is_closed());

        let err = stream.read(-1).unwrap_err();
        assert!(err.is_closed());
        assert!(err.to_string().contains("closed"));
        assert!(stream.position().unwrap_err().is_closed());
        assert!(stream.read_line().unwrap_err().is_closed());

        stream.close();
        assert!(stream.is_closed());
    }
}

#[test]
fn test_borrowed_source_survives_close() {
    let mut source = IterSource::new(vec![&b"ab"[..], &b"cd"[..]]);
    {
        let options = OpenOptions::binary().with_owns_source(false);
        let mut reader = ByteReader::with_options(&mut source, &options).unwrap();
        assert_eq!(reader.read_up_to(1).unwrap(), Bytes::from_static(b"a"));
        reader.close();
    }
    // The first chunk was consumed by the reader; the rest is still there.
    let rest = ByteReader::new(source).read_all().unwrap();
    assert_eq!(rest, Bytes::from_static(b"cd"));
}

#[test]
fn test_owned_source_is_closed() {
    let mut source = IterSource::new(vec![&b"ab"[..], &b"cd"[..]]);
    {
        let mut reader = ByteReader::new(&mut source);
        assert_eq!(reader.read_up_to(1).unwrap(), Bytes::from_static(b"a"));
    }
    let rest = ByteReader::new(source).read_all().unwrap();
    assert!(rest.is_empty());
}
