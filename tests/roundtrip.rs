use std::io::Cursor;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffman_coding_rust::{
    Error, Header, MAGIC, decode, decode_file, decode_from_stream, encode, encode_file,
    encode_to_stream,
};

fn random_bytes(length: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length).map(|_| rng.random_range(0..255u8)).collect()
}

fn payload_len(container: &[u8]) -> usize {
    let mut read = container;
    let header = Header::read(&mut read).unwrap();
    container.len() - header.byte_size()
}

fn assert_round_trip(data: &[u8]) {
    let container = encode(data);
    assert_eq!(&container[..4], &MAGIC);

    let decoded = decode(&container).unwrap();
    assert_eq!(decoded.len(), data.len());
    assert_eq!(decoded, data);
}

#[test]
fn boundary_lengths() {
    for length in [0, 1, 2, 3, 75, 127, 128, 129, 254, 255, 1023, 1024, 1025, 4097] {
        assert_round_trip(&random_bytes(length, length as u64 + 1));
    }
}

#[test]
fn payload_spanning_several_read_chunks() {
    // skewed data so that codes have very different lengths
    let mut rng = StdRng::seed_from_u64(7);
    let data: Vec<u8> = (0..20_000)
        .map(|_| {
            let roll: u32 = rng.random_range(0..100);
            match roll {
                0..=59 => b'e',
                60..=84 => b't',
                85..=97 => rng.random_range(b'a'..=b'z'),
                _ => rng.random(),
            }
        })
        .collect();

    let container = encode(&data);
    assert!(payload_len(&container) > 2 * 1024);
    assert_eq!(decode(&container).unwrap(), data);
}

#[test]
fn empty_input() {
    assert_round_trip(&[]);
}

#[test]
fn single_repeated_byte() {
    for count in [1usize, 8, 1000, 1001] {
        let data = vec![0xEE; count];
        let container = encode(&data);

        assert_eq!(payload_len(&container), count.div_ceil(8));
        assert_eq!(decode(&container).unwrap(), data);
    }
}

#[test]
fn full_alphabet() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 9 + 17).collect();
    assert_round_trip(&data);
}

#[test]
fn two_symbols_cost_one_bit_each() {
    let data: Vec<u8> = std::iter::repeat([7u8, 200]).take(500).flatten().collect();
    let container = encode(&data);

    assert_eq!(payload_len(&container), 125);
    assert_eq!(decode(&container).unwrap(), data);
}

#[test]
fn nearly_uniform_alphabet_still_decodes() {
    let mut data: Vec<u8> = (0..255u8).collect();
    data.extend_from_slice(&[0, 0, 0, 0]);
    assert_eq!(data.len(), 259);

    assert_round_trip(&data);
}

#[test]
fn codes_longer_than_eight_bits() {
    // fibonacci counts force a degenerate, very deep tree
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..16u8 {
        data.extend(std::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }

    let container = encode(&data);
    let mut read = container.as_slice();
    let header = Header::read(&mut read).unwrap();
    let longest = header.code_table.values().map(Vec::len).max().unwrap();
    assert_eq!(longest, 15);

    assert_eq!(decode(&container).unwrap(), data);
}

#[test]
fn identical_input_gives_identical_container() {
    let data = random_bytes(3000, 42);
    assert_eq!(encode(&data), encode(&data));
}

#[test]
fn text_compresses() {
    let text = "It was the best of times, it was the worst of times, it was the age of \
                wisdom, it was the age of foolishness, it was the epoch of belief, it was \
                the epoch of incredulity, it was the season of Light, it was the season of \
                Darkness, it was the spring of hope, it was the winter of despair."
        .repeat(20);

    let container = encode(text.as_bytes());
    assert!(container.len() < text.len());
    assert_eq!(decode(&container).unwrap(), text.as_bytes());
}

#[test]
fn streams() {
    let data = random_bytes(1500, 3);

    let mut sink = Cursor::new(Vec::new());
    encode_to_stream(&data, &mut sink).unwrap();

    let mut source = Cursor::new(sink.into_inner());
    assert_eq!(decode_from_stream(&mut source).unwrap(), data);
}

#[test]
fn files() {
    let path = std::env::temp_dir().join(format!("huffman-roundtrip-{}.huff", std::process::id()));
    let data = random_bytes(777, 9);

    encode_file(&data, &path).unwrap();
    let decoded = decode_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(decoded.unwrap(), data);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("huffman-roundtrip-does-not-exist.huff");
    assert!(matches!(decode_file(path), Err(Error::Io(_))));
}

#[test]
fn garbage_is_rejected() {
    assert!(matches!(decode(b"not a container"), Err(Error::BadMagic(_))));
    assert!(matches!(decode(&[]), Err(Error::TruncatedHeader(_))));
}
