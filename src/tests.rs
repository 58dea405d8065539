use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{compress, compress_with_table, decompress, CodeTable, Compressed, FrequencyTable, HuffmanTree};

fn round_trip(input: &[u8]) {
    let (compressed, table) = compress(input);
    let table: CodeTable = table.to_string().parse().unwrap();

    assert_eq!(decompress(&compressed, &table).unwrap(), input);
}

#[test]
fn test_empty_input() {
    let (compressed, table) = compress(&[]);

    assert!(compressed.is_empty());
    assert_eq!(compressed.padding_bits(), 0);
    assert!(table.is_empty());
    assert_eq!(table.to_string(), "");
    assert!(decompress(&Compressed::default(), &CodeTable::new()).unwrap().is_empty());
}

#[test]
fn test_single_symbol_alphabet() {
    let input = [b'A'; 1000];
    let (compressed, table) = compress(&input);

    assert_eq!(table.len(), 1);
    assert_eq!(table.get(b'A').unwrap().to_string(), "0");
    assert_eq!(compressed.len(), 125);
    assert_eq!(compressed.padding_bits(), 0);
    assert!(compressed.bytes().iter().all(|&b| b == 0));
    assert_eq!(decompress(&compressed, &table).unwrap(), input);
}

#[test]
fn test_single_byte_input() {
    let (compressed, table) = compress(&[7]);

    assert_eq!(compressed.bytes(), &[0]);
    assert_eq!(compressed.padding_bits(), 7);
    assert_eq!(decompress(&compressed, &table).unwrap(), [7]);
}

#[test]
fn test_known_vector() {
    let (compressed, table) = compress(b"AAB");

    assert_eq!(table.to_string(), "65\t1\n66\t0\n");
    assert_eq!(compressed.bytes(), &[0b1100_0000]);
    assert_eq!(compressed.padding_bits(), 5);
    assert_eq!(decompress(&compressed, &table).unwrap(), b"AAB");
}

#[test]
fn test_text_compresses() {
    let input = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";
    let (compressed, _) = compress(input);

    assert!(compressed.len() < input.len());
    round_trip(input);
}

#[test]
fn test_full_alphabet_uniform() {
    let input: Vec<u8> = (0..=255u8).cycle().take(256 * 4).collect();
    let (compressed, table) = compress(&input);

    assert_eq!(table.len(), 256);
    assert_eq!(table.max_code_len(), 8);
    assert_eq!(compressed.len(), input.len());
    round_trip(&input);
}

#[test]
fn test_skewed_alphabet_long_codes() {
    // Fibonacci counts give the deepest tree for their alphabet size
    let mut input = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for s in 0..25u8 {
        input.extend(std::iter::repeat(s).take(a));
        let next = a + b;
        a = b;
        b = next;
    }

    let (_, table) = compress(&input);
    assert_eq!(table.max_code_len(), 24);
    round_trip(&input);
}

#[test]
fn test_compress_with_existing_table() {
    let (_, table) = compress(b"the table comes from here");

    let compressed = compress_with_table(b"the here comes", &table).unwrap();
    assert_eq!(decompress(&compressed, &table).unwrap(), b"the here comes");

    let err = compress_with_table(b"zebra", &table).unwrap_err();
    assert_eq!((err.symbol, err.offset), (b'z', 0));
}

#[test]
fn test_determinism() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let input: Vec<u8> = (0..5_000).map(|_| rng.gen_range(b'A'..=b'Z')).collect();

    let (c1, t1) = compress(&input);
    let (c2, t2) = compress(&input);

    assert_eq!(c1, c2);
    assert_eq!(t1, t2);
    assert_eq!(t1.to_string(), t2.to_string());
}

#[test]
fn test_random_round_trips() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let len = rng.gen_range(0..4_000);
        let alphabet = rng.gen_range(1..=255u8);
        let input: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=alphabet)).collect();
        round_trip(&input);
    }
}

proptest! {
    #[test]
    fn proptest_round_trip(data: Vec<u8>) {
        let (compressed, table) = compress(&data);
        prop_assert_eq!(decompress(&compressed, &table).unwrap(), data);
    }

    #[test]
    fn proptest_prefix_free(data: Vec<u8>) {
        let (_, table) = compress(&data);

        for (a, ca) in table.iter() {
            for (b, cb) in table.iter() {
                prop_assert!(a == b || !ca.is_prefix_of(cb));
            }
        }
    }

    #[test]
    fn proptest_table_completeness(data: Vec<u8>) {
        let (_, table) = compress(&data);
        let freq = FrequencyTable::from_bytes(&data);

        prop_assert_eq!(table.len(), freq.distinct());
        for &b in &data {
            prop_assert!(table.get(b).is_some());
        }
    }

    #[test]
    fn proptest_weight_invariant(data in proptest::collection::vec(any::<u8>(), 1..2_000)) {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(&data).entries()).unwrap();
        prop_assert_eq!(tree.leaves().iter().map(|&(_, w)| w).sum::<usize>(), data.len());
    }

    #[test]
    fn proptest_packed_length(data: Vec<u8>) {
        let (compressed, table) = compress(&data);
        let bits: usize = data.iter().map(|&b| table.get(b).map_or(0, |c| c.len())).sum();

        prop_assert_eq!(compressed.bit_len(), bits);
        prop_assert_eq!(compressed.len(), bits.div_ceil(8));
    }
}
