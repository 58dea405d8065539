use crate::{error::CodeTableFormatError, frequency::FrequencyTable, tree::HuffmanTree};

use super::{Code, CodeTable, ParseCodeError};

fn table_of(bytes: &[u8]) -> CodeTable {
    let entries = FrequencyTable::from_bytes(bytes).entries();
    CodeTable::from_tree(&HuffmanTree::build(&entries).unwrap())
}

fn code(s: &str) -> Code {
    s.parse().unwrap()
}

fn assert_prefix_free(table: &CodeTable) {
    for (a, ca) in table.iter() {
        for (b, cb) in table.iter() {
            if a != b {
                assert!(!ca.is_prefix_of(cb), "{} ({:?}) prefixes {} ({:?})", a, ca, b, cb);
            }
        }
    }
}

#[test]
fn test_code_parse_and_display() {
    let c = code("0110");

    assert_eq!(c.bits(), &[false, true, true, false]);
    assert_eq!(c.to_string(), "0110");
    assert_eq!("".parse::<Code>(), Err(ParseCodeError::Empty));
    assert_eq!("01x".parse::<Code>(), Err(ParseCodeError::InvalidBit('x')));
}

#[test]
fn test_is_prefix_of() {
    assert!(code("01").is_prefix_of(&code("011")));
    assert!(code("01").is_prefix_of(&code("01")));
    assert!(!code("011").is_prefix_of(&code("01")));
    assert!(!code("10").is_prefix_of(&code("011")));
}

#[test]
fn test_single_symbol_gets_code_zero() {
    let table = table_of(&[b'A'; 1000]);

    assert_eq!(table.len(), 1);
    assert_eq!(table.get(b'A'), Some(&code("0")));
}

#[test]
fn test_two_symbols() {
    let table = table_of(b"AAB");

    assert_eq!(table.get(b'B'), Some(&code("0")));
    assert_eq!(table.get(b'A'), Some(&code("1")));
}

#[test]
fn test_generated_codes() {
    // c=1 d=1 b=2 r=2 a=5
    // (c,d)=2 goes after r: [b, r, cd, a]
    // (b,r)=4: [cd, br, a]   (cd,br)=6: [a, cdbr]   root=(a, cdbr)
    let table = table_of(b"abracadabra");

    assert_eq!(table.get(b'a'), Some(&code("0")));
    assert_eq!(table.get(b'c'), Some(&code("100")));
    assert_eq!(table.get(b'd'), Some(&code("101")));
    assert_eq!(table.get(b'b'), Some(&code("110")));
    assert_eq!(table.get(b'r'), Some(&code("111")));
    assert_eq!(table.max_code_len(), 3);
}

#[test]
fn test_completeness_and_prefix_free() {
    let input: Vec<u8> = (0..20_000u32).map(|i| ((i * 31) ^ (i >> 3)) as u8 % 200).collect();
    let table = table_of(&input);
    let freq = FrequencyTable::from_bytes(&input);

    assert_eq!(table.len(), freq.distinct());
    for b in 0..=255u8 {
        assert_eq!(table.contains(b), freq.count(b) > 0);
    }
    assert_prefix_free(&table);
}

#[test]
fn test_text_format() {
    let table = table_of(b"AAB");

    assert_eq!(table.to_string(), "65\t1\n66\t0\n");
}

#[test]
fn test_text_round_trip() {
    let table = table_of(b"a fairly ordinary sentence, with punctuation; and \x00 \xff bytes");
    let parsed: CodeTable = table.to_string().parse().unwrap();

    assert_eq!(parsed, table);
}

#[test]
fn test_parse_is_order_independent() {
    let parsed: CodeTable = "66\t0\r\n\n65\t10\n67\t11\n".parse().unwrap();
    let reordered: CodeTable = "67\t11\n65\t10\n66\t0".parse().unwrap();

    assert_eq!(parsed, reordered);
    assert_eq!(parsed.get(b'A'), Some(&code("10")));
}

#[test]
fn test_parse_empty() {
    let parsed: CodeTable = "".parse().unwrap();

    assert!(parsed.is_empty());
    assert_eq!(parsed.max_code_len(), 0);
}

#[test]
fn test_parse_field_count() {
    assert_eq!(
        "65\t0\n66\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::FieldCount { line: 2, found: 1 })
    );
    assert_eq!(
        "65\t0\t1\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::FieldCount { line: 1, found: 3 })
    );
    assert_eq!(
        "65 0\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::FieldCount { line: 1, found: 1 })
    );
}

#[test]
fn test_parse_invalid_symbol() {
    for bad in ["256", "-1", "+5", "x", " 65", ""] {
        let text = format!("{}\t0\n", bad);
        assert_eq!(
            text.parse::<CodeTable>(),
            Err(CodeTableFormatError::InvalidSymbol { line: 1, value: bad.to_owned() }),
            "{:?}",
            bad
        );
    }
}

#[test]
fn test_parse_empty_code() {
    assert_eq!(
        "65\t\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::EmptyCode { line: 1 })
    );
}

#[test]
fn test_parse_invalid_bit() {
    assert_eq!(
        "65\t0\n66\t12\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::InvalidBit { line: 2, found: '2' })
    );
}

#[test]
fn test_parse_duplicate_symbol() {
    assert_eq!(
        "65\t0\n65\t1\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::DuplicateSymbol { line: 2, symbol: 65 })
    );
}

#[test]
fn test_parse_not_prefix_free() {
    assert_eq!(
        "65\t01\n66\t1\n67\t011\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::NotPrefixFree { prefix: 65, symbol: 67 })
    );
    assert_eq!(
        "65\t0\n66\t0\n".parse::<CodeTable>(),
        Err(CodeTableFormatError::NotPrefixFree { prefix: 65, symbol: 66 })
    );
}

#[test]
fn test_from_codes() {
    let table = CodeTable::from_codes([(1, code("0")), (2, code("10"))]).unwrap();
    assert_eq!(table.len(), 2);

    assert_eq!(
        CodeTable::from_codes([(1, code("0")), (2, Code::new())]),
        Err(CodeTableFormatError::EmptyCode { line: 2 })
    );
    assert_eq!(
        CodeTable::from_codes([(1, code("1")), (2, code("10"))]),
        Err(CodeTableFormatError::NotPrefixFree { prefix: 1, symbol: 2 })
    );
}
