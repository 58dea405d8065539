use std::{collections::HashMap, io::{Read, Write}, str::FromStr};

use crate::{codec::Compressed, codes::CodeTable, error::Error};

/// Metadata stored next to a compressed payload in `<basename>.properties`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveProperties {
    pub original_length: usize,
    pub compressed_length: usize,
    pub padding_bits: u8,
    pub symbols: usize,
    pub max_code_length: usize,
    /// File name of the code table, relative to the properties file.
    pub codes: String,
}

impl ArchiveProperties {
    pub fn new(original_length: usize, compressed: &Compressed, table: &CodeTable, codes: &str) -> Self {
        Self {
            original_length,
            compressed_length: compressed.len(),
            padding_bits: compressed.padding_bits(),
            symbols: table.len(),
            max_code_length: table.max_code_len(),
            codes: codes.to_owned(),
        }
    }

    pub fn read<R: Read>(reader: R) -> Result<Self, Error> {
        Self::try_from(java_properties::read(reader)?)
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut props = HashMap::new();
        props.insert("originallength".to_owned(), self.original_length.to_string());
        props.insert("compressedlength".to_owned(), self.compressed_length.to_string());
        props.insert("paddingbits".to_owned(), self.padding_bits.to_string());
        props.insert("symbols".to_owned(), self.symbols.to_string());
        props.insert("maxcodelength".to_owned(), self.max_code_length.to_string());
        props.insert("codes".to_owned(), self.codes.clone());

        java_properties::write(writer, &props)?;
        Ok(())
    }
}

fn required<'a>(props: &'a HashMap<String, String>, key: &str) -> Result<&'a str, Error> {
    props
        .get(key)
        .map(|v| v.trim())
        .ok_or_else(|| Error::Properties(format!("missing key {}", key)))
}

fn parse<T: FromStr>(props: &HashMap<String, String>, key: &str) -> Result<T, Error> {
    let value = required(props, key)?;
    value
        .parse()
        .map_err(|_| Error::Properties(format!("invalid value {:?} for {}", value, key)))
}

impl TryFrom<HashMap<String, String>> for ArchiveProperties {
    type Error = Error;

    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        let props = ArchiveProperties {
            original_length: parse(&value, "originallength")?,
            compressed_length: parse(&value, "compressedlength")?,
            padding_bits: parse(&value, "paddingbits")?,
            symbols: parse(&value, "symbols")?,
            max_code_length: parse(&value, "maxcodelength")?,
            codes: required(&value, "codes")?.to_owned(),
        };

        if props.padding_bits > 7 {
            return Err(Error::Properties(format!("paddingbits must be below 8, found {}", props.padding_bits)));
        }

        Ok(props)
    }
}

#[test]
fn test_properties_round_trip() {
    let (compressed, table) = crate::compress(b"abracadabra");
    let props = ArchiveProperties::new(11, &compressed, &table, "out.codes");

    let mut buf = Vec::new();
    props.write(&mut buf).unwrap();

    let read = ArchiveProperties::read(buf.as_slice()).unwrap();

    assert_eq!(read, props);
    assert_eq!(read.symbols, 5);
    assert_eq!(read.compressed_length, 3);
    assert_eq!(read.padding_bits, 1);
}

#[test]
fn test_properties_missing_key() {
    let text = "originallength=3\ncompressedlength=1\npaddingbits=5\nsymbols=2\ncodes=x.codes\n";

    match ArchiveProperties::read(text.as_bytes()) {
        Err(Error::Properties(msg)) => assert!(msg.contains("maxcodelength")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_properties_invalid_padding() {
    let text = "originallength=3\ncompressedlength=1\npaddingbits=9\nsymbols=2\nmaxcodelength=1\ncodes=x.codes\n";

    assert!(matches!(ArchiveProperties::read(text.as_bytes()), Err(Error::Properties(_))));

    let text = text.replace("paddingbits=9", "paddingbits=five");
    assert!(matches!(ArchiveProperties::read(text.as_bytes()), Err(Error::Properties(_))));
}
