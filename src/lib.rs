//! Byte-oriented Huffman coding.
//!
//! [`compress`] counts the bytes of its input, builds a Huffman tree by
//! repeatedly merging the two lightest nodes, derives a prefix-free
//! [`CodeTable`] from it and packs the input into a [`Compressed`]
//! bitstream. [`decompress`] needs only that bitstream and the table.
//!
//! ```
//! use huffman_rust::{compress, decompress, CodeTable};
//!
//! let (compressed, table) = compress(b"abracadabra");
//!
//! // The table survives a trip through its text form.
//! let table: CodeTable = table.to_string().parse().unwrap();
//!
//! assert_eq!(decompress(&compressed, &table).unwrap(), b"abracadabra");
//! ```

pub mod bitstreams;
pub mod codec;
pub mod codes;
pub mod error;
pub mod frequency;
pub mod properties;
pub mod tree;

pub use codec::Compressed;
pub use codes::{Code, CodeTable};
pub use error::{CodeTableFormatError, DecodeError, Error, UnknownSymbolError};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use properties::ArchiveProperties;
pub use tree::{HuffNode, HuffmanTree};

/// Size of the byte alphabet.
pub const NUM_SYMBOLS: usize = 256;

/// Builds the code table of `input` and packs `input` with it.
///
/// An empty input yields an empty payload and an empty table.
pub fn compress(input: &[u8]) -> (Compressed, CodeTable) {
    let entries = FrequencyTable::from_bytes(input).entries();
    log::trace!("frequencies: {:?}", entries);

    let Some(tree) = HuffmanTree::build(&entries) else {
        log::debug!("empty input, nothing to compress");
        return (Compressed::default(), CodeTable::new());
    };

    let table = CodeTable::from_tree(&tree);
    log::debug!(
        "{} distinct symbols, longest code is {} bits",
        table.len(), table.max_code_len()
    );

    let compressed = codec::pack(input, &table)
        .expect("a table built from the input has a code for every input byte");

    (compressed, table)
}

/// Packs `input` with an existing table.
pub fn compress_with_table(input: &[u8], table: &CodeTable) -> Result<Compressed, UnknownSymbolError> {
    codec::pack(input, table)
}

pub fn decompress(compressed: &Compressed, table: &CodeTable) -> Result<Vec<u8>, DecodeError> {
    codec::unpack(compressed, table)
}

#[cfg(test)]
mod tests;
