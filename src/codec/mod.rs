use crate::{
    bitstreams::{BinaryReader, BinaryWriterBuilder},
    codes::CodeTable,
    error::{DecodeError, UnknownSymbolError},
};

/// Packed bitstream together with the number of zero bits that pad its
/// last byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compressed {
    bytes: Vec<u8>,
    padding_bits: u8,
}

impl Compressed {
    /// Validates that `padding_bits` fits in the last byte and that the
    /// padding itself is zero.
    pub fn new(bytes: Vec<u8>, padding_bits: u8) -> Result<Self, DecodeError> {
        if padding_bits > 7 || (bytes.is_empty() && padding_bits != 0) {
            return Err(DecodeError::InvalidPadding(padding_bits));
        }
        if let Some(&last) = bytes.last() {
            let mask = ((1u16 << padding_bits) - 1) as u8;
            if last & mask != 0 {
                return Err(DecodeError::NonZeroPadding);
            }
        }

        Ok(Self { bytes, padding_bits })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn padding_bits(&self) -> u8 {
        self.padding_bits
    }

    /// Number of meaningful bits in the stream.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.padding_bits as usize
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Concatenates the code of every input byte and packs the result,
/// zero-padding the last byte.
pub fn pack(input: &[u8], table: &CodeTable) -> Result<Compressed, UnknownSymbolError> {
    let mut lookup = [None; crate::NUM_SYMBOLS];
    for (symbol, code) in table.iter() {
        lookup[symbol as usize] = Some(code);
    }

    let mut writer = BinaryWriterBuilder::with_capacity(input.len());
    for (offset, &symbol) in input.iter().enumerate() {
        let code = lookup[symbol as usize].ok_or(UnknownSymbolError { symbol, offset })?;
        writer.push_code(code);
    }

    let written_bits = writer.written_bits;
    let out = writer.build();
    log::debug!(
        "packed {} bytes into {} bits ({} bytes, {} padding bits)",
        input.len(), written_bits, out.os.len(), out.padding
    );

    Ok(Compressed { bytes: out.os, padding_bits: out.padding })
}

/// Reverses [`pack`].
///
/// Bits are matched one at a time against a trie of the table's codes,
/// so each bit costs a single step regardless of the alphabet size.
pub fn unpack(compressed: &Compressed, table: &CodeTable) -> Result<Vec<u8>, DecodeError> {
    let trie = DecodeTrie::new(table);
    let mut reader = BinaryReader::with_limit(compressed.bytes(), compressed.bit_len());
    let mut out = Vec::with_capacity(compressed.len() * 2);

    let mut node = DecodeTrie::ROOT;
    let mut start = 0;

    while let Some(bit) = reader.read_bit() {
        node = match trie.step(node, bit) {
            Some(TrieNode::Leaf(symbol)) => {
                out.push(symbol);
                start = reader.read_bits;
                DecodeTrie::ROOT
            }
            Some(TrieNode::Branch(next)) => next,
            None => {
                return Err(DecodeError::InvalidCode {
                    start,
                    end: reader.read_bits,
                    max_code_len: table.max_code_len(),
                })
            }
        };
    }

    if node != DecodeTrie::ROOT {
        return Err(DecodeError::Truncated(reader.read_bits - start));
    }

    log::debug!("unpacked {} bits into {} bytes", compressed.bit_len(), out.len());
    Ok(out)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrieNode {
    Branch(usize),
    Leaf(u8),
}

/// Binary trie over the codes of a table. Branch `i` stores its two
/// children at `children[i]`, indexed by the next bit.
struct DecodeTrie {
    children: Vec<[Option<TrieNode>; 2]>,
}

impl DecodeTrie {
    const ROOT: usize = 0;

    fn new(table: &CodeTable) -> Self {
        let mut trie = DecodeTrie { children: vec![[None; 2]] };

        for (symbol, code) in table.iter() {
            let Some((&last, path)) = code.bits().split_last() else {
                continue;
            };

            let mut node = Self::ROOT;
            for &bit in path {
                node = match trie.children[node][bit as usize] {
                    Some(TrieNode::Branch(next)) => next,
                    Some(TrieNode::Leaf(_)) => unreachable!("code tables are prefix-free"),
                    None => {
                        let next = trie.children.len();
                        trie.children.push([None; 2]);
                        trie.children[node][bit as usize] = Some(TrieNode::Branch(next));
                        next
                    }
                };
            }

            debug_assert!(trie.children[node][last as usize].is_none(), "code tables are prefix-free");
            trie.children[node][last as usize] = Some(TrieNode::Leaf(symbol));
        }

        trie
    }

    #[inline(always)]
    fn step(&self, node: usize, bit: bool) -> Option<TrieNode> {
        self.children[node][bit as usize]
    }
}
