use thiserror::Error;

/// A persisted code table could not be parsed.
///
/// Every variant except `NotPrefixFree` carries the 1-based line of the
/// offending record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeTableFormatError {
    #[error("line {line}: expected 2 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: {value:?} is not a symbol in 0..=255")]
    InvalidSymbol { line: usize, value: String },
    #[error("line {line}: empty code")]
    EmptyCode { line: usize },
    #[error("line {line}: invalid character {found:?} in code")]
    InvalidBit { line: usize, found: char },
    #[error("line {line}: symbol {symbol} is defined twice")]
    DuplicateSymbol { line: usize, symbol: u8 },
    #[error("code of symbol {prefix} is a prefix of the code of symbol {symbol}")]
    NotPrefixFree { prefix: u8, symbol: u8 },
}

/// The input holds a byte the code table has no entry for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("symbol {symbol} at offset {offset} has no code")]
pub struct UnknownSymbolError {
    pub symbol: u8,
    pub offset: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bits read since the last emitted symbol match no code, and no
    /// longer code can start with them.
    #[error("bits {start}..{end} match no code (longest code is {max_code_len} bits)")]
    InvalidCode { start: usize, end: usize, max_code_len: usize },
    /// The stream ended in the middle of a code.
    #[error("stream ends with {0} unmatched bits")]
    Truncated(usize),
    #[error("padding of {0} bits does not fit in the final byte")]
    InvalidPadding(u8),
    #[error("padding bits of the final byte are not zero")]
    NonZeroPadding,
}

/// Crate level error used by the file adapters.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] CodeTableFormatError),
    #[error(transparent)]
    UnknownSymbol(#[from] UnknownSymbolError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("malformed properties: {0}")]
    Properties(String),
    #[error(transparent)]
    PropertiesFile(#[from] java_properties::PropertiesError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
