use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::{error::CodeTableFormatError, tree::{HuffNode, HuffmanTree}};

/// Field separator of the persisted table.
pub const DELIMITER: char = '\t';

/// A variable-length bit string, first bit first.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

/// Error of parsing a lone code; the table parser attaches line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCodeError {
    Empty,
    InvalidBit(char),
}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseCodeError::Empty);
        }

        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                c => Err(ParseCodeError::InvalidBit(c)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Code::from_bits)
    }
}

impl Serialize for Code {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Prefix-free mapping from symbols to codes.
///
/// Every constructor guarantees that each code is non-empty and that no
/// code is a prefix of another.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `0` to every left edge and `1` to every right edge of
    /// `tree` and records the path to each leaf.
    ///
    /// A tree made of a single leaf has no edges; its symbol gets the
    /// one-bit code `0` so that the decoder always consumes input.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();

        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                table.codes.insert(*symbol, Code::from_bits(vec![false]));
            }
            root => {
                let mut path = Code::new();
                table.walk(root, &mut path);
            }
        }

        table
    }

    fn walk(&mut self, node: &HuffNode, path: &mut Code) {
        match node {
            HuffNode::Leaf { symbol, .. } => {
                let previous = self.codes.insert(*symbol, path.clone());
                assert!(previous.is_none(), "symbol {} appears twice in the tree", symbol);
            }
            HuffNode::Internal { left, right, .. } => {
                path.push(false);
                self.walk(left, path);
                path.pop();
                path.push(true);
                self.walk(right, path);
                path.pop();
            }
        }
    }

    /// Builds a table from arbitrary pairs, checking what the parser checks.
    /// Errors report the position of the pair (1-based) as the line.
    pub fn from_codes<I>(codes: I) -> Result<Self, CodeTableFormatError>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut table = Self::new();

        for (i, (symbol, code)) in codes.into_iter().enumerate() {
            table.insert(i + 1, symbol, code)?;
        }

        table.check_prefix_free()?;
        Ok(table)
    }

    fn insert(&mut self, line: usize, symbol: u8, code: Code) -> Result<(), CodeTableFormatError> {
        if code.is_empty() {
            return Err(CodeTableFormatError::EmptyCode { line });
        }
        if self.codes.insert(symbol, code).is_some() {
            return Err(CodeTableFormatError::DuplicateSymbol { line, symbol });
        }
        Ok(())
    }

    /// In lexicographic order a code is immediately followed by the codes
    /// it prefixes, so checking neighbours is enough.
    fn check_prefix_free(&self) -> Result<(), CodeTableFormatError> {
        let mut sorted: Vec<_> = self.codes.iter().collect();
        sorted.sort_by(|a, b| a.1.cmp(b.1));

        for pair in sorted.windows(2) {
            let ((&prefix, a), (&symbol, b)) = (pair[0], pair[1]);
            if a.is_prefix_of(b) {
                return Err(CodeTableFormatError::NotPrefixFree { prefix, symbol });
            }
        }

        Ok(())
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.codes.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }
}

/// One `<symbol>\t<code>` record per line, ascending by symbol.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "{}{}{}", symbol, DELIMITER, code)?;
        }
        Ok(())
    }
}

impl FromStr for CodeTable {
    type Err = CodeTableFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = Self::new();

        for (i, record) in s.lines().enumerate() {
            let line = i + 1;
            if record.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = record.split(DELIMITER).collect();
            if fields.len() != 2 {
                return Err(CodeTableFormatError::FieldCount { line, found: fields.len() });
            }

            let symbol = parse_symbol(fields[0])
                .ok_or_else(|| CodeTableFormatError::InvalidSymbol { line, value: fields[0].to_owned() })?;

            let code = fields[1].parse::<Code>().map_err(|e| match e {
                ParseCodeError::Empty => CodeTableFormatError::EmptyCode { line },
                ParseCodeError::InvalidBit(found) => CodeTableFormatError::InvalidBit { line, found },
            })?;

            table.insert(line, symbol, code)?;
        }

        table.check_prefix_free()?;
        Ok(table)
    }
}

/// Plain decimal only: no sign, no whitespace.
fn parse_symbol(field: &str) -> Option<u8> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests;
