use crate::codes::Code;

/// Bytes produced by a [`BinaryWriterBuilder`]. `padding` zero bits fill
/// the tail of the last byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryWriter {
    pub os: Vec<u8>,
    pub padding: u8,
}

/// Packs bits most significant first into a growable byte buffer.
pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    pub current: u8,
    pub free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self { os: Vec::with_capacity(bytes), ..Self::default() }
    }

    /// Flushes the partial byte, if any, and reports how many zero bits
    /// were needed to complete it.
    pub fn build(mut self) -> BinaryWriter {
        let padding = if self.free == 8 { 0 } else { self.free as u8 };
        if padding != 0 {
            self.write(self.current);
        }

        BinaryWriter { os: self.os, padding }
    }

    #[inline(always)]
    fn write(&mut self, b: u8) {
        self.os.push(b);
    }

    /// Appends the low `len` bits of `b`; `len` must fit in the free part
    /// of the current byte.
    #[inline(always)]
    pub fn write_in_current(&mut self, b: u8, len: usize) -> usize {
        debug_assert!(len > 0 && len <= self.free);

        self.free -= len;
        self.current |= (b & (0xFF >> (8 - len))) << self.free;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len;
        len
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) -> usize {
        self.write_in_current(bit as u8, 1)
    }

    /// Appends a code of any length.
    #[inline(always)]
    pub fn push_code(&mut self, code: &Code) -> usize {
        for &bit in code.bits() {
            self.push_bit(bit);
        }
        code.len()
    }
}

/// Reads bits most significant first, stopping after `limit` bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryReader<'a> {
    is: &'a [u8],
    limit: usize,
    pub position: usize,
    pub read_bits: usize,
    pub current: u8,
    pub fill: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(input_stream: &'a [u8]) -> Self {
        Self::with_limit(input_stream, input_stream.len() * 8)
    }

    pub fn with_limit(input_stream: &'a [u8], limit: usize) -> Self {
        assert!(limit <= input_stream.len() * 8, "Limit {} exceeds the stream length", limit);

        BinaryReader {
            is: input_stream,
            limit,
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    #[inline(always)]
    fn read(&mut self) -> Option<u8> {
        let b = *self.is.get(self.position)?;
        self.position += 1;
        Some(b)
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.read_bits
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.read_bits >= self.limit {
            return None;
        }

        if self.fill == 0 {
            self.current = self.read()?;
            self.fill = 8;
        }

        self.fill -= 1;
        self.read_bits += 1;
        Some((self.current >> self.fill) & 1 == 1)
    }
}
