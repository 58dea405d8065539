use std::io::{self, Read};

use crate::NUM_SYMBOLS;

/// Occurrences of one symbol in the input. Only built for symbols that
/// occur at least once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub symbol: u8,
    pub count: usize,
}

impl FrequencyEntry {
    pub fn new(symbol: u8, count: usize) -> Self {
        Self { symbol, count }
    }
}

/// Byte histogram of an input sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; NUM_SYMBOLS],
    total: usize,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; NUM_SYMBOLS], total: 0 }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(bytes);
        table
    }

    /// Consumes `reader` to its end, counting every byte read.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; 8 * 1024];

        loop {
            let read = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.update(&buf[..read]);
        }

        Ok(table)
    }

    #[inline(always)]
    pub fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.counts[b as usize] += 1;
        }
        self.total += bytes.len();
    }

    pub fn count(&self, symbol: u8) -> usize {
        self.counts[symbol as usize]
    }

    /// Number of bytes counted so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the present symbols sorted by ascending count.
    ///
    /// Symbols sharing a count keep ascending symbol order, which is the
    /// order a scan of the histogram discovers them in. The tree builder
    /// relies on this order being the same on every run.
    pub fn entries(&self) -> Vec<FrequencyEntry> {
        let mut entries: Vec<_> = self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| FrequencyEntry::new(symbol as u8, count))
            .collect();

        // sort_by_key is stable
        entries.sort_by_key(|e| e.count);
        entries
    }
}
