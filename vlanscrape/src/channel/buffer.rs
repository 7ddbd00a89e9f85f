//! Output buffer with tail-only prompt search.
//!
//! A full `show running-config` can run to hundreds of kilobytes, so the
//! prompt is only looked for in the last `search_depth` bytes of what has
//! been received so far.
//!
//! A read that gave up before its prompt leaves the buffer *stale*: the rest
//! of that command's output, and its prompt, are still on the way. A stale
//! buffer must be [settled](PatternBuffer::settle) before the next command
//! is sent, or the late prompt would end the next read early.

use regex::bytes::Regex;

/// Default number of trailing bytes searched for a prompt.
pub const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Accumulates shell output and searches its tail for prompt patterns.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,

    /// How many bytes from the end to search.
    search_depth: usize,

    /// An earlier read timed out and its prompt has not been seen yet.
    stale: bool,
}

impl PatternBuffer {
    /// Create a buffer that searches the last `search_depth` bytes.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
            stale: false,
        }
    }

    /// Append received bytes with ANSI escape sequences removed.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Search only the tail of the buffer for the pattern.
    ///
    /// Offsets of the returned match are relative to the start of the
    /// searched region, not the whole buffer.
    pub fn search_tail(&self, pattern: &Regex) -> Option<regex::bytes::Match<'_>> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.find(&self.buffer[start..])
    }

    /// Check if the tail contains a pattern match.
    pub fn tail_contains(&self, pattern: &Regex) -> bool {
        self.search_tail(pattern).is_some()
    }

    /// Take ownership of the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop anything left over from a previous command.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Record that a read gave up before its prompt arrived.
    ///
    /// The partial output is kept: the prompt may be split across reads.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Try to finish off a stale read.
    ///
    /// Returns `true` once the buffer is clean. When the late prompt has
    /// arrived, everything up to it is dropped.
    pub fn settle(&mut self, pattern: &Regex) -> bool {
        if !self.stale {
            return true;
        }
        if !self.tail_contains(pattern) {
            return false;
        }
        self.buffer.clear();
        self.stale = false;
        true
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}
