/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::impls::bit_cache::{BitCache, word_mask};
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`BitWrite`] for a [`ByteWrite`].
///
/// Bits are accumulated in a one-byte cache, and every time eight bits are
/// available they are passed to the sink. When the cache is empty (i.e., the
/// stream is byte-aligned) [`write_byte`](BitWrite::write_byte) and
/// [`write_bytes`](BitWrite::write_bytes) are passed through to the sink,
/// and in particular [`write_bytes`](BitWrite::write_bytes) uses
/// [`ByteWrite::write_bytes`], which might be a native bulk write.
///
/// The writer must be [closed](BitWrite::close) (or at least
/// [aligned](BitWrite::align)) before being dropped, or the bits in the
/// cache will be lost.
///
/// After the sink returns an error the writer is poisoned: the error is
/// returned as [`BitError::Stream`], and all subsequent operations return
/// [`BitError::Poisoned`]. After [`close`](BitWrite::close), all operations
/// return [`BitError::Closed`].
///
/// # Example
/// ```
/// use msb_bitio::prelude::*;
///
/// let mut writer = BitWriter::new(MemByteWriterVec::new(Vec::new()));
/// writer.write_bool(true).unwrap();
/// writer.write_bits(0x41, 7).unwrap();
/// writer.write_bits(0x1, 2).unwrap();
/// assert_eq!(writer.align().unwrap(), 6);
/// writer.close().unwrap();
/// assert_eq!(writer.into_inner().into_inner(), vec![0xc1, 0x40]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitWriter<S: ByteWrite> {
    /// The sink of bytes.
    sink: S,
    /// The bits written but not yet passed to the sink.
    cache: BitCache,
    /// Whether the sink returned an error.
    poisoned: bool,
    /// Whether [`BitWrite::close`] has been called.
    closed: bool,
}

impl<S: ByteWrite> BitWriter<S> {
    /// Create a new [`BitWriter`] around a [`ByteWrite`].
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            cache: BitCache::default(),
            poisoned: false,
            closed: false,
        }
    }

    /// Return the underlying sink. Bits in the cache are lost, so you
    /// should call [`close`](BitWrite::close) first.
    pub fn into_inner(self) -> S {
        self.sink
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Return whether the next bit starts a new byte.
    #[inline(always)]
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.cache.is_aligned()
    }

    /// Return the number of bits written but not yet passed to the sink.
    #[inline(always)]
    #[must_use]
    pub fn cached_bits(&self) -> usize {
        self.cache.bits()
    }

    #[inline(always)]
    fn check_usable(&self) -> Result<(), BitError<S::Error>> {
        if self.closed {
            Err(BitError::Closed)
        } else if self.poisoned {
            Err(BitError::Poisoned)
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    fn poison(&mut self, error: S::Error) -> BitError<S::Error> {
        log::debug!("Bit writer poisoned by sink error: {}", error);
        self.poisoned = true;
        BitError::Stream(error)
    }

    #[inline(always)]
    fn emit(&mut self, byte: u8) -> Result<(), BitError<S::Error>> {
        match self.sink.write_byte(byte) {
            Ok(()) => Ok(()),
            Err(error) => Err(self.poison(error)),
        }
    }
}

impl<S: ByteWrite> BitWrite for BitWriter<S> {
    type Error = BitError<S::Error>;

    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        if n == 0 || n > 64 {
            return Err(BitError::InvalidWidth { n });
        }
        self.check_usable()?;

        #[cfg(feature = "checks")]
        assert!(
            value & word_mask(n) == value,
            "Value {} does not fit in {} bits",
            value,
            n
        );
        let value = value & word_mask(n);

        // happy case, the cache does not fill up
        let free = self.cache.free_bits();
        if n < free {
            self.cache.push(value, n);
            return Ok(n);
        }

        // complete the cached byte
        let mut remaining = n - free;
        let first = ((self.cache.byte() as u64) << free) | (value >> remaining);
        self.emit(first as u8)?;
        self.cache.clear();

        while remaining >= 8 {
            remaining -= 8;
            self.emit((value >> remaining) as u8)?;
        }

        self.cache.set(value as u8, remaining);
        Ok(n)
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.check_usable()?;

        if self.cache.is_aligned() {
            return self.emit(byte);
        }

        let bits = self.cache.bits();
        self.emit((self.cache.byte() << (8 - bits)) | (byte >> bits))?;
        self.cache.set(byte, bits);
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        self.check_usable().map_err(|error| PartialTransfer {
            transferred: 0,
            error,
        })?;

        if self.cache.is_aligned() {
            return match self.sink.write_bytes(buf) {
                Ok(written) => Ok(written),
                Err(partial) => Err(partial.map(|error| self.poison(error))),
            };
        }

        for (transferred, &byte) in buf.iter().enumerate() {
            self.write_byte(byte)
                .map_err(|error| PartialTransfer { transferred, error })?;
        }
        Ok(buf.len())
    }

    fn align(&mut self) -> Result<usize, Self::Error> {
        self.check_usable()?;

        if self.cache.is_aligned() {
            return Ok(0);
        }

        let padding = self.cache.free_bits();
        self.emit(self.cache.byte() << padding)?;
        self.cache.clear();
        Ok(padding)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        if self.closed {
            return Err(BitError::Closed);
        }

        let flushed = self.align();
        if let Ok(padding) = flushed {
            if padding != 0 {
                log::debug!("Closing bit writer with {} bits of padding", padding);
            }
        }
        let finalized = self.sink.close().map_err(BitError::Stream);
        self.closed = true;
        // a flush error is reported in place of a finalization error
        flushed.and(finalized)
    }
}
