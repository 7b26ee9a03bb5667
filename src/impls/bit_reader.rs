/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::impls::bit_cache::BitCache;
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`BitRead`] for a [`ByteRead`].
///
/// This implementation keeps the bits of the last byte read from the source
/// that have not been returned yet in a one-byte cache, so it never reads
/// more bytes than strictly necessary. When the cache is empty (i.e., the
/// stream is byte-aligned) [`read_byte`](BitRead::read_byte) and
/// [`read_bytes`](BitRead::read_bytes) are passed through to the source,
/// and in particular [`read_bytes`](BitRead::read_bytes) uses
/// [`ByteRead::read_bytes`], which might be a native bulk read.
///
/// Errors of the source are returned unchanged as [`BitError::Stream`]. A
/// failing call does not consume bits from the cache, but bytes already taken
/// from the source before the failure are lost. The reader remains usable,
/// so an exhausted source keeps reporting end of data.
///
/// # Example
/// ```
/// use msb_bitio::prelude::*;
///
/// let mut reader = BitReader::new(MemByteReader::new([0xc1, 0x01]));
/// assert!(reader.read_bool().unwrap());
/// assert_eq!(reader.read_byte().unwrap(), 0x82);
/// assert!(reader.read_byte().is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitReader<S: ByteRead> {
    /// The source of bytes.
    source: S,
    /// The bits of the last byte read that have not been returned yet.
    cache: BitCache,
}

impl<S: ByteRead> BitReader<S> {
    /// Create a new [`BitReader`] around a [`ByteRead`].
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: BitCache::default(),
        }
    }

    /// Return the underlying source, discarding the cached bits.
    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Return whether the next bit starts a byte of the source.
    #[inline(always)]
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.cache.is_aligned()
    }

    /// Return the number of bits read from the source but not returned yet.
    #[inline(always)]
    #[must_use]
    pub fn cached_bits(&self) -> usize {
        self.cache.bits()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Result<u8, BitError<S::Error>> {
        self.source.read_byte().map_err(BitError::Stream)
    }
}

impl<S: ByteRead> BitRead for BitReader<S> {
    type Error = BitError<S::Error>;

    #[inline]
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        if n == 0 || n > 64 {
            return Err(BitError::InvalidWidth { n });
        }

        // happy case, the cache is enough
        if n <= self.cache.bits() {
            return Ok(self.cache.pop(n) as u64);
        }

        // the cache is written back only at the end, so that a failed read
        // leaves it untouched
        let mut result = self.cache.byte() as u64;
        let mut missing = n - self.cache.bits();
        while missing >= 8 {
            result = (result << 8) | self.next_byte()? as u64;
            missing -= 8;
        }

        if missing == 0 {
            self.cache.clear();
        } else {
            let byte = self.next_byte()?;
            let left = 8 - missing;
            result = (result << missing) | (byte >> left) as u64;
            self.cache.set(byte, left);
        }
        Ok(result)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        if self.cache.is_aligned() {
            return self.next_byte();
        }

        let byte = self.next_byte()?;
        let bits = self.cache.bits();
        let result = (self.cache.byte() << (8 - bits)) | (byte >> bits);
        self.cache.set(byte, bits);
        Ok(result)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        if self.cache.is_aligned() {
            return self
                .source
                .read_bytes(buf)
                .map_err(|partial| partial.map(BitError::Stream));
        }

        for (transferred, byte) in buf.iter_mut().enumerate() {
            *byte = self
                .read_byte()
                .map_err(|error| PartialTransfer { transferred, error })?;
        }
        Ok(buf.len())
    }

    #[inline]
    fn align(&mut self) -> usize {
        self.cache.clear()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::MemByteReader;

    #[test]
    fn test_read() -> Result<(), Box<dyn core::error::Error>> {
        let data = [
            3, 255, 0xcc, 0x1a, 0xbc, 0xde, 0x80, 0x01, 0x02, 0xf8, 0x08, 0xf0,
        ];
        let mut reader = BitReader::new(MemByteReader::new(&data));

        assert_eq!(reader.read_byte()?, 3);
        assert_eq!(reader.read_bits(8)?, 255);
        assert_eq!(reader.read_bits(4)?, 0xc);
        assert_eq!(reader.read_bits(8)?, 0xc1);
        assert_eq!(reader.read_bits(20)?, 0xabcde);
        assert!(reader.read_bool()?);
        assert!(!reader.read_bool()?);
        assert_eq!(reader.align(), 6);
        assert_eq!(reader.align(), 0);

        let mut s = [0; 2];
        assert_eq!(reader.read_bytes(&mut s)?, 2);
        assert_eq!(s, [0x01, 0x02]);

        assert_eq!(reader.read_bits(4)?, 0xf);

        assert_eq!(reader.read_bytes(&mut s)?, 2);
        assert_eq!(s, [0x80, 0x8f]);
        Ok(())
    }

    #[test]
    fn test_full_width() -> Result<(), Box<dyn core::error::Error>> {
        let data = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x23, 0x45, 0x67, 0x89];
        let mut reader = BitReader::new(MemByteReader::new(&data));
        assert_eq!(reader.read_bits(64)?, 0xdeadbeef01234567);

        let mut reader = BitReader::new(MemByteReader::new(&data));
        assert_eq!(reader.read_bits(4)?, 0xd);
        assert_eq!(reader.read_bits(64)?, 0xeadbeef012345678);
        assert_eq!(reader.cached_bits(), 4);
        assert_eq!(reader.read_bits(4)?, 0x9);
        assert!(reader.is_aligned());
        Ok(())
    }

    #[test]
    fn test_invalid_width() {
        let mut reader = BitReader::new(MemByteReader::new([0xff]));
        assert_eq!(reader.read_bits(0), Err(BitError::InvalidWidth { n: 0 }));
        assert_eq!(reader.read_bits(65), Err(BitError::InvalidWidth { n: 65 }));
        // nothing was consumed
        assert_eq!(reader.read_byte(), Ok(0xff));
    }

    #[test]
    fn test_failed_read_keeps_cache() {
        let mut reader = BitReader::new(MemByteReader::new([0xa5]));
        assert_eq!(reader.read_bits(3), Ok(0b101));
        assert_eq!(
            reader.read_bits(6),
            Err(BitError::Stream(ByteError::UnexpectedEof { byte_pos: 1 }))
        );
        assert_eq!(reader.cached_bits(), 5);
        assert_eq!(reader.read_bits(5), Ok(0b00101));
    }
}
