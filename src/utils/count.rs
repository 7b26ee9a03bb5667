/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Wrapping struct that keeps track of written bits and traces every call
/// at the `trace` level of the [`log`] facade.
///
/// Padding bits written by [`align`](BitWrite::align) are counted.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct CountBitWriter<BW: BitWrite> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: usize,
}

impl<BW: BitWrite> CountBitWriter<BW> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite> BitWrite for CountBitWriter<BW> {
    type Error = BW::Error;

    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        self.bit_write.write_bits(value, n).map(|x| {
            self.bits_written += x;
            log::trace!(
                "write_bits({:#016x}, {}) = {} (total = {})",
                value,
                n,
                x,
                self.bits_written
            );
            x
        })
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.bit_write.write_byte(byte).map(|()| {
            self.bits_written += 8;
            log::trace!("write_byte({:#04x}) (total = {})", byte, self.bits_written);
        })
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        let result = self.bit_write.write_bytes(buf);
        let written = match &result {
            Ok(written) => *written,
            Err(partial) => partial.transferred,
        };
        self.bits_written += written * 8;
        log::trace!(
            "write_bytes([{} bytes]) = {} (total = {})",
            buf.len(),
            written,
            self.bits_written
        );
        result
    }

    fn align(&mut self) -> Result<usize, Self::Error> {
        self.bit_write.align().map(|x| {
            self.bits_written += x;
            log::trace!("align() = {} (total = {})", x, self.bits_written);
            x
        })
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        log::trace!("close() (total = {})", self.bits_written);
        self.bit_write.close()
    }
}

/// Wrapping struct that keeps track of read bits and traces every call
/// at the `trace` level of the [`log`] facade.
///
/// Bits discarded by [`align`](BitRead::align) are counted.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct CountBitReader<BR: BitRead> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying [`BitRead`].
    pub bits_read: usize,
}

impl<BR: BitRead> CountBitReader<BR> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead> BitRead for CountBitReader<BR> {
    type Error = BR::Error;

    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        self.bit_read.read_bits(n).map(|x| {
            self.bits_read += n;
            log::trace!("read_bits({}) = {:#016x} (total = {})", n, x, self.bits_read);
            x
        })
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.bit_read.read_byte().map(|x| {
            self.bits_read += 8;
            log::trace!("read_byte() = {:#04x} (total = {})", x, self.bits_read);
            x
        })
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        let result = self.bit_read.read_bytes(buf);
        let read = match &result {
            Ok(read) => *read,
            Err(partial) => partial.transferred,
        };
        self.bits_read += read * 8;
        log::trace!(
            "read_bytes([{} bytes]) = {} (total = {})",
            buf.len(),
            read,
            self.bits_read
        );
        result
    }

    fn align(&mut self) -> usize {
        let x = self.bit_read.align();
        self.bits_read += x;
        log::trace!("align() = {} (total = {})", x, self.bits_read);
        x
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn test_count() -> Result<(), Box<dyn std::error::Error>> {
        let mut count_bit_write =
            CountBitWriter::new(BitWriter::new(MemByteWriterVec::new(Vec::new())));

        count_bit_write.write_bool(true)?;
        assert_eq!(count_bit_write.bits_written, 1);
        count_bit_write.write_bits(1, 20)?;
        assert_eq!(count_bit_write.bits_written, 21);
        count_bit_write.write_byte(0x5a)?;
        assert_eq!(count_bit_write.bits_written, 29);
        assert_eq!(count_bit_write.align()?, 3);
        assert_eq!(count_bit_write.bits_written, 32);
        count_bit_write.write_bytes(&[1, 2, 3])?;
        assert_eq!(count_bit_write.bits_written, 56);
        count_bit_write.write_bits(1, 33)?;
        assert_eq!(count_bit_write.bits_written, 89);
        count_bit_write.close()?;

        let buffer = count_bit_write.into_inner().into_inner().into_inner();
        assert_eq!(buffer.len(), 12);

        let mut count_bit_read = CountBitReader::new(BitReader::new(MemByteReader::new(buffer)));

        assert!(count_bit_read.read_bool()?);
        assert_eq!(count_bit_read.read_bits(20)?, 1);
        assert_eq!(count_bit_read.bits_read, 21);
        assert_eq!(count_bit_read.read_byte()?, 0x5a);
        assert_eq!(count_bit_read.align(), 3);
        assert_eq!(count_bit_read.bits_read, 32);
        let mut buf = [0; 3];
        count_bit_read.read_bytes(&mut buf)?;
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(count_bit_read.bits_read, 56);
        assert_eq!(count_bit_read.read_bits(33)?, 1);
        assert_eq!(count_bit_read.bits_read, 89);

        let mut buf = [0; 2];
        let partial = count_bit_read.read_bytes(&mut buf).unwrap_err();
        assert_eq!(partial.transferred, 0);
        assert_eq!(count_bit_read.bits_read, 89);

        Ok(())
    }
}
