/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;
use core::fmt::{Display, Formatter};

use crate::traits::PartialTransfer;

/// The error returned by [`BitReader`](crate::impls::BitReader) and
/// [`BitWriter`](crate::impls::BitWriter).
///
/// Errors of the underlying byte stream are passed through unchanged in the
/// [`Stream`](BitError::Stream) variant; the other variants are violations of
/// the bit stream contract, and are reported without touching the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError<E> {
    /// The underlying byte stream failed.
    Stream(E),
    /// A bit width outside `1..=64` was requested.
    InvalidWidth { n: usize },
    /// The writer is unusable because its sink failed on a previous call.
    Poisoned,
    /// The writer has been closed.
    Closed,
}

impl<E: Display> Display for BitError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            BitError::Stream(e) => write!(f, "Stream error: {}", e),
            BitError::InvalidWidth { n } => {
                write!(f, "The number of bits must be in [1..64], but it is {}", n)
            }
            BitError::Poisoned => write!(f, "The bit writer failed on a previous write"),
            BitError::Closed => write!(f, "The bit writer has been closed"),
        }
    }
}

impl<E: Error + 'static> Error for BitError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BitError::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> BitError<E> {
    /// Returns the stream error, if this is one.
    pub fn stream(&self) -> Option<&E> {
        match self {
            BitError::Stream(e) => Some(e),
            _ => None,
        }
    }
}

/// The error returned by the bit copy methods [`BitRead::copy_to`] and [`BitWrite::copy_from`].
///
/// It can be a read or a write error, depending on which stream (source or
/// destination) generated the error.
#[derive(Debug, Clone)]
pub enum CopyError<RE: Error + Send + Sync + 'static, WE: Error + Send + Sync + 'static> {
    ReadError(RE),
    WriteError(WE),
}

impl<RE: Error + Send + Sync + 'static, WE: Error + Send + Sync + 'static> Display
    for CopyError<RE, WE>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CopyError::ReadError(e) => write!(f, "Read error while copying: {}", e),
            CopyError::WriteError(e) => write!(f, "Write error while copying: {}", e),
        }
    }
}

impl<RE: Error + Send + Sync + 'static, WE: Error + Send + Sync + 'static> Error
    for CopyError<RE, WE>
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CopyError::ReadError(e) => Some(e),
            CopyError::WriteError(e) => Some(e),
        }
    }
}

/// Sequential, streaming bit-by-bit reads.
///
/// Bits are delivered most-significant first: the stream is a single
/// continuous bit sequence, independently of how it is split into calls.
pub trait BitRead {
    type Error: Error + Send + Sync + 'static;

    /// Read `n` bits and return them in the lowest bits.
    ///
    /// `n` must be in `1..=64`. On error no bits are consumed from the
    /// internal cache.
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error>;

    /// Read a single bit.
    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool, Self::Error> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read the next eight bits.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Fill `buf` with the next bytes of the stream, returning its length.
    ///
    /// On a short read, the number of bytes filled is returned together with
    /// the error.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<Self::Error>>;

    /// Discard the bits up to the next byte boundary, returning their number.
    fn align(&mut self) -> usize;

    /// Copy `n` bits from this stream to `bit_write`.
    fn copy_to<W: BitWrite>(
        &mut self,
        bit_write: &mut W,
        mut n: u64,
    ) -> Result<(), CopyError<Self::Error, W::Error>> {
        while n > 0 {
            let to_read = core::cmp::min(n, 64) as usize;
            let read = self.read_bits(to_read).map_err(CopyError::ReadError)?;
            bit_write
                .write_bits(read, to_read)
                .map_err(CopyError::WriteError)?;
            n -= to_read as u64;
        }
        Ok(())
    }
}

/// Sequential, streaming bit-by-bit writes.
///
/// Bits are emitted most-significant first. Complete bytes are passed to the
/// underlying sink as soon as they are available; a trailing partial byte is
/// emitted only by [`align`](BitWrite::align) or [`close`](BitWrite::close).
pub trait BitWrite {
    type Error: Error + Send + Sync + 'static;

    /// Write the lowest `n` bits of `value` to the stream and return the number
    /// of bits written, that is, `n`.
    ///
    /// `n` must be in `1..=64`. The other bits of `value` are ignored; if the
    /// feature `checks` is enabled, implementors should check that they are
    /// zero.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error>;

    /// Write a single bit.
    #[inline(always)]
    fn write_bool(&mut self, bit: bool) -> Result<(), Self::Error> {
        self.write_bits(bit as u64, 1)?;
        Ok(())
    }

    /// Write eight bits.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write all of `buf`, returning its length.
    ///
    /// On a short write, the number of bytes written is returned together
    /// with the error.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>>;

    /// Pad with zeros up to the next byte boundary and return the number of
    /// padding bits. Nothing is written if the stream is already aligned.
    fn align(&mut self) -> Result<usize, Self::Error>;

    /// Align the stream and finalize the underlying sink.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Copy `n` bits from `bit_read` to this stream.
    fn copy_from<R: BitRead>(
        &mut self,
        bit_read: &mut R,
        mut n: u64,
    ) -> Result<(), CopyError<R::Error, Self::Error>> {
        while n > 0 {
            let to_read = core::cmp::min(n, 64) as usize;
            let read = bit_read.read_bits(to_read).map_err(CopyError::ReadError)?;
            self.write_bits(read, to_read)
                .map_err(CopyError::WriteError)?;
            n -= to_read as u64;
        }
        Ok(())
    }
}
