/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;
use core::fmt::{Display, Formatter};

/// The error of a bulk transfer that stopped before the whole buffer was
/// transferred.
///
/// Both fields are meaningful: `transferred` bytes at the start of the buffer
/// have been read or written, and `error` is the error that stopped the
/// transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialTransfer<E> {
    /// The number of bytes transferred before the error.
    pub transferred: usize,
    /// The error that stopped the transfer.
    pub error: E,
}

impl<E> PartialTransfer<E> {
    /// Maps the error, keeping the count.
    pub fn map<F>(self, f: impl FnOnce(E) -> F) -> PartialTransfer<F> {
        PartialTransfer {
            transferred: self.transferred,
            error: f(self.error),
        }
    }

    /// Returns the error, discarding the count.
    pub fn into_error(self) -> E {
        self.error
    }
}

impl<E: Display> Display for PartialTransfer<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Transfer stopped after {} bytes: {}",
            self.transferred, self.error
        )
    }
}

impl<E: Error + 'static> Error for PartialTransfer<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Sequential, streaming byte-by-byte reads.
///
/// The only mandatory method is [`read_byte`](ByteRead::read_byte), which
/// must report end of data with an error. Sources that can fill a buffer in a
/// single operation should override [`read_bytes`](ByteRead::read_bytes),
/// which is used by bit readers when they are byte-aligned.
pub trait ByteRead {
    type Error: Error + Send + Sync + 'static;

    /// Read a byte and advance the current position.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Fill `buf`, returning its length.
    ///
    /// If the source fails before `buf` is full, the bytes transferred so far
    /// are left at the start of `buf` and their number is returned together
    /// with the error.
    ///
    /// The default implementation calls [`read_byte`](ByteRead::read_byte)
    /// for each byte.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        for (transferred, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte().map_err(|error| PartialTransfer { transferred, error })?;
        }
        Ok(buf.len())
    }
}

/// Sequential, streaming byte-by-byte writes.
///
/// The only mandatory method is [`write_byte`](ByteWrite::write_byte). Sinks
/// with a native bulk write should override
/// [`write_bytes`](ByteWrite::write_bytes), and sinks that need finalization
/// should override [`close`](ByteWrite::close).
pub trait ByteWrite {
    type Error: Error + Send + Sync + 'static;

    /// Write a byte and advance the current position.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write all of `buf`, returning its length.
    ///
    /// If the sink fails before all of `buf` is written, the number of bytes
    /// written is returned together with the error.
    ///
    /// The default implementation calls [`write_byte`](ByteWrite::write_byte)
    /// for each byte.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        for (transferred, &byte) in buf.iter().enumerate() {
            self.write_byte(byte)
                .map_err(|error| PartialTransfer { transferred, error })?;
        }
        Ok(buf.len())
    }

    /// Finalize the sink.
    ///
    /// The default implementation does nothing.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<R: ByteRead + ?Sized> ByteRead for &mut R {
    type Error = R::Error;

    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        (**self).read_bytes(buf)
    }
}

impl<W: ByteWrite + ?Sized> ByteWrite for &mut W {
    type Error = W::Error;

    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    #[inline(always)]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        (**self).write_bytes(buf)
    }

    #[inline(always)]
    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors of the in-memory byte streams.
pub enum ByteError {
    /// A read was attempted past the end of the data.
    UnexpectedEof { byte_pos: usize },
    /// A write was attempted past the end of a fixed-size buffer.
    BufferFull { byte_pos: usize },
}

impl core::error::Error for ByteError {}
impl core::fmt::Display for ByteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteError::UnexpectedEof { byte_pos } => {
                write!(f, "Unexpected end of data at byte position {}", byte_pos)
            }
            ByteError::BufferFull { byte_pos } => {
                write!(f, "Buffer full at byte position {}", byte_pos)
            }
        }
    }
}
