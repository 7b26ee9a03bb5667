/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`ByteWrite`] for a mutable slice of fixed length.
///
/// Writing past the end of the slice returns [`ByteError::BufferFull`].
///
/// # Example
/// ```
/// use msb_bitio::prelude::*;
///
/// let mut data = [0_u8; 2];
/// let mut byte_writer = MemByteWriter::new(&mut data);
///
/// assert!(byte_writer.write_byte(0xaa).is_ok());
/// assert_eq!(byte_writer.byte_pos(), 1);
/// let partial = byte_writer.write_bytes(&[0xbb, 0xcc]).unwrap_err();
/// assert_eq!(partial.transferred, 1);
/// assert_eq!(partial.error, ByteError::BufferFull { byte_pos: 2 });
/// assert_eq!(data, [0xaa, 0xbb]);
/// ```
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteWriter<B: AsMut<[u8]>> {
    data: B,
    byte_pos: usize,
}

impl<B: AsMut<[u8]>> MemByteWriter<B> {
    /// Create a new [`MemByteWriter`] writing from the start of `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self { data, byte_pos: 0 }
    }

    /// Return the index of the next byte to write.
    #[must_use]
    pub fn byte_pos(&self) -> usize {
        self.byte_pos
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsMut<[u8]>> ByteWrite for MemByteWriter<B> {
    type Error = ByteError;

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), ByteError> {
        match self.data.as_mut().get_mut(self.byte_pos) {
            Some(byte_ref) => {
                *byte_ref = byte;
                self.byte_pos += 1;
                Ok(())
            }
            None => Err(ByteError::BufferFull {
                byte_pos: self.byte_pos,
            }),
        }
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<ByteError>> {
        let data = self.data.as_mut();
        let available = data.len().saturating_sub(self.byte_pos);
        let transferred = buf.len().min(available);
        data[self.byte_pos..self.byte_pos + transferred].copy_from_slice(&buf[..transferred]);
        self.byte_pos += transferred;
        if transferred < buf.len() {
            return Err(PartialTransfer {
                transferred,
                error: ByteError::BufferFull {
                    byte_pos: self.byte_pos,
                },
            });
        }
        Ok(transferred)
    }
}

/// An implementation of [`ByteWrite`] for a [`Vec<u8>`](alloc::vec::Vec),
/// which grows as needed. Writes never fail.
///
/// # Example
/// ```
/// use msb_bitio::prelude::*;
///
/// let mut byte_writer = MemByteWriterVec::new(Vec::new());
/// byte_writer.write_byte(0x01).unwrap();
/// byte_writer.write_bytes(&[0x02, 0x03]).unwrap();
/// assert_eq!(byte_writer.into_inner(), vec![0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, PartialEq)]
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteWriterVec<B: AsMut<alloc::vec::Vec<u8>>> {
    data: B,
}

#[cfg(feature = "alloc")]
impl<B: AsMut<alloc::vec::Vec<u8>>> MemByteWriterVec<B> {
    /// Create a new [`MemByteWriterVec`] appending to `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

#[cfg(feature = "alloc")]
impl<B: AsMut<alloc::vec::Vec<u8>> + AsRef<alloc::vec::Vec<u8>>> MemByteWriterVec<B> {
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(feature = "alloc")]
impl<B: AsMut<alloc::vec::Vec<u8>>> ByteWrite for MemByteWriterVec<B> {
    type Error = core::convert::Infallible;

    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.data.as_mut().push(byte);
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        self.data.as_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
}
